//! Read-only listings: devices and keys

use colored::Colorize;

use crate::context::Context;
use crate::error::Result;
use crate::output::join_tags;

/// List every device in the tailnet
pub fn run_devices(ctx: &Context) -> Result<()> {
    let devices = ctx.client()?.get_devices()?;

    if devices.is_empty() {
        println!("{}", "No devices found in this tailnet.".yellow());
        return Ok(());
    }

    for device in &devices {
        println!("{} ({})", device.name.bold(), device.id.dimmed());
        println!("  {:<11} {}", "IP:".dimmed(), device.ip);
        println!("  {:<11} {}", "Last seen:".dimmed(), device.last_seen);
        println!("  {:<11} {}", "OS:".dimmed(), device.os);
        println!("  {:<11} {}", "Tags:".dimmed(), join_tags(&device.tags));
        println!();
    }
    println!("{} devices", devices.len());
    Ok(())
}

/// List API keys
pub fn run_keys(ctx: &Context) -> Result<()> {
    let keys = ctx.client()?.get_keys()?;

    if keys.is_empty() {
        println!("{}", "No API keys found in this tailnet.".yellow());
        return Ok(());
    }

    for key in &keys {
        let name = if key.name.is_empty() { "(unnamed)" } else { key.name.as_str() };
        println!("{} ({})", name.bold(), key.id.dimmed());
        println!("  {:<9} {}", "Created:".dimmed(), key.created);
        println!("  {:<9} {}", "Expires:".dimmed(), key.expires);
        println!();
    }
    Ok(())
}
