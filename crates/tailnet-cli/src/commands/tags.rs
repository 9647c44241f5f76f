//! Tag commands
//!
//! `list` and `device-tags` only read. Every other tag command builds a
//! [`TagRule`] and runs it through the confirmation protocol.

use colored::Colorize;
use tailnet_core::{
    ApplyReport, ConfirmationProtocol, DeviceFilter, Outcome, ProtocolOptions, TagRule,
    summarize_names, tag_usage,
};

use crate::cli::ConfirmArgs;
use crate::context::Context;
use crate::error::{CliError, Result};
use crate::interactive::TerminalReviewer;
use crate::output::{Table, join_tags};

/// Show every tag with its device count and a few device names
pub fn run_tag_list(ctx: &Context) -> Result<()> {
    let devices = ctx.client()?.get_devices()?;
    let usage = tag_usage(&devices);

    if usage.is_empty() {
        println!("{}", "No tags found in this tailnet.".yellow());
        return Ok(());
    }

    println!("{}", "Tags in your tailnet".bold());
    println!();
    let mut table = Table::new(["Tag", "Devices", "Names"]);
    for (tag, holders) in &usage {
        table.add_row([tag.clone(), holders.len().to_string(), summarize_names(holders)]);
    }
    table.print();
    Ok(())
}

/// Show devices and their tags, optionally filtered
pub fn run_device_tags(ctx: &Context, filter: &DeviceFilter) -> Result<()> {
    let devices = ctx.client()?.get_devices()?;
    let matching = filter.apply(&devices);

    let mut table = Table::new(["Device Name", "Device ID", "Tags"]);
    for device in matching {
        table.add_row([device.name.clone(), device.id.clone(), join_tags(&device.tags)]);
    }

    if table.is_empty() {
        println!("{}", "No devices found matching the filters.".yellow());
        return Ok(());
    }

    println!("{}", "Devices and Tags".bold());
    println!();
    table.print();
    Ok(())
}

/// Preview, confirm and apply a tag rule
pub fn run_rule(ctx: &Context, rule: TagRule, confirm: ConfirmArgs) -> Result<()> {
    let client = ctx.client()?;
    let options = ProtocolOptions {
        dry_run: confirm.dry_run,
        assume_yes: confirm.yes,
    };

    println!("{} {}", "=>".blue().bold(), capitalize(&rule.to_string()).bold());
    println!();

    let protocol = ConfirmationProtocol::new(&client, options);
    let mut reviewer = TerminalReviewer::new();
    let outcome = protocol.run(&rule, &mut reviewer)?;

    match &outcome {
        Outcome::NothingAffected(_) => Ok(()),
        Outcome::DryRun(_) => {
            println!();
            println!("{}", "This was a dry run. No changes were made.".yellow());
            Ok(())
        }
        Outcome::Cancelled(_) => {
            println!("{}", "Operation cancelled.".yellow());
            Ok(())
        }
        Outcome::Applied { report, .. } => {
            println!();
            print_report(report);
            check_report(report)
        }
    }
}

/// Split comma-separated ids, dropping blanks
pub fn split_ids(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|arg| arg.split(','))
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

fn print_report(report: &ApplyReport) {
    let failures = report.failures();

    if failures.is_empty() {
        println!("{} {}", "OK".green().bold(), success_message(&report.rule, report.applied()));
    } else {
        println!(
            "{} planned {}, applied {}",
            "WARN".yellow().bold(),
            report.planned(),
            report.applied()
        );
        for failure in &failures {
            let label = failure.device_name.as_deref().unwrap_or(&failure.device_id);
            println!("  {} {}: {}", "x".red(), label, failure.reason);
        }
    }

    if report.unchanged() > 0 {
        println!(
            "   {}",
            format!("{} devices already up to date", report.unchanged()).dimmed()
        );
    }
}

/// Fails only when every attempted write failed
fn check_report(report: &ApplyReport) -> Result<()> {
    let failed = report.failures().len();
    if failed > 0 && report.applied() == 0 {
        return Err(CliError::user(format!(
            "All {} device updates failed",
            failed
        )));
    }
    Ok(())
}

fn success_message(rule: &TagRule, applied: usize) -> String {
    match rule {
        TagRule::Rename { .. } => format!("Renamed tag on {} devices", applied),
        TagRule::RemoveAll { .. } => format!("Removed tag from {} devices", applied),
        _ => format!("Updated {} devices", applied),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
