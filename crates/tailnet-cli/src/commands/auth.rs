//! Authentication commands: auth, status, test-auth, logout

use chrono::{DateTime, Utc};
use colored::Colorize;
use tailnet_api::{AuthStatus, Session};

use crate::context::Context;
use crate::error::{CliError, Result};

const REAUTH_HINT: &str = "Try running 'tailnet-admin auth' again.";

/// Verify a token against the API, then store it
pub fn run_auth(ctx: &Context, tailnet: &str, token: &str, expires_in: Option<u64>) -> Result<()> {
    let tailnet = tailnet.trim();
    let token = token.trim();
    if tailnet.is_empty() {
        return Err(CliError::user("Tailnet name is required."));
    }
    if token.is_empty() {
        return Err(CliError::user("API token is required."));
    }

    println!("{} Checking token for {}", "=>".blue().bold(), tailnet.cyan());
    let client = ctx.client_for(&Session::new(tailnet, token))?;
    let devices = client
        .get_devices()
        .map_err(|e| CliError::user(format!("Authentication failed: {}", e)))?;

    ctx.store().save(tailnet, token, expires_in)?;

    println!(
        "{} Authenticated to {} ({} devices)",
        "OK".green().bold(),
        tailnet.green(),
        devices.len()
    );
    println!(
        "   {}",
        format!("Credentials stored in {}", ctx.store().dir().display()).dimmed()
    );
    Ok(())
}

/// Show what is stored, without contacting the API
pub fn run_status(ctx: &Context) -> Result<()> {
    match ctx.store().status()? {
        AuthStatus::NotAuthenticated => {
            println!("{}", "Not authenticated.".yellow());
            println!("Run {} to authenticate.", "tailnet-admin auth".cyan());
        }
        AuthStatus::Authenticated {
            tailnet,
            token_present,
            expires_at,
        } => {
            println!("{}", "Authentication Status".bold());
            println!();
            println!("  {:<10} {}", "Tailnet:".dimmed(), tailnet.green());
            println!("  {:<10} {}", "API:".dimmed(), ctx.settings().api_url);
            if token_present {
                println!("  {:<10} {}", "Token:".dimmed(), "Present".green());
            } else {
                println!("  {:<10} {}", "Token:".dimmed(), "Missing".red());
            }
            if let Some(at) = expires_at {
                match remaining(at, Utc::now()) {
                    Some(left) => println!("  {:<10} {}", "Expires:".dimmed(), left.green()),
                    None => {
                        println!("  {:<10} {}", "Expires:".dimmed(), "Expired".red());
                        println!();
                        println!("Run {} to authenticate again.", "tailnet-admin auth".cyan());
                    }
                }
            }
        }
    }
    Ok(())
}

/// Read the tailnet's own record with the stored token
pub fn run_test_auth(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let info = client
        .get_tailnet()
        .map_err(|e| CliError::user(format!("Authentication test failed: {}. {}", e, REAUTH_HINT)))?;

    let name = info.name.as_deref().unwrap_or(client.tailnet());
    println!("{} Connected to tailnet {}", "OK".green().bold(), name.green());
    if let Some(created) = &info.created {
        println!("  {:<14} {}", "Created:".dimmed(), created);
    }
    if let Some(enforced) = info.acls_enforced {
        println!("  {:<14} {}", "ACLs enforced:".dimmed(), yes_no(enforced));
    }
    println!("Authentication is working correctly");
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

/// Clear stored credentials
pub fn run_logout(ctx: &Context) -> Result<()> {
    if ctx.store().clear()? {
        println!("{} Logged out and cleared stored credentials", "OK".green().bold());
    } else {
        println!("{}", "No stored authentication found.".yellow());
    }
    Ok(())
}

/// Time left until `at`, or `None` once it has passed
fn remaining(at: DateTime<Utc>, now: DateTime<Utc>) -> Option<String> {
    let left = at.signed_duration_since(now);
    if left.num_seconds() <= 0 {
        return None;
    }
    let hours = left.num_hours();
    let minutes = left.num_minutes() % 60;
    Some(format!("in {}h {}m", hours, minutes))
}
