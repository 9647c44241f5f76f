//! tailnet-admin CLI
//!
//! Inspect a tailnet and manage device tags in bulk.

mod cli;
mod commands;
mod context;
mod error;
mod interactive;
mod output;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tailnet_core::{DeviceFilter, TagRule};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands, TagsAction};
use context::Context;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {}", e)))?;
        tracing::debug!("Verbose mode enabled");
    }

    let Some(command) = cli.command.clone() else {
        println!("{} tailnet administration CLI", "tailnet-admin".green().bold());
        println!();
        println!("Run {} for available commands.", "tailnet-admin --help".cyan());
        return Ok(());
    };

    if let Commands::Completions { shell } = command {
        clap_complete::generate(shell, &mut Cli::command(), "tailnet-admin", &mut std::io::stdout());
        return Ok(());
    }

    let ctx = Context::from_cli(&cli)?;
    execute_command(&ctx, command)
}

fn execute_command(ctx: &Context, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Auth {
            tailnet,
            token,
            expires_in,
        } => commands::run_auth(ctx, &tailnet, &token, expires_in),
        Commands::Status => commands::run_status(ctx),
        Commands::TestAuth => commands::run_test_auth(ctx),
        Commands::Logout => commands::run_logout(ctx),
        Commands::Devices => commands::run_devices(ctx),
        Commands::Keys => commands::run_keys(ctx),
        Commands::Tags { action } => cmd_tags(ctx, action),
        Commands::Completions { .. } => Ok(()),
    }
}

fn cmd_tags(ctx: &Context, action: TagsAction) -> Result<()> {
    match action {
        TagsAction::List => commands::run_tag_list(ctx),
        TagsAction::DeviceTags { name, tag } => {
            commands::run_device_tags(ctx, &DeviceFilter { name, tag })
        }
        TagsAction::Rename { old, new, confirm } => {
            commands::run_rule(ctx, TagRule::rename(old, new), confirm)
        }
        TagsAction::AddIfHas {
            existing,
            new,
            confirm,
        } => commands::run_rule(ctx, TagRule::add_if_has(existing, new), confirm),
        TagsAction::AddIfMissing {
            missing,
            new,
            confirm,
        } => commands::run_rule(ctx, TagRule::add_if_missing(missing, new), confirm),
        TagsAction::Remove { tag, confirm } => {
            commands::run_rule(ctx, TagRule::remove_all(tag), confirm)
        }
        TagsAction::Set { ids, tags, confirm } => {
            let ids = commands::tags::split_ids(&ids);
            if ids.is_empty() {
                return Err(CliError::user("At least one device id is required."));
            }
            commands::run_rule(ctx, TagRule::set_tags(ids, tags), confirm)
        }
    }
}
