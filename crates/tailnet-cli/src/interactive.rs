//! Terminal preview and confirmation for mutating tag commands
//!
//! Uses dialoguer for the yes/no prompt.

use colored::Colorize;
use dialoguer::Confirm;
use tailnet_core::{ChangePlan, Reviewer};

use crate::error::Result;
use crate::output::{Table, join_tags};

/// Ask a yes/no question, defaulting to no
pub fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

/// Reviewer that prints the plan and prompts on the terminal
#[derive(Debug, Default)]
pub struct TerminalReviewer;

impl TerminalReviewer {
    pub fn new() -> Self {
        Self
    }
}

impl Reviewer for TerminalReviewer {
    fn preview(&mut self, plan: &ChangePlan) {
        for line in preview_lines(plan) {
            println!("{}", line);
        }
        for failure in &plan.failures {
            println!(
                "  {} {}: {}",
                "!".yellow().bold(),
                failure.device_id,
                failure.reason
            );
        }
        if plan.is_empty() {
            println!("{}", "No devices would be affected by this operation.".yellow());
        } else {
            println!("{} devices would be affected.", plan.affected().to_string().bold());
            if let Some(note) = noop_note(plan) {
                println!("{}", note.dimmed());
            }
        }
    }

    fn confirm(&mut self, _plan: &ChangePlan) -> tailnet_core::Result<bool> {
        confirm("Do you want to apply these changes?")
            .map_err(|e| tailnet_core::Error::interaction(e.to_string()))
    }
}

/// Note on affected devices that already have the target tags
fn noop_note(plan: &ChangePlan) -> Option<String> {
    let already = plan.affected() - plan.changed();
    (already > 0).then(|| format!("{} of them already have these tags.", already))
}

/// Change table for a plan, empty when nothing is affected
pub fn preview_lines(plan: &ChangePlan) -> Vec<String> {
    if plan.is_empty() {
        return Vec::new();
    }

    let mut table = Table::new(["Device Name", "Device ID", "Old Tags", "New Tags"]);
    for record in &plan.records {
        table.add_row([
            record.device.name.clone(),
            record.device.id.clone(),
            join_tags(&record.old_tags),
            join_tags(&record.new_tags),
        ]);
    }
    table.render_lines()
}
