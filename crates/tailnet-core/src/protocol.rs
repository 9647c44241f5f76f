//! Plan, preview, confirm, apply
//!
//! Every mutating command runs through [`ConfirmationProtocol::run`]. The rule
//! is first invoked as a dry run, the resulting plan is shown to the operator,
//! and only then, if there is something to do and the operator agrees, is the
//! rule invoked again for real.

use tracing::debug;

use crate::change::{ApplyReport, ChangePlan};
use crate::directory::DeviceDirectory;
use crate::engine::TagEngine;
use crate::rules::TagRule;
use crate::Result;

/// Flags shared by every mutating command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProtocolOptions {
    /// Stop after the preview
    pub dry_run: bool,
    /// Skip the confirmation prompt
    pub assume_yes: bool,
}

/// Presentation and consent, supplied by the caller
pub trait Reviewer {
    /// Show the planned changes
    fn preview(&mut self, plan: &ChangePlan);

    /// Ask the operator whether to apply the plan
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interaction`](crate::Error::Interaction) if the prompt
    /// cannot be shown or answered.
    fn confirm(&mut self, plan: &ChangePlan) -> Result<bool>;
}

/// How a protocol run ended; every variant is a successful termination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The rule selected no devices
    NothingAffected(ChangePlan),
    /// Dry run requested; nothing was written
    DryRun(ChangePlan),
    /// The operator declined; nothing was written
    Cancelled(ChangePlan),
    /// The rule was applied
    Applied {
        plan: ChangePlan,
        report: ApplyReport,
    },
}

impl Outcome {
    /// The plan shown to the operator
    pub fn plan(&self) -> &ChangePlan {
        match self {
            Self::NothingAffected(plan) | Self::DryRun(plan) | Self::Cancelled(plan) => plan,
            Self::Applied { plan, .. } => plan,
        }
    }

    pub fn report(&self) -> Option<&ApplyReport> {
        match self {
            Self::Applied { report, .. } => Some(report),
            _ => None,
        }
    }
}

/// The two-phase execution shared by mutating commands
pub struct ConfirmationProtocol<'a, D: ?Sized> {
    engine: TagEngine<'a, D>,
    options: ProtocolOptions,
}

impl<'a, D: DeviceDirectory + ?Sized> ConfirmationProtocol<'a, D> {
    pub fn new(directory: &'a D, options: ProtocolOptions) -> Self {
        Self {
            engine: TagEngine::new(directory),
            options,
        }
    }

    /// Run the protocol for one rule
    ///
    /// # Errors
    ///
    /// Plan-phase errors are fatal and returned as-is. Apply-phase failures
    /// for single devices are collected in the report instead.
    pub fn run(&self, rule: &TagRule, reviewer: &mut dyn Reviewer) -> Result<Outcome> {
        let plan = self.engine.plan(rule)?;
        reviewer.preview(&plan);

        if plan.is_empty() {
            debug!(rule = %rule, "No devices affected");
            return Ok(Outcome::NothingAffected(plan));
        }

        if self.options.dry_run {
            debug!(rule = %rule, "Dry run, stopping after preview");
            return Ok(Outcome::DryRun(plan));
        }

        if !self.options.assume_yes && !reviewer.confirm(&plan)? {
            debug!(rule = %rule, "Operator declined");
            return Ok(Outcome::Cancelled(plan));
        }

        let report = self.engine.apply(rule)?;
        Ok(Outcome::Applied { plan, report })
    }
}
