//! TagEngine implementation
//!
//! The engine binds a [`TagRule`] to a [`DeviceDirectory`]. Planning reads a
//! fresh snapshot and evaluates the rule without writing anything. Applying
//! evaluates the rule again from its own fresh snapshot and then writes each
//! affected device, one call at a time.

use tracing::{debug, info, warn};

use crate::change::{ApplyReport, ChangePlan, ChangeRecord, DeviceFailure, DeviceOutcome};
use crate::directory::DeviceDirectory;
use crate::rules::TagRule;
use crate::{Error, Result};

/// Per-device evaluation result, kept in evaluation order
type Evaluated = std::result::Result<ChangeRecord, DeviceFailure>;

/// What a rule invocation produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// `dry_run = true`: records only, nothing written
    Planned(ChangePlan),
    /// `dry_run = false`: records plus the outcome of every write
    Applied(ApplyReport),
}

/// Engine for evaluating and applying tag rules
pub struct TagEngine<'a, D: ?Sized> {
    directory: &'a D,
}

impl<'a, D: DeviceDirectory + ?Sized> TagEngine<'a, D> {
    /// Create an engine over the given directory
    pub fn new(directory: &'a D) -> Self {
        Self { directory }
    }

    /// Invoke a rule
    ///
    /// # Errors
    ///
    /// Returns an error if the directory snapshot cannot be fetched.
    pub fn invoke(&self, rule: &TagRule, dry_run: bool) -> Result<Invocation> {
        if dry_run {
            self.plan(rule).map(Invocation::Planned)
        } else {
            self.apply(rule).map(Invocation::Applied)
        }
    }

    /// Compute the change records for a rule without writing anything
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read. Ids that `SetTags`
    /// finds missing are reported in [`ChangePlan::failures`] instead.
    pub fn plan(&self, rule: &TagRule) -> Result<ChangePlan> {
        let mut plan = ChangePlan::new(rule.clone(), Vec::new());
        for item in self.evaluate(rule)? {
            match item {
                Ok(record) => plan.records.push(record),
                Err(failure) => plan.failures.push(failure),
            }
        }
        debug!(
            rule = %rule,
            affected = plan.affected(),
            unresolved = plan.failures.len(),
            "Planned tag changes"
        );
        Ok(plan)
    }

    /// Evaluate a rule and write the new tags of every affected device
    ///
    /// Writes are issued sequentially in evaluation order. A failed write is
    /// recorded and the remaining devices are still processed; earlier writes
    /// are not rolled back.
    ///
    /// # Errors
    ///
    /// Returns an error only if the directory cannot be read.
    pub fn apply(&self, rule: &TagRule) -> Result<ApplyReport> {
        let mut report = ApplyReport::new(rule.clone());

        for item in self.evaluate(rule)? {
            let record = match item {
                Ok(record) => record,
                Err(failure) => {
                    warn!(device = %failure.device_id, reason = %failure.reason, "Skipping unresolved device");
                    report.outcomes.push(DeviceOutcome::Failed(failure));
                    continue;
                }
            };

            if record.is_noop() && !rule.writes_unchanged() {
                debug!(device = %record.device.id, "Tags already in place");
                report.outcomes.push(DeviceOutcome::Unchanged(record));
                continue;
            }

            match self
                .directory
                .update_device_tags(&record.device.id, &record.new_tags)
            {
                Ok(()) => {
                    info!(
                        device = %record.device.id,
                        tags = ?record.new_tags,
                        "Updated device tags"
                    );
                    report.outcomes.push(DeviceOutcome::Applied(record));
                }
                Err(e) => {
                    warn!(device = %record.device.id, error = %e, "Failed to update device tags");
                    report
                        .outcomes
                        .push(DeviceOutcome::Failed(DeviceFailure::for_device(
                            &record.device,
                            e.to_string(),
                        )));
                }
            }
        }

        Ok(report)
    }

    /// Evaluate a rule against a fresh read of the directory
    fn evaluate(&self, rule: &TagRule) -> Result<Vec<Evaluated>> {
        match rule {
            TagRule::SetTags { device_ids, .. } => {
                let mut evaluated = Vec::with_capacity(device_ids.len());
                for id in device_ids {
                    match self.directory.get_device(id) {
                        Ok(device) => {
                            let new_tags = rule.rewrite(&device.tags);
                            evaluated.push(Ok(ChangeRecord::new(device, new_tags)));
                        }
                        // only an unknown id is per-device; auth and transport
                        // failures abort the command
                        Err(e @ Error::DeviceNotFound { .. }) => {
                            evaluated.push(Err(DeviceFailure::new(id.clone(), e.to_string())));
                        }
                        Err(e) => return Err(e),
                    }
                }
                Ok(evaluated)
            }
            _ => {
                let devices = self.directory.fetch_all_devices()?;
                debug!(count = devices.len(), "Fetched device snapshot");
                Ok(rule.evaluate(&devices).into_iter().map(Ok).collect())
            }
        }
    }
}
