//! Batch driving: one planning operation per compilation unit.
//!
//! The runner visits units in submission order, giving each operation a
//! private warning sink and propagating one shared cancel token. A set
//! token observed between units stops the batch with the remaining
//! units unprocessed; a cancellation inside a unit records that unit's
//! outcome as cancelled. Nothing is merged across operations.

use tracing::{debug, info};

use logweave_core::context::{CancelToken, OperationContext};
use logweave_core::plan::{EditPlan, PlanError, Planner, RewriteSink};
use logweave_core::settings::SettingsStore;
use logweave_core::warnings::{Warning, WarningSink};

/// Which planning operation the batch runs per unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOperation {
    /// Plan position-policy insertions.
    InsertPositions,
    /// Plan removal of existing log statements.
    RemoveStatements,
}

/// How the batch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    /// Every unit was visited.
    Completed,
    /// The cancel token stopped the batch early.
    Cancelled,
}

/// Result of one unit's operation, with its private warnings.
#[derive(Debug)]
pub struct UnitOutcome {
    /// Identifier of the unit.
    pub resource: String,
    /// The produced plan, or why there is none.
    pub result: Result<EditPlan, PlanError>,
    /// Warnings collected by this operation alone.
    pub warnings: Vec<Warning>,
}

/// Outcome of a whole batch.
#[derive(Debug)]
pub struct BatchResult {
    /// Per-unit outcomes, in submission order, for the units that ran.
    pub outcomes: Vec<UnitOutcome>,
    /// Whether the batch completed or was cancelled.
    pub status: BatchStatus,
    /// Units never visited because of cancellation.
    pub remaining: usize,
}

impl BatchResult {
    /// Returns true when the batch was stopped by cancellation.
    #[must_use]
    pub fn cancelled(&self) -> bool {
        self.status == BatchStatus::Cancelled
    }
}

/// Drives one planning operation over many units.
pub struct BatchRunner<'a> {
    planner: Planner<'a>,
    settings: &'a dyn SettingsStore,
    operation: BatchOperation,
    cancel: CancelToken,
}

impl<'a> BatchRunner<'a> {
    /// Creates a runner planning insertions with a fresh cancel token.
    #[must_use]
    pub fn new(planner: Planner<'a>, settings: &'a dyn SettingsStore) -> Self {
        Self {
            planner,
            settings,
            operation: BatchOperation::InsertPositions,
            cancel: CancelToken::new(),
        }
    }

    /// Selects the operation run per unit.
    #[must_use]
    pub fn with_operation(mut self, operation: BatchOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Shares an external cancel token with the batch.
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// The token observed between units and inside each operation.
    #[must_use]
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Runs the batch, planning only.
    #[must_use]
    pub fn run(&self, units: Vec<OperationContext>) -> BatchResult {
        self.drive(units, None)
    }

    /// Runs the batch and feeds each produced plan to `applier`.
    ///
    /// Per-edit failures reported by the applier become warnings on that
    /// unit's outcome; they do not stop the batch.
    #[must_use]
    pub fn run_with_applier(
        &self,
        units: Vec<OperationContext>,
        applier: &mut dyn RewriteSink,
    ) -> BatchResult {
        self.drive(units, Some(applier))
    }

    fn drive(
        &self,
        units: Vec<OperationContext>,
        mut applier: Option<&mut dyn RewriteSink>,
    ) -> BatchResult {
        let total = units.len();
        info!(units = total, operation = ?self.operation, "batch starting");
        let mut outcomes = Vec::with_capacity(total);

        for (index, ctx) in units.into_iter().enumerate() {
            if self.cancel.is_cancelled() {
                let remaining = total - index;
                info!(remaining, "batch cancelled between units");
                return BatchResult {
                    outcomes,
                    status: BatchStatus::Cancelled,
                    remaining,
                };
            }

            let ctx = ctx.with_cancel(self.cancel.clone());
            let resource = ctx.resource().to_string();
            debug!(resource = %resource, "batch unit starting");
            let mut sink = WarningSink::new();

            let result = match self.operation {
                BatchOperation::InsertPositions => {
                    self.planner.plan_insertions(&ctx, self.settings, &mut sink)
                }
                BatchOperation::RemoveStatements => {
                    self.planner.plan_removals(&ctx, self.settings, &mut sink)
                }
            };
            let result = match result {
                Err(PlanError::MalformedUnit { resource: unit }) => {
                    sink.push_for("unit skipped: no method with a body", &unit);
                    Ok(EditPlan::default())
                }
                Err(PlanError::Cancelled) => {
                    outcomes.push(UnitOutcome {
                        resource,
                        result: Err(PlanError::Cancelled),
                        warnings: sink.take(),
                    });
                    let remaining = total - index - 1;
                    info!(remaining, "batch cancelled during a unit");
                    return BatchResult {
                        outcomes,
                        status: BatchStatus::Cancelled,
                        remaining,
                    };
                }
                other => other,
            };

            if let Some(applier) = applier.as_mut() {
                if let Ok(plan) = &result {
                    if !plan.is_empty() {
                        for failure in applier
                            .apply(&resource, plan)
                            .into_iter()
                            .filter_map(Result::err)
                        {
                            sink.push_for(&failure.to_string(), &resource);
                        }
                    }
                }
            }

            outcomes.push(UnitOutcome {
                resource,
                result,
                warnings: sink.take(),
            });
        }

        info!(completed = outcomes.len(), "batch finished");
        BatchResult {
            outcomes,
            status: BatchStatus::Completed,
            remaining: 0,
        }
    }
}
