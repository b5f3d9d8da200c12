use std::sync::Arc;

use chrono::Utc;
use provision_core::ProvisioningStep;
use uuid::Uuid;

use crate::executor::events::{Event, EventSink};
use crate::executor::failure::classify_failure;
use crate::executor::process::StepExecutor;
use crate::executor::result::ExecutionError;
use crate::executor::state::RunState;
use crate::executor::types::{FailedStep, RunOutcome, RunStatus};

/// Runs steps strictly in order and stops at the first one that does not succeed.
///
/// Nothing is retried, skipped, or rolled back.
pub struct FailFastController {
    executor: Arc<dyn StepExecutor>,
    event_sink: Arc<dyn EventSink>,
}

impl FailFastController {
    pub fn new(executor: Arc<dyn StepExecutor>, event_sink: Arc<dyn EventSink>) -> Self {
        Self {
            executor,
            event_sink,
        }
    }

    pub async fn execute(&self, steps: &[ProvisioningStep]) -> Result<RunOutcome, ExecutionError> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let step_count = steps.len();

        self.event_sink
            .emit(Event::RunStarted { run_id, step_count })
            .await;

        let mut state = RunState::Pending;
        let mut results = Vec::with_capacity(step_count);
        let mut failed = None;

        if steps.is_empty() {
            state = state.transition(RunState::Completed, step_count)?;
        }

        for (index, step) in steps.iter().enumerate() {
            state = state.transition(RunState::Running(index), step_count)?;
            self.event_sink
                .emit(Event::StepStarted {
                    run_id,
                    index,
                    step_id: step.id.clone(),
                    kind: step.kind,
                })
                .await;

            let result = self.executor.run(index, step).await;

            if result.succeeded {
                self.event_sink
                    .emit(Event::StepSucceeded {
                        run_id,
                        index,
                        step_id: step.id.clone(),
                        duration_ms: result.duration_ms,
                    })
                    .await;
                results.push(result);
                if index + 1 == step_count {
                    state = state.transition(RunState::Completed, step_count)?;
                }
                continue;
            }

            let failure = classify_failure(step.kind, result.exit_code);
            self.event_sink
                .emit(Event::StepFailed {
                    run_id,
                    index,
                    step_id: step.id.clone(),
                    exit_code: result.exit_code,
                    expected_exit_code: step.expected_exit_code,
                    failure,
                })
                .await;
            failed = Some(FailedStep {
                index,
                step_id: step.id.clone(),
                exit_code: result.exit_code,
                failure,
            });
            results.push(result);
            state = state.transition(RunState::Failed(index), step_count)?;
            break;
        }

        let status = match state {
            RunState::Completed => RunStatus::Completed,
            _ => RunStatus::Failed,
        };
        self.event_sink
            .emit(Event::RunFinished { run_id, status })
            .await;

        Ok(RunOutcome {
            run_id,
            status,
            started_at,
            finished_at: Utc::now(),
            results,
            failed,
        })
    }
}
