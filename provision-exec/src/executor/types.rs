use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::executor::failure::FailureKind;

/// What the executor observed for one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunResult {
    pub step_index: usize,
    pub step_id: String,
    pub exit_code: i32,
    pub succeeded: bool,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Completed,
    Failed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedStep {
    pub index: usize,
    pub step_id: String,
    pub exit_code: i32,
    pub failure: FailureKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub run_id: Uuid,
    pub status: RunStatus,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// One entry per step that was actually invoked, in invocation order.
    pub results: Vec<RunResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed: Option<FailedStep>,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Completed
    }

    pub fn steps_succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.succeeded).count()
    }

    /// Process exit status for the whole run: 0 on success, otherwise the failing step's code.
    ///
    /// A failing code that cannot be a non-zero process status (0, negative, or above 255)
    /// is reported as 1 so a failed run never looks successful.
    pub fn exit_code(&self) -> i32 {
        match &self.failed {
            None => 0,
            Some(f) if (1..=255).contains(&f.exit_code) => f.exit_code,
            Some(_) => 1,
        }
    }
}
