use std::fmt;

use crate::executor::result::ExecutionError;

/// Lifecycle of a single run. `Failed` and `Completed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Pending,
    Running(usize),
    Failed(usize),
    Completed,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Failed(_) | RunState::Completed)
    }

    /// Moves to `next` if the edge exists for a run of `step_count` steps.
    pub fn transition(self, next: RunState, step_count: usize) -> Result<RunState, ExecutionError> {
        let allowed = match (self, next) {
            (RunState::Pending, RunState::Running(0)) => step_count > 0,
            (RunState::Pending, RunState::Completed) => step_count == 0,
            (RunState::Running(i), RunState::Running(j)) => j == i + 1 && j < step_count,
            (RunState::Running(i), RunState::Completed) => i + 1 == step_count,
            (RunState::Running(i), RunState::Failed(j)) => i == j,
            _ => false,
        };
        if allowed {
            Ok(next)
        } else {
            Err(ExecutionError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Pending => f.write_str("pending"),
            RunState::Running(i) => write!(f, "running({i})"),
            RunState::Failed(i) => write!(f, "failed({i})"),
            RunState::Completed => f.write_str("completed"),
        }
    }
}
