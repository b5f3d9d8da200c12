use crate::executor::state::RunState;

#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("invalid run state transition from {from} to {to}")]
    InvalidTransition { from: RunState, to: RunState },
}
