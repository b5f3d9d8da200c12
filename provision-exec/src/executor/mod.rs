mod controller;
pub mod events;
pub mod failure;
mod process;
mod result;
pub mod state;
mod types;

pub use controller::FailFastController;
pub use events::{
    CompositeEventSink, Event, EventSink, NoOpEventSink, StdoutEventSink, TracingEventSink,
};
pub use failure::{classify_failure, FailureKind};
pub use process::{
    exit_code_from_spawn_error, DryRunExecutor, ProcessExecutor, StepExecutor,
    StdoutMode, COMMAND_NOT_EXECUTABLE, COMMAND_NOT_FOUND,
};
pub use result::ExecutionError;
pub use state::RunState;
pub use types::{FailedStep, RunOutcome, RunResult, RunStatus};
