#![forbid(unsafe_code)]

//! Runtime for provisioning manifests.
//!
//! Steps run one at a time as child processes; the first failure ends the run.
//! Manifest parsing and validation live in `provision-core`.

pub mod executor;

pub use crate::executor::{
    DryRunExecutor, FailFastController, ProcessExecutor, RunOutcome, RunResult, RunState,
    StdoutMode, StepExecutor,
};
