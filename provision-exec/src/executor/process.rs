use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::Instant;

use async_trait::async_trait;
use provision_core::{render_command_line, ProvisioningStep};

use crate::executor::types::RunResult;

/// Shell convention for "command not found".
pub const COMMAND_NOT_FOUND: i32 = 127;
/// Shell convention for "found but could not be executed".
pub const COMMAND_NOT_EXECUTABLE: i32 = 126;

/// Runs one step against the host and reports its exit status.
///
/// Implementations block (asynchronously) until the step has finished; there is no timeout.
#[async_trait]
pub trait StepExecutor: Send + Sync {
    async fn run(&self, index: usize, step: &ProvisioningStep) -> RunResult;
}

/// Where a child's stdout goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StdoutMode {
    /// Share the runner's stdout.
    #[default]
    Inherit,
    /// Send it to the runner's stderr, keeping stdout free for machine-readable output.
    Stderr,
}

/// Spawns each step as a child process; stdin and stderr are inherited.
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor {
    stdout: StdoutMode,
}

impl ProcessExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stdout(mut self, stdout: StdoutMode) -> Self {
        self.stdout = stdout;
        self
    }

    pub fn stdout_mode(&self) -> StdoutMode {
        self.stdout
    }

    fn child_stdout(&self) -> io::Result<Stdio> {
        match self.stdout {
            StdoutMode::Inherit => Ok(Stdio::inherit()),
            StdoutMode::Stderr => stderr_as_stdio(),
        }
    }
}

#[cfg(unix)]
fn stderr_as_stdio() -> io::Result<Stdio> {
    use std::os::fd::AsFd;
    Ok(Stdio::from(io::stderr().as_fd().try_clone_to_owned()?))
}

#[cfg(windows)]
fn stderr_as_stdio() -> io::Result<Stdio> {
    use std::os::windows::io::AsHandle;
    Ok(Stdio::from(io::stderr().as_handle().try_clone_to_owned()?))
}

#[cfg(not(any(unix, windows)))]
fn stderr_as_stdio() -> io::Result<Stdio> {
    Ok(Stdio::inherit())
}

#[async_trait]
impl StepExecutor for ProcessExecutor {
    async fn run(&self, index: usize, step: &ProvisioningStep) -> RunResult {
        tracing::debug!(
            step_id = %step.id,
            command = %render_command_line(&step.command, &step.args),
            "spawning step"
        );

        let started = Instant::now();
        let status = match self.child_stdout() {
            Ok(stdout) => {
                tokio::process::Command::new(&step.command)
                    .args(&step.args)
                    .envs(&step.env)
                    .stdin(Stdio::inherit())
                    .stdout(stdout)
                    .stderr(Stdio::inherit())
                    .status()
                    .await
            }
            Err(e) => Err(e),
        };

        let exit_code = match status {
            Ok(status) => exit_code_from_status(status),
            Err(e) => {
                let code = exit_code_from_spawn_error(&e);
                tracing::error!(
                    step_id = %step.id,
                    command = %step.command,
                    error = %e,
                    exit_code = code,
                    "failed to spawn step"
                );
                code
            }
        };

        RunResult {
            step_index: index,
            step_id: step.id.clone(),
            exit_code,
            succeeded: step.accepts_exit_code(exit_code),
            duration_ms: started.elapsed().as_millis() as u64,
        }
    }
}

pub fn exit_code_from_spawn_error(err: &io::Error) -> i32 {
    match err.kind() {
        io::ErrorKind::NotFound => COMMAND_NOT_FOUND,
        _ => COMMAND_NOT_EXECUTABLE,
    }
}

fn exit_code_from_status(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

/// Logs each step and reports it as succeeded without touching the host.
#[derive(Debug, Clone, Default)]
pub struct DryRunExecutor;

#[async_trait]
impl StepExecutor for DryRunExecutor {
    async fn run(&self, index: usize, step: &ProvisioningStep) -> RunResult {
        tracing::info!(
            step_id = %step.id,
            command = %render_command_line(&step.command, &step.args),
            "dry run: not executing"
        );
        RunResult {
            step_index: index,
            step_id: step.id.clone(),
            exit_code: step.expected_exit_code,
            succeeded: true,
            duration_ms: 0,
        }
    }
}
