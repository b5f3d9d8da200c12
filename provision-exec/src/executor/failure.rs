use provision_core::StepKind;
use serde::Serialize;

/// apt-get exits with 100 when it cannot resolve a package or pinned version.
const APT_RESOLUTION_EXIT_CODE: i32 = 100;

/// Descriptive classification of a failed step. Every kind stops the run the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    KeyRegistrationFailure,
    PackageResolutionFailure,
    InstallFailure,
    RemoteFetchFailure,
    BootstrapFailure,
    CommandFailure,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::KeyRegistrationFailure => "key registration failed",
            FailureKind::PackageResolutionFailure => "package resolution failed",
            FailureKind::InstallFailure => "install failed",
            FailureKind::RemoteFetchFailure => "remote fetch failed",
            FailureKind::BootstrapFailure => "bootstrap failed",
            FailureKind::CommandFailure => "command failed",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn classify_failure(kind: StepKind, exit_code: i32) -> FailureKind {
    match kind {
        StepKind::KeyRegistration => FailureKind::KeyRegistrationFailure,
        StepKind::PackageIndex => FailureKind::PackageResolutionFailure,
        StepKind::PackageInstall if exit_code == APT_RESOLUTION_EXIT_CODE => {
            FailureKind::PackageResolutionFailure
        }
        StepKind::PackageInstall | StepKind::PackageCleanup | StepKind::SourceList => {
            FailureKind::InstallFailure
        }
        StepKind::RemoteFetch => FailureKind::RemoteFetchFailure,
        StepKind::Bootstrap => FailureKind::BootstrapFailure,
        StepKind::Command => FailureKind::CommandFailure,
    }
}
