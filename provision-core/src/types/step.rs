use std::collections::BTreeMap;

use super::common::is_zero;
use crate::types::Extensions;

/// What a step does to the host. Only used to classify failures; execution is identical for all kinds.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    KeyRegistration,
    SourceList,
    PackageIndex,
    PackageInstall,
    PackageCleanup,
    RemoteFetch,
    Bootstrap,
    #[default]
    Command,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::KeyRegistration => "key-registration",
            StepKind::SourceList => "source-list",
            StepKind::PackageIndex => "package-index",
            StepKind::PackageInstall => "package-install",
            StepKind::PackageCleanup => "package-cleanup",
            StepKind::RemoteFetch => "remote-fetch",
            StepKind::Bootstrap => "bootstrap",
            StepKind::Command => "command",
        }
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One external-command invocation that changes host state.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProvisioningStep {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub kind: StepKind,

    /// Executable name (looked up on `PATH`) or path.
    pub command: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// Extra environment for the child process only.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    #[serde(default, rename = "expectedExitCode", skip_serializing_if = "is_zero")]
    pub expected_exit_code: i32,

    #[serde(flatten, default)]
    pub extensions: Extensions,
}

impl ProvisioningStep {
    pub fn new<I, S>(id: impl Into<String>, command: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            description: None,
            kind: StepKind::default(),
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
            env: BTreeMap::new(),
            expected_exit_code: 0,
            extensions: Extensions::new(),
        }
    }

    pub fn with_kind(mut self, kind: StepKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_expected_exit_code(mut self, code: i32) -> Self {
        self.expected_exit_code = code;
        self
    }

    /// Only an exact match counts; any other value is a failure regardless of magnitude.
    pub fn accepts_exit_code(&self, code: i32) -> bool {
        code == self.expected_exit_code
    }
}
