use std::path::PathBuf;

use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ManifestArgs {
    /// Manifest file (JSON or YAML). Defaults to the built-in ROS Noetic manifest.
    #[arg(env = "PROVISION_MANIFEST")]
    pub manifest: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EventsMode {
    /// Lifecycle events go to the log (stderr).
    Log,
    /// Lifecycle events are printed to stdout as JSON lines.
    Stdout,
    None,
}
