use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Execute every step in order, stopping at the first failure.
    Run {
        #[command(flatten)]
        manifest: ManifestArgs,
        /// Print what would run without executing anything.
        #[arg(long)]
        dry_run: bool,
        /// Where lifecycle events go. With `stdout`, stdout becomes a JSON-lines stream:
        /// every line is an object with a `type` field, the `--format json` result is the
        /// final `run.result` line, and text summaries and step output move to stderr.
        #[arg(long, value_enum, default_value_t = EventsMode::Log)]
        events: EventsMode,
        #[command(flatten)]
        output: OutputArgs,
    },
    Validate {
        #[command(flatten)]
        manifest: ManifestArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show the exact command lines a run would execute.
    Plan {
        #[command(flatten)]
        manifest: ManifestArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    Steps {
        #[command(flatten)]
        manifest: ManifestArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the built-in manifest (YAML, or JSON with --format json).
    Manifest {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Check that every step's executable can be found.
    Doctor {
        #[command(flatten)]
        manifest: ManifestArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}
