use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod output;
mod utils;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "provision", version, about = "Fail-fast host provisioning runner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    // Steps run strictly one after another, so a single-threaded runtime is all we need.
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command));
    std::process::exit(exit_code);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run_command(command: Command) -> i32 {
    match command {
        Command::Run {
            manifest,
            dry_run,
            events,
            output,
        } => cmd::run::run_cmd(manifest, dry_run, events, output).await,
        Command::Validate { manifest, output } => cmd::validate::validate_cmd(manifest, output),
        Command::Plan { manifest, output } => cmd::plan::plan_cmd(manifest, output),
        Command::Steps { manifest, output } => cmd::steps::steps_cmd(manifest, output),
        Command::Manifest { output } => cmd::manifest::manifest_cmd(output),
        Command::Doctor { manifest, output } => cmd::doctor::doctor_cmd(manifest, output),
    }
}
