use std::sync::Arc;

use provision_core::plan_manifest;
use provision_exec::executor::{EventSink, NoOpEventSink, StdoutEventSink, TracingEventSink};
use provision_exec::{
    DryRunExecutor, FailFastController, ProcessExecutor, RunOutcome, StdoutMode, StepExecutor,
};
use serde::Serialize;

use crate::cmd::progress::{CompositeProgressSink, ProgressEventSink};
use crate::cmd::source::load_manifest;
use crate::exit_codes;
use crate::output::{print_error, print_json, OutputFormat};
use crate::{EventsMode, ManifestArgs, OutputArgs};

/// Record type of the final result when it shares stdout with lifecycle events.
const RESULT_RECORD_TYPE: &str = "run.result";

#[derive(Serialize)]
struct RunCmdResult<'a> {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    record_type: Option<&'static str>,
    manifest: String,
    manifest_sha256: String,
    dry_run: bool,
    #[serde(flatten)]
    outcome: &'a RunOutcome,
}

pub async fn run_cmd(
    manifest: ManifestArgs,
    dry_run: bool,
    events: EventsMode,
    output: OutputArgs,
) -> i32 {
    let loaded = match load_manifest(&manifest, &output) {
        Ok(l) => l,
        Err(code) => return code,
    };

    let planned = plan_manifest(&loaded.manifest);
    if !planned.validation.is_valid {
        print_error(output.format, output.quiet, "manifest validation failed");
        if !output.quiet {
            for e in &planned.validation.errors {
                eprintln!("- {e}");
            }
        }
        return exit_codes::VALIDATION_FAILED;
    }
    for w in &planned.validation.warnings {
        tracing::warn!("{w}");
    }

    // Stdout carries JSON in these modes, so child output is moved to stderr.
    let events_on_stdout = events == EventsMode::Stdout;
    let stdout_mode = if output.format == OutputFormat::Json || events_on_stdout {
        StdoutMode::Stderr
    } else {
        StdoutMode::Inherit
    };
    let executor: Arc<dyn StepExecutor> = if dry_run {
        Arc::new(DryRunExecutor)
    } else {
        Arc::new(ProcessExecutor::new().with_stdout(stdout_mode))
    };

    let base_sink: Arc<dyn EventSink> = match events {
        EventsMode::Log => Arc::new(TracingEventSink),
        EventsMode::Stdout => Arc::new(StdoutEventSink),
        EventsMode::None => Arc::new(NoOpEventSink),
    };
    let show_progress = output.format == OutputFormat::Text && !output.quiet && !events_on_stdout;
    let event_sink: Arc<dyn EventSink> = if show_progress {
        Arc::new(CompositeProgressSink::new(
            Arc::new(ProgressEventSink::new(loaded.manifest.steps.len())),
            base_sink,
        ))
    } else {
        base_sink
    };

    tracing::info!(
        manifest = %loaded.origin,
        name = %loaded.manifest.name,
        steps = loaded.manifest.steps.len(),
        dry_run,
        "starting provisioning run"
    );

    let controller = FailFastController::new(executor, event_sink);
    let outcome = match controller.execute(&loaded.manifest.steps).await {
        Ok(o) => o,
        Err(e) => {
            print_error(output.format, output.quiet, &format!("run aborted: {e}"));
            return exit_codes::RUNTIME_ERROR;
        }
    };

    if output.format == OutputFormat::Text {
        if !output.quiet {
            report_text(&outcome, events_on_stdout);
        }
    } else {
        let result = RunCmdResult {
            record_type: events_on_stdout.then_some(RESULT_RECORD_TYPE),
            manifest: loaded.origin,
            manifest_sha256: loaded.digest,
            dry_run,
            outcome: &outcome,
        };
        print_json(output.quiet, &result);
    }

    outcome.exit_code()
}

/// Human summary. Goes to stderr when stdout is reserved for event lines.
fn report_text(outcome: &RunOutcome, to_stderr: bool) {
    match &outcome.failed {
        None => {
            let summary = format!(
                "Run {} completed\n  Steps succeeded: {}",
                outcome.run_id,
                outcome.steps_succeeded()
            );
            if to_stderr {
                eprintln!("{summary}");
            } else {
                println!("{summary}");
            }
        }
        Some(f) => {
            eprintln!(
                "error: step {} ({}) {}: exit status {}",
                f.index + 1,
                f.step_id,
                f.failure,
                f.exit_code
            );
            eprintln!(
                "Run {} failed after {} succeeded steps",
                outcome.run_id,
                outcome.steps_succeeded()
            );
        }
    }
}
