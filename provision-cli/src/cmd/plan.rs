use provision_core::plan_manifest;

use crate::cmd::source::load_manifest;
use crate::exit_codes;
use crate::output::{print_error, print_json, OutputFormat};
use crate::{ManifestArgs, OutputArgs};

pub fn plan_cmd(manifest: ManifestArgs, output: OutputArgs) -> i32 {
    let loaded = match load_manifest(&manifest, &output) {
        Ok(l) => l,
        Err(code) => return code,
    };

    let outcome = plan_manifest(&loaded.manifest);

    if output.format == OutputFormat::Json {
        print_json(output.quiet, &outcome);
    } else if !output.quiet {
        match &outcome.plan {
            Some(plan) => print!("{}", plan.to_text()),
            None => {
                print_error(output.format, output.quiet, "validation failed");
                for e in &outcome.validation.errors {
                    eprintln!("- {e}");
                }
            }
        }
        for w in &outcome.validation.warnings {
            eprintln!("warning: {w}");
        }
    }

    if outcome.validation.is_valid {
        exit_codes::SUCCESS
    } else {
        exit_codes::VALIDATION_FAILED
    }
}
