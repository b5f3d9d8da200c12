use provision_core::Validate;
use serde::Serialize;

use crate::cmd::source::load_manifest;
use crate::exit_codes;
use crate::output::{print_json, OutputFormat};
use crate::{ManifestArgs, OutputArgs};

#[derive(Serialize)]
struct ValidateResult {
    valid: bool,
    manifest: String,
    format: String,
    step_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

pub fn validate_cmd(manifest: ManifestArgs, output: OutputArgs) -> i32 {
    let loaded = match load_manifest(&manifest, &output) {
        Ok(l) => l,
        Err(code) => return code,
    };

    let errors: Vec<String> = match loaded.manifest.validate() {
        Ok(()) => Vec::new(),
        Err(err) => err
            .violations
            .iter()
            .map(|v| format!("{}: {}", v.path, v.message))
            .collect(),
    };

    let result = ValidateResult {
        valid: errors.is_empty(),
        manifest: loaded.origin,
        format: format!("{:?}", loaded.format),
        step_count: loaded.manifest.steps.len(),
        errors,
    };

    if output.format == OutputFormat::Text && !output.quiet {
        if result.valid {
            println!(
                "ok: valid provisioning manifest ({}, {} steps)",
                result.manifest, result.step_count
            );
        } else {
            eprintln!("error: validation failed");
            for e in &result.errors {
                eprintln!("- {e}");
            }
        }
    } else {
        print_json(output.quiet, &result);
    }

    if result.valid {
        exit_codes::SUCCESS
    } else {
        exit_codes::VALIDATION_FAILED
    }
}
