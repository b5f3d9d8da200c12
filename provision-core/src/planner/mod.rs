mod format;
mod model;

use crate::error::ParseError;
use crate::parser::{parse_manifest_str, ManifestFormat};
use crate::types::Manifest;
use crate::validate::validate_manifest;

pub use format::render_command_line;
pub use model::{Plan, PlanStep, PlanSummary, PlanningOutcome, ValidationSummary};

pub fn plan_from_str(input: &str, format: ManifestFormat) -> Result<PlanningOutcome, PlannerError> {
    let parsed = parse_manifest_str(input, format)?;
    Ok(plan_manifest(&parsed.manifest))
}

/// Validates the manifest and, when valid, lays out the exact command lines a run would execute.
pub fn plan_manifest(manifest: &Manifest) -> PlanningOutcome {
    let mut validation = match validate_manifest(manifest) {
        Ok(()) => ValidationSummary::valid(),
        Err(e) => ValidationSummary::invalid_from(e),
    };

    if !validation.is_valid {
        return PlanningOutcome {
            validation,
            plan: None,
        };
    }

    if manifest.steps.is_empty() {
        validation
            .warnings
            .push("$.steps: manifest has no steps; a run completes immediately".to_string());
    }

    PlanningOutcome {
        validation,
        plan: Some(build_plan(manifest)),
    }
}

fn build_plan(manifest: &Manifest) -> Plan {
    let steps = manifest
        .steps
        .iter()
        .enumerate()
        .map(|(index, s)| PlanStep {
            index,
            step_id: s.id.clone(),
            kind: s.kind,
            description: s.description.clone(),
            command_line: render_command_line(&s.command, &s.args),
            env: s.env.clone(),
            expected_exit_code: s.expected_exit_code,
        })
        .collect::<Vec<_>>();

    Plan {
        summary: PlanSummary {
            name: manifest.name.clone(),
            version: manifest.version.clone(),
            step_count: steps.len(),
        },
        steps,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error(transparent)]
    Parse(#[from] ParseError),
}
