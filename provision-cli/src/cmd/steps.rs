use serde::Serialize;

use crate::cmd::source::load_manifest;
use crate::exit_codes;
use crate::output::{print_json, OutputFormat};
use crate::{ManifestArgs, OutputArgs};

#[derive(Serialize)]
struct StepInfo {
    id: String,
    kind: String,
    command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

#[derive(Serialize)]
struct StepsResult {
    name: String,
    steps: Vec<StepInfo>,
}

pub fn steps_cmd(manifest: ManifestArgs, output: OutputArgs) -> i32 {
    let loaded = match load_manifest(&manifest, &output) {
        Ok(l) => l,
        Err(code) => return code,
    };

    let steps: Vec<StepInfo> = loaded
        .manifest
        .steps
        .iter()
        .map(|s| StepInfo {
            id: s.id.clone(),
            kind: s.kind.as_str().to_string(),
            command: s.command.clone(),
            description: s.description.clone(),
        })
        .collect();

    let result = StepsResult {
        name: loaded.manifest.name.clone(),
        steps,
    };

    if output.format == OutputFormat::Text && !output.quiet {
        println!("Steps in {} ({}):", result.name, loaded.origin);
        for (i, s) in result.steps.iter().enumerate() {
            println!("  {}. {} [{}] {}", i + 1, s.id, s.kind, s.command);
            if let Some(d) = &s.description {
                println!("     {d}");
            }
        }
    } else {
        print_json(output.quiet, &result);
    }

    exit_codes::SUCCESS
}
