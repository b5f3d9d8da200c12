use serde::Serialize;

use crate::cmd::source::load_manifest;
use crate::exit_codes;
use crate::output::{print_json, OutputFormat};
use crate::utils::find_executable;
use crate::{ManifestArgs, OutputArgs};

#[derive(Serialize)]
struct Check {
    name: String,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Serialize)]
struct DoctorResult {
    manifest: String,
    checks: Vec<Check>,
    all_passed: bool,
}

pub fn doctor_cmd(manifest: ManifestArgs, output: OutputArgs) -> i32 {
    let loaded = match load_manifest(&manifest, &output) {
        Ok(l) => l,
        Err(code) => return code,
    };

    let path_var = std::env::var("PATH").ok();
    let mut checks: Vec<Check> = loaded
        .manifest
        .steps
        .iter()
        .map(|s| check_command(&s.id, &s.command, path_var.as_deref()))
        .collect();
    checks.push(check_privileges());

    let all_passed = checks.iter().all(|c| c.status != "error");
    let result = DoctorResult {
        manifest: loaded.origin,
        checks,
        all_passed,
    };

    if output.format == OutputFormat::Text && !output.quiet {
        println!("Environment checks for {}:", result.manifest);
        for c in &result.checks {
            let icon = match c.status.as_str() {
                "ok" => "✓",
                "warning" => "!",
                _ => "✗",
            };
            print!("  {} {}: {}", icon, c.name, c.status);
            if let Some(msg) = &c.message {
                print!(" - {msg}");
            }
            println!();
        }
        if result.all_passed {
            println!("\nAll checks passed.");
        } else {
            println!("\nSome checks failed.");
        }
    } else {
        print_json(output.quiet, &result);
    }

    if all_passed {
        exit_codes::SUCCESS
    } else {
        exit_codes::RUNTIME_ERROR
    }
}

fn check_command(step_id: &str, command: &str, path_var: Option<&str>) -> Check {
    match find_executable(command, path_var) {
        Some(found) => Check {
            name: step_id.to_string(),
            status: "ok".to_string(),
            message: Some(found.display().to_string()),
        },
        None => Check {
            name: step_id.to_string(),
            status: "error".to_string(),
            message: Some(format!("{command}: command not found")),
        },
    }
}

#[cfg(unix)]
fn check_privileges() -> Check {
    use std::os::unix::fs::MetadataExt;
    // Owner of /proc/self is the effective uid of this process.
    let uid = std::fs::metadata("/proc/self").map(|m| m.uid()).ok();
    match uid {
        Some(0) => Check {
            name: "privileges".to_string(),
            status: "ok".to_string(),
            message: Some("running as root".to_string()),
        },
        Some(uid) => Check {
            name: "privileges".to_string(),
            status: "warning".to_string(),
            message: Some(format!(
                "running as uid {uid}; package steps usually need root"
            )),
        },
        None => Check {
            name: "privileges".to_string(),
            status: "warning".to_string(),
            message: Some("unable to determine effective user".to_string()),
        },
    }
}

#[cfg(not(unix))]
fn check_privileges() -> Check {
    Check {
        name: "privileges".to_string(),
        status: "warning".to_string(),
        message: Some("privilege check is only available on unix".to_string()),
    }
}
