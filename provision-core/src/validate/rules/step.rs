use crate::types::ProvisioningStep;
use crate::validate::validator::{Validator, ENV_KEY_RE};

pub(crate) fn validate_step(v: &mut Validator, step: &ProvisioningStep, path: &str) {
    let command_path = format!("{path}.command");
    if step.command.trim().is_empty() {
        v.push(command_path, "must not be empty");
    } else if step.command.chars().any(char::is_whitespace) {
        v.push(
            command_path,
            "must be a single executable name or path; pass arguments via args",
        );
    } else if step.command.contains('\0') {
        v.push(command_path, "must not contain NUL bytes");
    }

    for (idx, arg) in step.args.iter().enumerate() {
        if arg.contains('\0') {
            v.push(format!("{path}.args[{idx}]"), "must not contain NUL bytes");
        }
    }

    for (key, value) in &step.env {
        let env_path = format!("{path}.env.{key}");
        if !ENV_KEY_RE.is_match(key) {
            v.push(&env_path, "must match regex [A-Za-z_][A-Za-z0-9_]*");
        }
        if value.contains('\0') {
            v.push(env_path, "must not contain NUL bytes");
        }
    }

    if !(0..=255).contains(&step.expected_exit_code) {
        v.push(
            format!("{path}.expectedExitCode"),
            "must be between 0 and 255",
        );
    }

    if let Some(description) = &step.description {
        if description.trim().is_empty() {
            v.push(format!("{path}.description"), "must not be blank when present");
        }
    }
}
