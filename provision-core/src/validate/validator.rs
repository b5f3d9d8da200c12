use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ValidationError, Violation};
use crate::types::{Extensions, Manifest};

use super::rules;

pub(crate) static ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\-]+$").expect("valid"));
pub(crate) static ENV_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid"));

pub struct Validator {
    violations: Vec<Violation>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.violations))
        }
    }

    pub fn validate_manifest(&mut self, manifest: &Manifest) {
        rules::manifest::validate_manifest(self, manifest);
    }

    pub(crate) fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation::new(path, message));
    }

    pub(crate) fn validate_manifest_version(&mut self, path: &str, version: &str) {
        // Any 1.x manifest shares the same feature set.
        let parts: Vec<&str> = version.split('.').collect();
        if parts.len() < 2 || parts.iter().any(|p| p.parse::<u32>().is_err()) {
            self.push(path, "must be a version string (major.minor[.patch])");
            return;
        }
        if parts[0] != "1" {
            self.push(path, "only manifest version 1.x is currently supported");
        }
    }

    pub(crate) fn validate_extensions(&mut self, path: &str, ext: &Extensions) {
        for key in ext.keys() {
            if !key.starts_with("x-") {
                self.push(
                    format!("{path}.{key}"),
                    "unknown field (only x-* extensions are allowed)",
                );
            }
        }
    }
}
