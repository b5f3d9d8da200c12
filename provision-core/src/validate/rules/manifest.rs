use std::collections::HashSet;

use crate::types::Manifest;
use crate::validate::rules::step;
use crate::validate::validator::{Validator, ID_RE};

pub(crate) fn validate_manifest(v: &mut Validator, manifest: &Manifest) {
    v.validate_extensions("$", &manifest.extensions);
    v.validate_manifest_version("$.version", &manifest.version);

    if manifest.name.trim().is_empty() {
        v.push("$.name", "must not be empty");
    }

    let mut step_ids = HashSet::<&str>::new();
    for (idx, s) in manifest.steps.iter().enumerate() {
        let path = format!("$.steps[{idx}]");
        v.validate_extensions(&path, &s.extensions);

        if !ID_RE.is_match(&s.id) {
            v.push(format!("{path}.id"), "must match regex [A-Za-z0-9_\\-]+");
        }
        if !step_ids.insert(s.id.as_str()) {
            v.push(format!("{path}.id"), "must be unique");
        }

        step::validate_step(v, s, &path);
    }
}
