//! The step list the runner uses when no manifest is given.

use crate::error::ParseError;
use crate::parser::{parse_manifest_str, ManifestFormat};
use crate::types::Manifest;

pub const BUILTIN_MANIFEST_YAML: &str = include_str!("ros_noetic.yaml");

pub fn builtin_manifest() -> Result<Manifest, ParseError> {
    Ok(parse_manifest_str(BUILTIN_MANIFEST_YAML, ManifestFormat::Yaml)?.manifest)
}
