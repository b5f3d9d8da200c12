use std::path::{Path, PathBuf};

use crate::error::{LoadError, ParseError};
use crate::types::Manifest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Json,
    Yaml,
    Auto,
}

#[derive(Debug, Clone)]
pub struct ParsedManifest {
    pub manifest: Manifest,
    pub format: ManifestFormat,
}

/// A manifest read from disk, with the raw text kept for digests.
#[derive(Debug, Clone)]
pub struct ManifestFile {
    pub path: PathBuf,
    pub parsed: ParsedManifest,
    pub content: String,
}

pub fn load_manifest_file(path: impl AsRef<Path>) -> Result<ManifestFile, LoadError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = parse_manifest_str(&content, ManifestFormat::Auto).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ManifestFile {
        path: path.to_path_buf(),
        parsed,
        content,
    })
}

pub fn parse_manifest_str(input: &str, format: ManifestFormat) -> Result<ParsedManifest, ParseError> {
    match format {
        ManifestFormat::Json => Ok(ParsedManifest {
            manifest: serde_json::from_str::<Manifest>(input)?,
            format,
        }),
        ManifestFormat::Yaml => Ok(ParsedManifest {
            manifest: serde_yaml::from_str::<Manifest>(input)?,
            format,
        }),
        ManifestFormat::Auto => parse_manifest_auto(input),
    }
}

fn parse_manifest_auto(input: &str) -> Result<ParsedManifest, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::UnknownFormat);
    }

    // JSON always starts with `{` after trimming; YAML is a superset, so it is the fallback.
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') {
        return match serde_json::from_str::<Manifest>(input) {
            Ok(manifest) => Ok(ParsedManifest {
                manifest,
                format: ManifestFormat::Json,
            }),
            Err(e) => match serde_yaml::from_str::<Manifest>(input) {
                Ok(manifest) => Ok(ParsedManifest {
                    manifest,
                    format: ManifestFormat::Yaml,
                }),
                Err(_) => Err(ParseError::Json(e)),
            },
        };
    }

    match serde_yaml::from_str::<Manifest>(input) {
        Ok(manifest) => Ok(ParsedManifest {
            manifest,
            format: ManifestFormat::Yaml,
        }),
        Err(e) => {
            if let Ok(manifest) = serde_json::from_str::<Manifest>(input) {
                return Ok(ParsedManifest {
                    manifest,
                    format: ManifestFormat::Json,
                });
            }
            Err(ParseError::Yaml(e))
        }
    }
}
