use provision_core::{
    builtin_manifest, load_manifest_file, LoadError, Manifest, ManifestFormat, BUILTIN_MANIFEST_YAML,
};

use crate::exit_codes;
use crate::output::print_error;
use crate::utils::sha256_hex;
use crate::{ManifestArgs, OutputArgs};

pub struct LoadedManifest {
    pub manifest: Manifest,
    /// File path, or `builtin` for the embedded manifest.
    pub origin: String,
    pub format: ManifestFormat,
    pub digest: String,
}

/// Reads and parses the manifest, printing the error and returning the exit code on failure.
pub fn load_manifest(args: &ManifestArgs, output: &OutputArgs) -> Result<LoadedManifest, i32> {
    let Some(path) = &args.manifest else {
        return match builtin_manifest() {
            Ok(manifest) => Ok(LoadedManifest {
                manifest,
                origin: "builtin".to_string(),
                format: ManifestFormat::Yaml,
                digest: sha256_hex(BUILTIN_MANIFEST_YAML),
            }),
            Err(e) => {
                print_error(output.format, output.quiet, &format!("built-in manifest: {e}"));
                Err(exit_codes::RUNTIME_ERROR)
            }
        };
    };

    match load_manifest_file(path) {
        Ok(file) => {
            tracing::debug!(path = %file.path.display(), format = ?file.parsed.format, "loaded manifest");
            Ok(LoadedManifest {
                manifest: file.parsed.manifest,
                origin: file.path.display().to_string(),
                format: file.parsed.format,
                digest: sha256_hex(&file.content),
            })
        }
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            Err(match e {
                LoadError::Read { .. } => exit_codes::RUNTIME_ERROR,
                LoadError::Parse { .. } => exit_codes::VALIDATION_FAILED,
            })
        }
    }
}
