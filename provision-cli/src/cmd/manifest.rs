use provision_core::{builtin_manifest, BUILTIN_MANIFEST_YAML};

use crate::exit_codes;
use crate::output::{print_error, print_json, OutputFormat};
use crate::OutputArgs;

pub fn manifest_cmd(output: OutputArgs) -> i32 {
    if output.quiet {
        return exit_codes::SUCCESS;
    }
    match output.format {
        OutputFormat::Text => {
            print!("{BUILTIN_MANIFEST_YAML}");
            exit_codes::SUCCESS
        }
        OutputFormat::Json => match builtin_manifest() {
            Ok(manifest) => {
                print_json(output.quiet, &manifest);
                exit_codes::SUCCESS
            }
            Err(e) => {
                print_error(output.format, output.quiet, &format!("built-in manifest: {e}"));
                exit_codes::RUNTIME_ERROR
            }
        },
    }
}
