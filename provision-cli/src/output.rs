use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Renders `value` as a single JSON line. Text output is built by each command.
pub fn json_line<T: Serialize>(value: &T) -> Option<String> {
    serde_json::to_string(value).ok()
}

pub fn print_json<T: Serialize>(quiet: bool, value: &T) {
    if quiet {
        return;
    }
    if let Some(line) = json_line(value) {
        println!("{line}");
    }
}

pub fn print_error(format: OutputFormat, quiet: bool, message: &str) {
    if quiet {
        return;
    }
    match format {
        OutputFormat::Text => eprintln!("error: {message}"),
        OutputFormat::Json => {
            let err = serde_json::json!({"error": message});
            eprintln!("{}", json_line(&err).unwrap_or_default());
        }
    }
}
