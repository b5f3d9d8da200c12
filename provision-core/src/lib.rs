#![forbid(unsafe_code)]

pub mod builtin;
pub mod error;
pub mod parser;
pub mod planner;
pub mod types;
pub mod validate;

pub use crate::builtin::{builtin_manifest, BUILTIN_MANIFEST_YAML};
pub use crate::error::{LoadError, ParseError, ValidationError, Violation};
pub use crate::parser::{load_manifest_file, parse_manifest_str, ManifestFile, ManifestFormat, ParsedManifest};
pub use crate::planner::{
    plan_from_str, plan_manifest, render_command_line, Plan, PlanStep, PlanSummary,
    PlannerError, PlanningOutcome, ValidationSummary,
};
pub use crate::types::{Manifest, ProvisioningStep, StepKind};
pub use crate::validate::{validate_manifest, Validate};
