use std::collections::BTreeMap;

use crate::error::ValidationError;
use crate::types::StepKind;

use super::format;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PlanningOutcome {
    pub validation: ValidationSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ValidationSummary {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationSummary {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn invalid_from(err: ValidationError) -> Self {
        Self {
            is_valid: false,
            errors: err.messages(),
            warnings: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Plan {
    pub summary: PlanSummary,
    pub steps: Vec<PlanStep>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PlanSummary {
    pub name: String,
    pub version: String,
    pub step_count: usize,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PlanStep {
    pub index: usize,
    pub step_id: String,
    pub kind: StepKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Display form only; steps are never run through a shell.
    pub command_line: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    pub expected_exit_code: i32,
}

impl Plan {
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "plan: {} (version {}, {} steps)\n",
            self.summary.name, self.summary.version, self.summary.step_count
        ));
        for s in &self.steps {
            out.push_str(&format!("  [{}] {} ({})\n", s.index + 1, s.step_id, s.kind));
            if let Some(d) = &s.description {
                out.push_str(&format!("      # {d}\n"));
            }
            let env_prefix = s
                .env
                .iter()
                .map(|(k, v)| format!("{k}={} ", format::quote_arg(v)))
                .collect::<String>();
            out.push_str(&format!("      $ {env_prefix}{}\n", s.command_line));
            if s.expected_exit_code != 0 {
                out.push_str(&format!("      expects exit code {}\n", s.expected_exit_code));
            }
        }
        out
    }
}
