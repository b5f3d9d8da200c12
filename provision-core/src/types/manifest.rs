use crate::types::{Extensions, ProvisioningStep};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Manifest {
    /// Manifest format version (e.g. "1.0").
    pub version: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Executed strictly in order.
    #[serde(default)]
    pub steps: Vec<ProvisioningStep>,

    #[serde(flatten, default)]
    pub extensions: Extensions,
}

impl Manifest {
    pub fn step(&self, id: &str) -> Option<&ProvisioningStep> {
        self.steps.iter().find(|s| s.id == id)
    }
}
