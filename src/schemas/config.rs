//! Config schema - Configuration for stepwise

use serde::{Deserialize, Serialize};

use super::WorkflowStep;

/// Main configuration for stepwise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Treat missing or malformed prompt variables as a hard error
    #[serde(default)]
    pub strict_variables: bool,

    /// Custom workflow steps, replacing the bundled table when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<WorkflowStep>>,
}

fn default_schema_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Config {
            schema_version: 1,
            strict_variables: false,
            steps: None,
        }
    }
}
