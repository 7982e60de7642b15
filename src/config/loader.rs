//! Configuration loading with defaults

use std::path::Path;

use crate::domain::{default_steps, WorkflowDefinition};
use crate::errors::{Result, StepwiseError};
use crate::fs::{get_config_path, read_json, LocalFileSystem};
use crate::schemas::Config;

/// Load configuration, falling back to defaults.
///
/// An explicit path must exist. Otherwise `.stepwise/config.json` under
/// `root` is used when present, and defaults when it is not.
///
/// # Arguments
/// * `root` - Directory to look for `.stepwise/config.json` in
/// * `explicit` - Config file requested on the command line
///
/// # Errors
/// * `FileNotFound` - If `explicit` does not exist
/// * `ConfigError` - If the file is not valid configuration JSON
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<Config> {
    let fs = LocalFileSystem::new();
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = get_config_path(root);
            if !path.is_file() {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Config::default());
            }
            path
        }
    };

    read_json(&fs, &path).map_err(|e| match e {
        StepwiseError::InvalidJson(message) => StepwiseError::ConfigError(message),
        other => other,
    })
}

/// Build the validated workflow definition a config describes.
///
/// # Errors
/// * `InvalidDefinition` - If the configured steps are not a valid workflow
pub fn build_definition(config: &Config) -> Result<WorkflowDefinition> {
    match &config.steps {
        Some(steps) => WorkflowDefinition::new(steps.clone()),
        None => WorkflowDefinition::new(default_steps()),
    }
}
