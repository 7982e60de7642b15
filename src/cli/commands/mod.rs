//! CLI command implementations

pub mod implement;
pub mod status;
pub mod steps;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::load_config;
use crate::errors::Result;
use crate::fs::{resolve_cwd, LocalFileSystem};
use crate::report::ConsoleReporter;
use crate::workflow::WorkflowRunner;

/// Options shared by every command
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub cwd: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub quiet: bool,
}

impl GlobalOptions {
    /// Resolve a user-supplied path against `--cwd` when it is relative
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.cwd {
            Some(cwd) if path.is_relative() => cwd.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Load configuration and build a runner on the local file system
    pub fn runner(&self) -> Result<WorkflowRunner> {
        let root = resolve_cwd(self.cwd.as_deref());
        let config_path = self.config.as_deref().map(|p| self.resolve_path(p));
        let config = load_config(&root, config_path.as_deref())?;
        WorkflowRunner::from_config(
            &config,
            Arc::new(LocalFileSystem::new()),
            Arc::new(ConsoleReporter::new(self.quiet)),
        )
    }
}
