//! File system utilities for stepwise
//!
//! Provides the file access collaborator, path derivation and JSON file operations.

mod json;
mod paths;
mod store;

pub use json::{read_json, write_json};
pub use paths::{
    default_output_path, get_config_path, get_stepwise_dir, resolve_cwd, state_file_path,
};
pub use store::{FileSystem, LocalFileSystem, MemoryFileSystem};
