//! Configuration loading

mod loader;

pub use loader::{build_definition, load_config};
