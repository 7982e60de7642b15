//! Path derivation for stepwise artifacts
//!
//! Every per-change-request file is derived from the change request path
//! itself, so distinct change requests never share storage.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Append `suffix` to the full file name of `path` (`cr.md` -> `cr.md<suffix>`).
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Path of the persisted state file: `<change request>.step`
pub fn state_file_path(change_request: &Path) -> PathBuf {
    with_suffix(change_request, ".step")
}

/// Default output artifact for a step: `<change request>.<step id>.md`
pub fn default_output_path(change_request: &Path, step_id: &str) -> PathBuf {
    with_suffix(change_request, &format!(".{}.md", step_id))
}

/// Resolve the current working directory, optionally using an override.
pub fn resolve_cwd(cwd_option: Option<&Path>) -> PathBuf {
    match cwd_option {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Get the path to the .stepwise directory.
pub fn get_stepwise_dir(root: &Path) -> PathBuf {
    root.join(".stepwise")
}

/// Get the path to the config.json file.
pub fn get_config_path(root: &Path) -> PathBuf {
    get_stepwise_dir(root).join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_file_path() {
        assert_eq!(state_file_path(Path::new("cr1.md")), PathBuf::from("cr1.md.step"));
        assert_eq!(
            state_file_path(Path::new("/repo/crs/cr1.md")),
            PathBuf::from("/repo/crs/cr1.md.step")
        );
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("cr1.md"), "foundation"),
            PathBuf::from("cr1.md.foundation.md")
        );
    }

    #[test]
    fn test_distinct_change_requests_get_distinct_state_files() {
        assert_ne!(
            state_file_path(Path::new("cr1.md")),
            state_file_path(Path::new("cr2.md"))
        );
    }

    #[test]
    fn test_get_config_path() {
        let root = PathBuf::from("/repo");
        assert_eq!(get_config_path(&root), PathBuf::from("/repo/.stepwise/config.json"));
    }

    #[test]
    fn test_resolve_cwd_with_override() {
        let path = PathBuf::from("/custom/path");
        assert_eq!(resolve_cwd(Some(&path)), path);
    }

    #[test]
    fn test_resolve_cwd_without_override() {
        assert!(!resolve_cwd(None).as_os_str().is_empty());
    }
}
