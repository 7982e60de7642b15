//! Prompt template interpolation
//!
//! Supports `${name}` substitution. Placeholders that are malformed or have no
//! value are left in the output verbatim and reported as diagnostics, never
//! treated as failures.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::errors::{Result, StepwiseError};

/// Name of the variable holding the change request path
pub const CHANGE_REQUEST_FILE_PATH: &str = "changeRequestFilePath";

/// Variables available for prompt template rendering.
///
/// Known keys are typed fields; anything else goes through the validated
/// `extra` bag so new variables can be introduced without touching the
/// interpolator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptVariables {
    /// Path of the change request being processed
    pub change_request_file_path: String,

    extra: BTreeMap<String, String>,
}

impl PromptVariables {
    pub fn new(change_request_file_path: impl Into<String>) -> Self {
        PromptVariables {
            change_request_file_path: change_request_file_path.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Add an extra variable.
    ///
    /// # Errors
    /// * `ConfigError` - If the name is not a valid placeholder name or
    ///   shadows a known key
    pub fn with_var(mut self, name: &str, value: impl Into<String>) -> Result<Self> {
        if !is_valid_name(name) {
            return Err(StepwiseError::ConfigError(format!(
                "Invalid prompt variable name: {:?}",
                name
            )));
        }
        if name == CHANGE_REQUEST_FILE_PATH {
            return Err(StepwiseError::ConfigError(format!(
                "Prompt variable {} is reserved",
                name
            )));
        }
        self.extra.insert(name.to_string(), value.into());
        Ok(self)
    }

    /// Look up a variable by placeholder name
    pub fn get(&self, name: &str) -> Option<&str> {
        if name == CHANGE_REQUEST_FILE_PATH {
            return Some(&self.change_request_file_path);
        }
        self.extra.get(name).map(String::as_str)
    }

    /// Convert to a hashmap of string values for template rendering
    pub fn to_map(&self) -> HashMap<String, String> {
        let mut map: HashMap<String, String> = self
            .extra
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        map.insert(
            CHANGE_REQUEST_FILE_PATH.to_string(),
            self.change_request_file_path.clone(),
        );
        map
    }
}

/// Rendered template plus the placeholders that could not be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpolation {
    /// The rendered text
    pub text: String,

    /// Well-formed placeholder names with no value, in first-seen order
    pub missing: Vec<String>,

    /// Placeholder bodies that are not valid names, in first-seen order
    pub malformed: Vec<String>,
}

impl Interpolation {
    /// True when every placeholder was resolved
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.malformed.is_empty()
    }

    /// Return the text, or an `Interpolation` error if anything was unresolved
    pub fn into_strict(self) -> Result<String> {
        if self.is_clean() {
            Ok(self.text)
        } else {
            Err(StepwiseError::Interpolation {
                missing: self.missing,
                malformed: self.malformed,
            })
        }
    }
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\$\{([^{}]*)\}").expect("placeholder pattern is valid"))
}

/// Check whether `name` is a syntactically valid placeholder name
/// (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Collect the malformed placeholder bodies in a template without rendering it
pub fn malformed_placeholders(template: &str) -> Vec<String> {
    let mut malformed = Vec::new();
    for caps in placeholder_regex().captures_iter(template) {
        let body = &caps[1];
        if !is_valid_name(body) && !malformed.iter().any(|m| m == body) {
            malformed.push(body.to_string());
        }
    }
    malformed
}

fn render_with<'a, F>(template: &str, lookup: F) -> Interpolation
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut missing: Vec<String> = Vec::new();
    let mut malformed: Vec<String> = Vec::new();

    let text = placeholder_regex()
        .replace_all(template, |caps: &Captures| {
            let body = &caps[1];
            if !is_valid_name(body) {
                if !malformed.iter().any(|m| m == body) {
                    malformed.push(body.to_string());
                }
                return caps[0].to_string();
            }
            match lookup(body) {
                Some(value) => value.to_string(),
                None => {
                    if !missing.iter().any(|m| m == body) {
                        missing.push(body.to_string());
                    }
                    caps[0].to_string()
                }
            }
        })
        .into_owned();

    Interpolation {
        text,
        missing,
        malformed,
    }
}

/// Substitute every known `${name}` in `template`.
///
/// Unknown and malformed placeholders are kept verbatim.
pub fn interpolate(template: &str, variables: &PromptVariables) -> String {
    interpolate_with_diagnostics(template, variables).text
}

/// Same substitution as [`interpolate`], also reporting which placeholders
/// were missing from `variables` and which were malformed.
pub fn interpolate_with_diagnostics(template: &str, variables: &PromptVariables) -> Interpolation {
    render_with(template, |name| variables.get(name))
}

/// Substitute placeholders from an arbitrary string map
pub fn interpolate_with_map(template: &str, map: &HashMap<String, String>) -> Interpolation {
    render_with(template, |name| map.get(name).map(String::as_str))
}
