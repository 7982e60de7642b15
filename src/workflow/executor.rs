//! Step execution: render a step's prompt into its output artifact
//!
//! Executing a step performs exactly one file write and never touches
//! workflow state.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::errors::{Result, StepwiseError};
use crate::fs::{default_output_path, state_file_path, FileSystem};
use crate::prompts::{
    interpolate_with_diagnostics, to_instruction_list, PromptVariables, CHANGE_REQUEST_FILE_PATH,
};
use crate::report::Reporter;
use crate::schemas::WorkflowStep;

/// Produces step artifacts from prompt templates
pub struct StepExecutor {
    fs: Arc<dyn FileSystem>,
    reporter: Arc<dyn Reporter>,
    strict_variables: bool,
}

impl StepExecutor {
    pub fn new(fs: Arc<dyn FileSystem>, reporter: Arc<dyn Reporter>) -> Self {
        StepExecutor {
            fs,
            reporter,
            strict_variables: false,
        }
    }

    /// Builder: fail instead of warning on unresolved prompt variables
    pub fn with_strict_variables(mut self, strict: bool) -> Self {
        self.strict_variables = strict;
        self
    }

    /// Variables available to a step of this change request
    pub fn variables_for(&self, change_request: &Path) -> PromptVariables {
        PromptVariables::new(change_request.to_string_lossy())
    }

    fn resolve_prompt(
        &self,
        template: &str,
        variables: &PromptVariables,
        step: &WorkflowStep,
    ) -> Result<String> {
        let rendered = interpolate_with_diagnostics(template, variables);
        if rendered.is_clean() {
            return Ok(rendered.text);
        }
        if self.strict_variables {
            return rendered.into_strict();
        }

        let mut problems = Vec::new();
        if !rendered.missing.is_empty() {
            problems.push(format!("missing variables: {}", rendered.missing.join(", ")));
        }
        if !rendered.malformed.is_empty() {
            problems.push(format!(
                "malformed variables: {}",
                rendered.malformed.join(", ")
            ));
        }
        self.reporter.warn(&format!(
            "step {} prompt: {}",
            step.id,
            problems.join("; ")
        ));
        Ok(rendered.text)
    }

    /// Where the step's artifact goes for this change request.
    ///
    /// `${changeRequestFilePath}` is spliced in as the raw path so non-UTF-8
    /// names survive. Unlike prompts, an output template with unresolved
    /// placeholders is always an error.
    ///
    /// # Errors
    /// * `Interpolation` - If the template has missing or malformed placeholders
    /// * `StepExecution` - If the path would replace the change request or its state file
    pub fn output_path(&self, change_request: &Path, step: &WorkflowStep) -> Result<PathBuf> {
        if step.output_file.trim().is_empty() {
            return Ok(default_output_path(change_request, &step.id));
        }

        let placeholder = format!("${{{}}}", CHANGE_REQUEST_FILE_PATH);
        let variables = self.variables_for(change_request);
        let mut rendered = OsString::new();
        let mut missing = Vec::new();
        let mut malformed = Vec::new();
        for (i, segment) in step.output_file.split(placeholder.as_str()).enumerate() {
            if i > 0 {
                rendered.push(change_request.as_os_str());
            }
            let resolved = interpolate_with_diagnostics(segment, &variables);
            for name in resolved.missing {
                if !missing.contains(&name) {
                    missing.push(name);
                }
            }
            for body in resolved.malformed {
                if !malformed.contains(&body) {
                    malformed.push(body);
                }
            }
            rendered.push(resolved.text);
        }
        if !missing.is_empty() || !malformed.is_empty() {
            return Err(StepwiseError::Interpolation { missing, malformed });
        }

        let output = PathBuf::from(rendered);
        check_output_path(change_request, &output, step)?;
        Ok(output)
    }

    /// Render the artifact body for a step: a heading and a numbered list.
    ///
    /// A step without a prompt gets one derived from its description.
    pub fn render_step(&self, change_request: &Path, step: &WorkflowStep) -> Result<String> {
        let variables = self.variables_for(change_request);
        let template = if step.prompt.trim().is_empty() {
            format!(
                "Complete the {} step for the change request at ${{changeRequestFilePath}}.",
                step.description.trim_end_matches(&['.', '!', '?'][..])
            )
        } else {
            step.prompt.clone()
        };

        let prompt = self.resolve_prompt(&template, &variables, step)?;
        let instructions = to_instruction_list(&prompt);
        Ok(format!("# {}\n\n{}\n", step.description, instructions))
    }

    /// Execute `step` for a change request, writing its artifact to `output_path`.
    ///
    /// # Errors
    /// * `FileNotFound` - If the change request does not exist
    /// * `StepExecution` - If the change request cannot be read, the artifact
    ///   cannot be written, or `output_path` is the change request or its state file
    /// * `Interpolation` - In strict mode, if the prompt has unresolved variables
    pub fn execute_step(
        &self,
        change_request: &Path,
        step: &WorkflowStep,
        output_path: &Path,
    ) -> Result<()> {
        check_output_path(change_request, output_path, step)?;

        self.fs.read_file(change_request).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StepwiseError::FileNotFound(change_request.display().to_string())
            } else {
                StepwiseError::StepExecution(format!(
                    "Failed to read {}: {}",
                    change_request.display(),
                    e
                ))
            }
        })?;

        let body = self.render_step(change_request, step)?;

        self.fs
            .write_file(output_path, body.as_bytes())
            .map_err(|e| {
                StepwiseError::StepExecution(format!(
                    "Failed to write {}: {}",
                    output_path.display(),
                    e
                ))
            })?;
        tracing::debug!(step = %step.id, output = %output_path.display(), "wrote step artifact");
        Ok(())
    }
}

/// Drop `.` components so `./cr.md` and `cr.md` compare equal
fn lexical(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Artifacts must never land on the change request or its state file.
fn check_output_path(change_request: &Path, output: &Path, step: &WorkflowStep) -> Result<()> {
    let output = lexical(output);
    let reserved = [
        (lexical(change_request), "the change request"),
        (lexical(&state_file_path(change_request)), "the workflow state file"),
    ];
    for (path, what) in reserved {
        if output == path {
            return Err(StepwiseError::StepExecution(format!(
                "output of step {} ({}) would overwrite {}",
                step.id,
                output.display(),
                what
            )));
        }
    }
    Ok(())
}
