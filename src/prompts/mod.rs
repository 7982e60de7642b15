//! Prompt rendering for workflow steps
//!
//! `${name}` interpolation with diagnostics, conversion into numbered
//! instruction lists, and the bundled prompts for the default steps.

mod defaults;
mod instructions;
mod template;

pub use defaults::bundled_prompt;
pub use instructions::{normalize_punctuation, split_sentences, to_instruction_list, FALLBACK_INSTRUCTION};
pub use template::{
    interpolate, interpolate_with_diagnostics, interpolate_with_map, is_valid_name,
    malformed_placeholders, Interpolation, PromptVariables, CHANGE_REQUEST_FILE_PATH,
};
