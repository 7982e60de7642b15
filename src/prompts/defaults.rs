//! Bundled prompt text for the default workflow steps

// Bundled default prompts
const FOUNDATION_PROMPT: &str = include_str!("../../prompts/foundation.md");
const FOUNDATION_TESTS_PROMPT: &str = include_str!("../../prompts/foundation-tests.md");
const MINIMAL_PROMPT: &str = include_str!("../../prompts/minimal.md");
const MINIMAL_TESTS_PROMPT: &str = include_str!("../../prompts/minimal-tests.md");
const EXTENSION_PROMPT: &str = include_str!("../../prompts/extension.md");
const EXTENSION_TESTS_PROMPT: &str = include_str!("../../prompts/extension-tests.md");
const REFINEMENT_PROMPT: &str = include_str!("../../prompts/refinement.md");
const REFINEMENT_TESTS_PROMPT: &str = include_str!("../../prompts/refinement-tests.md");

/// Look up the bundled prompt for a default step id
pub fn bundled_prompt(step_id: &str) -> Option<&'static str> {
    match step_id {
        "foundation" => Some(FOUNDATION_PROMPT),
        "foundation-tests" => Some(FOUNDATION_TESTS_PROMPT),
        "minimal" => Some(MINIMAL_PROMPT),
        "minimal-tests" => Some(MINIMAL_TESTS_PROMPT),
        "extension" => Some(EXTENSION_PROMPT),
        "extension-tests" => Some(EXTENSION_TESTS_PROMPT),
        "refinement" => Some(REFINEMENT_PROMPT),
        "refinement-tests" => Some(REFINEMENT_TESTS_PROMPT),
        _ => None,
    }
}
