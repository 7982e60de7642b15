//! Numbered instruction list rendering
//!
//! Turns free-form prompt text into a `1. ...` list, one sentence per item.

use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Emitted when a prompt contains no usable sentence
pub const FALLBACK_INSTRUCTION: &str = "Review the change request and complete this step.";

fn repeated_punctuation_regex() -> &'static Regex {
    static REPEATED: OnceLock<Regex> = OnceLock::new();
    // Only runs that end a word are collapsed, so `../dir` or `std::fs` survive.
    REPEATED.get_or_init(|| {
        Regex::new(r"([.!?]{2,}|[,;:]{2,})(\s|$)").expect("punctuation pattern is valid")
    })
}

fn space_before_punctuation_regex() -> &'static Regex {
    static SPACED: OnceLock<Regex> = OnceLock::new();
    SPACED.get_or_init(|| {
        Regex::new(r"(\w)[ \t]+([.!?,;:])(\s|$)").expect("spacing pattern is valid")
    })
}

fn list_marker_regex() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| {
        Regex::new(r"^\s*(?:#+|[-*+]|\d+[.)])\s+").expect("list marker pattern is valid")
    })
}

/// Collapse duplicated punctuation (`!!!`, `..`, `;;`) to a single mark and
/// drop stray whitespace before punctuation.
pub fn normalize_punctuation(text: &str) -> String {
    let collapsed = repeated_punctuation_regex().replace_all(text, |caps: &Captures| {
        let run = &caps[1];
        let first = run.chars().next().unwrap_or('.');
        format!("{}{}", first, &caps[2])
    });
    space_before_punctuation_regex()
        .replace_all(&collapsed, "${1}${2}${3}")
        .into_owned()
}

fn is_meaningful(fragment: &str) -> bool {
    fragment.chars().any(|c| c.is_alphanumeric())
}

/// Split text into trimmed sentences.
///
/// Line breaks always end a sentence; within a line a sentence ends at
/// `.`, `!` or `?` followed by whitespace. Leading list markers and heading
/// hashes are stripped. Fragments without any letter or digit are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let normalized = normalize_punctuation(text);
    let mut sentences = Vec::new();

    for line in normalized.lines() {
        let stripped = list_marker_regex().replace(line, "");
        let line: &str = &stripped;
        let chars: Vec<(usize, char)> = line.char_indices().collect();
        let mut start = 0;

        for (pos, &(idx, c)) in chars.iter().enumerate() {
            if !matches!(c, '.' | '!' | '?') {
                continue;
            }
            let at_boundary = match chars.get(pos + 1) {
                Some(&(_, next)) => next.is_whitespace(),
                None => false,
            };
            if at_boundary {
                let end = idx + c.len_utf8();
                push_fragment(&mut sentences, &line[start..end]);
                start = end;
            }
        }
        push_fragment(&mut sentences, &line[start..]);
    }

    sentences
}

fn push_fragment(sentences: &mut Vec<String>, fragment: &str) {
    let trimmed = fragment.trim();
    if is_meaningful(trimmed) {
        sentences.push(trimmed.to_string());
    }
}

/// Render text as a numbered instruction list, falling back to
/// [`FALLBACK_INSTRUCTION`] so the result is never empty.
pub fn to_instruction_list(text: &str) -> String {
    let mut sentences = split_sentences(text);
    if sentences.is_empty() {
        sentences.push(FALLBACK_INSTRUCTION.to_string());
    }

    sentences
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {}", i + 1, s))
        .collect::<Vec<_>>()
        .join("\n")
}
