//! Checkbox line recognition
//!
//! A todo line looks like `- [ ] (A) Call the bank +finance @phone
//! {due:2024-01-01}`. This module matches the checkbox pattern and pulls
//! out the priority marker, `+project` and `@context` tags, and the
//! `{...}` option blocks, leaving cleaned display text.

use once_cell::sync::Lazy;
use regex::Regex;

static CHECKBOX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)-\s*\[([ xX])\]\s*(.+)$").unwrap());

static PRIORITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\(([A-Z])\)\s+").unwrap());

static OPTION_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^{}]+)\}").unwrap());

static PROJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|\s)\+(\S+)").unwrap());

static CONTEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|\s)@(\S+)").unwrap());

/// One recognized checkbox line, before tree assembly and option parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedLine {
    /// Leading whitespace width in characters.
    pub indent: usize,

    /// Whether the checkbox was marked.
    pub done: bool,

    /// Priority letter from a leading `(A)` marker.
    pub priority: Option<char>,

    /// Cleaned display text.
    pub text: String,

    /// `+project` tags.
    pub projects: Vec<String>,

    /// `@context` tags.
    pub contexts: Vec<String>,

    /// Trimmed interiors of the `{...}` blocks, in order.
    pub option_fragments: Vec<String>,

    /// Everything after the checkbox, untouched.
    pub raw_text: String,
}

/// Recognizes a checkbox line. Returns `None` for anything else, so
/// ordinary markdown passes through the scanner untouched.
pub fn scan_line(line: &str) -> Option<ScannedLine> {
    let caps = CHECKBOX.captures(line)?;

    let indent = caps.get(1).map_or(0, |m| m.as_str().len());
    let done = caps
        .get(2)
        .is_some_and(|m| m.as_str().eq_ignore_ascii_case("x"));
    let raw_text = caps.get(3).map_or("", |m| m.as_str()).to_string();

    let option_fragments: Vec<String> = OPTION_BLOCK
        .captures_iter(&raw_text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect();

    // Strip option blocks before tag extraction so `{due:...}` values can
    // never be mistaken for tags.
    let without_options = OPTION_BLOCK.replace_all(&raw_text, " ");

    let priority = PRIORITY
        .captures(without_options.trim_start())
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().chars().next());

    let projects: Vec<String> = PROJECT
        .captures_iter(&without_options)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect();

    let contexts: Vec<String> = CONTEXT
        .captures_iter(&without_options)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect();

    let mut cleaned = without_options.trim_start().to_string();
    if priority.is_some() {
        cleaned = PRIORITY.replace(&cleaned, "").to_string();
    }
    let cleaned = PROJECT.replace_all(&cleaned, " ");
    let cleaned = CONTEXT.replace_all(&cleaned, " ");
    let text = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    Some(ScannedLine {
        indent,
        done,
        priority,
        text,
        projects,
        contexts,
        option_fragments,
        raw_text,
    })
}
