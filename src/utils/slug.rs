// src/utils/slug.rs

use std::sync::LazyLock;

use regex::Regex;

static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)[^a-z0-9 -]").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Used when a title has no characters left after sanitizing.
const FALLBACK_NAME: &str = "untitled";

/// Derives the storage file name (without extension) for a quiz title.
///
/// Everything outside `[a-z0-9 -]` is stripped (case-insensitive), whitespace
/// runs become single hyphens and the result is lowercased. Distinct titles
/// can map to the same name.
pub fn derive_filename(title: &str) -> String {
    let stripped = DISALLOWED.replace_all(title, "");
    let hyphenated = WHITESPACE.replace_all(&stripped, "-");
    let name = hyphenated.to_lowercase();

    if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name
    }
}
