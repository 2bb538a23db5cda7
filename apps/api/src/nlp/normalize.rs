//! Text normalizer: strips noise from raw extracted document text.

use std::sync::LazyLock;

use regex::Regex;

/// Anything that is not a word character, whitespace, or one of `@ . -`.
/// Those three survive so emails and hyphenated terms stay intact.
static NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s@.\-]").expect("noise pattern is valid"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Normalizes raw document text.
///
/// Noise characters are removed first, then every whitespace run (newlines
/// included) collapses to a single space, then the result is trimmed. Stripping
/// before collapsing keeps `"a ! b"` from turning into a double space.
///
/// Total and idempotent: `normalize(&normalize(t)) == normalize(t)`.
pub fn normalize(text: &str) -> String {
    let stripped = NOISE.replace_all(text, "");
    let collapsed = WHITESPACE_RUN.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}
