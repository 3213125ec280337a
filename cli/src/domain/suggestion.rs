//! Turns a completion reply into at most three candidate commands.
//!
//! Pure functions only. Parsing never fails: anything unusable is dropped.

use std::sync::LazyLock;

use regex::Regex;

/// Most suggestions offered for one question.
pub const MAX_SUGGESTIONS: usize = 3;

/// Shorter candidates are noise (`ls` survives, `a` does not).
pub const MIN_SUGGESTION_CHARS: usize = 3;

static ENUMERATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^\d+[.)]\s*").expect("valid regex")
});

static FENCE_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^```[A-Za-z0-9_+-]*\s*").expect("valid regex")
});

static FENCE_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"\s*```$").expect("valid regex")
});

/// Extract candidate commands from the content of a completion response.
///
/// Blank lines and `#` / `//` comments are skipped, then the first
/// [`MAX_SUGGESTIONS`] lines are cleaned of numbering and code fences.
/// Candidates that end up too short or mention a password are dropped.
#[must_use]
pub fn parse_suggestions(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_comment(line))
        .take(MAX_SUGGESTIONS)
        .map(clean_line)
        .filter(|cmd| cmd.chars().count() >= MIN_SUGGESTION_CHARS)
        .filter(|cmd| !mentions_password(cmd))
        .collect()
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with("//")
}

fn clean_line(line: &str) -> String {
    let line = ENUMERATION_RE.replace(line, "");
    let line = FENCE_OPEN_RE.replace(&line, "");
    let line = FENCE_CLOSE_RE.replace(&line, "");
    line.trim().to_string()
}

fn mentions_password(cmd: &str) -> bool {
    let lower = cmd.to_ascii_lowercase();
    lower.contains("password") || lower.contains("--password")
}
