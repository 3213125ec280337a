//! Free-form command vetting and output shaping.
//!
//! The validator is an advisory pattern filter, not a sandbox: a command it
//! allows still runs with the full privileges of the dockyard process. The
//! rule table is public so it can be listed and tested.
//!
//! Pure functions only. Nothing here spawns a process.

use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

use regex::{Regex, RegexBuilder};

// ── Limits ───────────────────────────────────────────────────────────────────

/// Longest command (in characters) the validator lets through.
pub const MAX_COMMAND_CHARS: usize = 200;

/// Wall-clock ceiling for one free-form command.
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Combined stdout + stderr the runner will buffer before giving up.
pub const MAX_OUTPUT_BYTES: usize = 1024 * 1024;

/// Longest output (in characters) handed back to the caller.
pub const MAX_OUTPUT_CHARS: usize = 2000;

/// Appended to output cut at `MAX_OUTPUT_CHARS`.
pub const TRUNCATION_MARKER: &str = "\n... (output truncated)";

/// Reported when a command printed nothing at all.
pub const EMPTY_OUTPUT: &str = "command executed";

// ── Rule table ───────────────────────────────────────────────────────────────

/// One dangerous-command rule. Patterns are matched case-insensitively.
#[derive(Debug)]
pub struct DangerRule {
    pub name: &'static str,
    pub pattern: &'static str,
}

pub const DANGEROUS_RULES: &[DangerRule] = &[
    DangerRule {
        name: "recursive forced delete",
        pattern: r"\brm\s+(?:-\S+\s+)*-[a-z]*(?:r[a-z]*f|f[a-z]*r)",
    },
    DangerRule {
        name: "recursive forced delete (split flags)",
        pattern: r"\brm\b.*\s(?:-r|--recursive)\b.*\s(?:-f|--force)\b|\brm\b.*\s(?:-f|--force)\b.*\s(?:-r|--recursive)\b",
    },
    DangerRule {
        name: "windows tree/quiet delete",
        pattern: r"\b(?:del|erase|rd|rmdir)\b.*\s/[sq]\b",
    },
    DangerRule {
        name: "disk format",
        pattern: r"\bformat\s+(?:/\S+\s+)*[a-z]:|\bformat-volume\b|\bmkfs\b",
    },
    DangerRule {
        name: "shutdown",
        pattern: r"\bshutdown\b",
    },
    DangerRule {
        name: "restart",
        pattern: r"\brestart\b",
    },
    DangerRule {
        name: "password flag",
        pattern: r"--password=",
    },
    DangerRule {
        name: "passwd",
        pattern: r"\bpasswd\b",
    },
    DangerRule {
        name: "sudo",
        pattern: r"\bsudo\b",
    },
    DangerRule {
        name: "account creation",
        pattern: r"\bnet\s+user\b.*\s/add\b",
    },
];

static COMPILED_RULES: LazyLock<Vec<(&'static DangerRule, Regex)>> = LazyLock::new(|| {
    DANGEROUS_RULES
        .iter()
        .map(|rule| {
            // Safety: patterns are compile-time constants covered by tests.
            #[allow(clippy::expect_used)]
            let re = RegexBuilder::new(rule.pattern)
                .case_insensitive(true)
                .build()
                .expect("valid regex");
            (rule, re)
        })
        .collect()
});

// ── Verdict ──────────────────────────────────────────────────────────────────

/// Why the validator refused a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    TooLong,
    Dangerous,
}

impl Rejection {
    #[must_use]
    pub fn reason(self) -> &'static str {
        match self {
            Self::TooLong => "command too long, execution blocked.",
            Self::Dangerous => "potentially dangerous command detected, execution blocked.",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationVerdict {
    Allowed,
    Rejected(Rejection),
}

impl ValidationVerdict {
    #[must_use]
    pub fn is_allowed(self) -> bool {
        self == Self::Allowed
    }

    #[must_use]
    pub fn reason(self) -> Option<&'static str> {
        match self {
            Self::Allowed => None,
            Self::Rejected(r) => Some(r.reason()),
        }
    }
}

/// Classify a candidate command. Length is checked before patterns.
///
/// The empty string is allowed; callers filter empty input themselves.
#[must_use]
pub fn validate_command(command: &str) -> ValidationVerdict {
    if command.chars().count() > MAX_COMMAND_CHARS {
        return ValidationVerdict::Rejected(Rejection::TooLong);
    }
    if matching_rule(command).is_some() {
        return ValidationVerdict::Rejected(Rejection::Dangerous);
    }
    ValidationVerdict::Allowed
}

/// First dangerous rule the command matches, if any.
#[must_use]
pub fn matching_rule(command: &str) -> Option<&'static DangerRule> {
    COMPILED_RULES
        .iter()
        .find(|(_, re)| re.is_match(command))
        .map(|(rule, _)| *rule)
}

// ── Output shaping ───────────────────────────────────────────────────────────

/// Pick what to show: stdout, else stderr, else [`EMPTY_OUTPUT`].
#[must_use]
pub fn select_output(stdout: &str, stderr: &str) -> String {
    if !stdout.trim().is_empty() {
        stdout.to_string()
    } else if !stderr.trim().is_empty() {
        stderr.to_string()
    } else {
        EMPTY_OUTPUT.to_string()
    }
}

/// Cut `output` to [`MAX_OUTPUT_CHARS`] characters plus [`TRUNCATION_MARKER`].
/// Returns the shaped text and whether anything was cut.
#[must_use]
pub fn truncate_output(output: &str) -> (String, bool) {
    match output.char_indices().nth(MAX_OUTPUT_CHARS) {
        Some((byte_idx, _)) => (format!("{}{TRUNCATION_MARKER}", &output[..byte_idx]), true),
        None => (output.to_string(), false),
    }
}

/// Lossy decoding left replacement characters behind.
#[must_use]
pub fn looks_garbled(text: &str) -> bool {
    text.contains('\u{FFFD}')
}

// ── Unit tests ───────────────────────────────────────────────────────────────
