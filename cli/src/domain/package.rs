//! Package-manager output parsing and app-name validation.
//!
//! Pure functions only.

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use serde::Serialize;

use crate::domain::error::CatalogError;

/// Bucket assumed when `list` output omits one.
pub const DEFAULT_BUCKET: &str = "main";

/// App names are opaque identifiers passed as discrete process arguments.
/// An optional `bucket/` qualifier is allowed.
pub static APP_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._+-]{0,63}(?:/[A-Za-z0-9][A-Za-z0-9._+-]{0,63})?$")
        .expect("valid regex")
});

/// One installed package as reported by `<pm> list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedApp {
    pub name: String,
    pub version: String,
    pub bucket: String,
}

/// Parse `<pm> list` output.
///
/// The first non-blank line is a header and is skipped. Each remaining line
/// is split on whitespace into name, version and bucket; lines with fewer
/// than two fields are ignored.
#[must_use]
pub fn parse_list_output(stdout: &str) -> Vec<ListedApp> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .skip(1)
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let name = parts.next()?;
            let version = parts.next()?;
            let bucket = parts.next().unwrap_or(DEFAULT_BUCKET);
            Some(ListedApp {
                name: name.to_string(),
                version: version.to_string(),
                bucket: bucket.to_string(),
            })
        })
        .collect()
}

/// Validate an app name before it is handed to the package manager.
///
/// # Errors
///
/// Returns an error if the name is not a plain identifier.
pub fn validate_app_name(name: &str) -> Result<()> {
    if !APP_NAME_RE.is_match(name) {
        return Err(CatalogError::InvalidAppName(name.to_string()).into());
    }
    Ok(())
}

/// Entry of the built-in "available apps" catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub bucket: &'static str,
}

const fn entry(name: &'static str, description: &'static str, bucket: &'static str) -> CatalogEntry {
    CatalogEntry {
        name,
        description,
        bucket,
    }
}

/// Popular apps offered for installation without a search round-trip.
pub const CURATED_CATALOG: &[CatalogEntry] = &[
    entry("git", "Distributed version control system", "main"),
    entry("nodejs", "JavaScript runtime", "main"),
    entry("python", "Python programming language", "main"),
    entry("vscode", "Visual Studio Code editor", "extras"),
    entry("7zip", "File archiver", "main"),
    entry("chrome", "Google Chrome browser", "extras"),
    entry("firefox", "Mozilla Firefox browser", "extras"),
    entry("vlc", "VLC media player", "extras"),
    entry("notepadplusplus", "Notepad++ text editor", "extras"),
    entry("docker", "Docker container platform", "main"),
    entry("postman", "API development and testing tool", "extras"),
    entry("wget", "File downloader", "main"),
    entry("curl", "Data transfer tool", "main"),
    entry("ffmpeg", "Audio and video processing", "main"),
    entry("gradle", "Gradle build tool", "main"),
    entry("maven", "Maven build tool", "main"),
];
