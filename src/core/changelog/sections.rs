use regex::Regex;
use std::sync::LazyLock;

// A release heading: `## [1.2.0]`, any number of `#`.
static RELEASE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#+\s\[[0-9]+\.[0-9]+\.[0-9]+\]").unwrap());

// Where the current section ends: the next heading whose bracket opens on a digit.
static NEXT_RELEASE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#+\s\[[0-9]").unwrap());

/// Extract the most recent release section from a changelog.
///
/// Finds the first release heading and captures everything up to the next
/// heading that opens a version bracket, or the end of input. The capture is
/// trimmed. Returns `None` when the document has no release heading.
pub fn extract_latest_section(changelog: &str) -> Option<&str> {
    let heading = RELEASE_HEADING.find(changelog)?;
    let rest = &changelog[heading.end()..];

    let end = NEXT_RELEASE_HEADING
        .find(rest)
        .map(|next| heading.end() + next.start())
        .unwrap_or(changelog.len());

    Some(changelog[heading.start()..end].trim())
}

/// Minimal release notes used when no section can be extracted.
pub fn fallback_notes(version: &str) -> String {
    format!("# v{version}\n\nRelease version {version}")
}
