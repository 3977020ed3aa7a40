//! Publish a hosted release for the current version.

use semver::Version;

use crate::changelog::{self, NotesReport};
use crate::context::Context;
use crate::error::{Error, Result};
use crate::utils::validation;

#[derive(Debug, Clone)]
pub struct PublishReport {
    pub tag: String,
    pub notes: NotesReport,
}

/// Release tag for a version string. Rejects anything that is not semver.
pub fn release_tag(version: &str) -> Result<String> {
    let version = Version::parse(version.trim()).map_err(|e| {
        Error::validation_invalid_argument(
            "version",
            format!("'{}' is not a semantic version: {}", version, e),
            None,
        )
    })?;
    Ok(format!("v{}", version))
}

/// Refresh the release notes, then create the hosted release `v<version>`
/// with those notes as its body.
pub fn publish(ctx: &mut Context, version_override: Option<&str>) -> Result<PublishReport> {
    let notes = changelog::write_release_notes(ctx, version_override)?;
    let version = changelog::resolve_version(ctx, version_override)?;
    let tag = release_tag(&version)?;

    let mut argv = ctx.config.commands.publish.clone();
    validation::require_non_empty_vec(&argv, "commands.publish", "Publish command is empty")?;
    argv.push(tag.clone());
    argv.push("-F".to_string());
    argv.push(ctx.config.files.release_notes.clone());

    crate::log_status!("publish", "Creating release {}", tag);
    ctx.run_checked(&argv)?;
    ctx.say(format_args!("Published release {}", tag))?;

    Ok(PublishReport { tag, notes })
}
