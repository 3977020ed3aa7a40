use std::path::{Path, PathBuf};

use crate::context::Context;
use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::utils::validation;

use super::sections::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotesSource {
    /// The latest changelog section was written.
    Extracted,
    /// No release heading was found; the synthesized note was written.
    Fallback,
}

#[derive(Debug, Clone)]
pub struct NotesReport {
    pub path: PathBuf,
    pub source: NotesSource,
    pub content: String,
}

/// Extract the latest changelog section into the release notes file.
///
/// When the changelog has no release heading, writes the fallback note for
/// the manifest version (or `version_override`) and succeeds. When reading or
/// writing fails, still attempts to write the fallback note, then returns the
/// original error.
pub fn write_release_notes(
    ctx: &mut Context,
    version_override: Option<&str>,
) -> Result<NotesReport> {
    let changelog_path = ctx.changelog_path();
    let notes_path = ctx.release_notes_path();

    match extract_to_file(ctx, &changelog_path, &notes_path, version_override) {
        Ok(report) => Ok(report),
        Err(err) => {
            crate::log_status!("notes", "Extraction failed, writing fallback notes");
            match write_fallback(ctx, &notes_path, version_override) {
                Ok(_) => Err(err.with_hint(format!(
                    "Wrote fallback release notes to {}",
                    notes_path.display()
                ))),
                Err(fallback_err) => Err(err.with_hint(format!(
                    "Fallback release notes were not written: {}",
                    fallback_err.cause().unwrap_or(&fallback_err.message)
                ))),
            }
        }
    }
}

fn extract_to_file(
    ctx: &mut Context,
    changelog_path: &Path,
    notes_path: &Path,
    version_override: Option<&str>,
) -> Result<NotesReport> {
    let changelog = ctx.fs.read_to_string(changelog_path)?;

    match extract_latest_section(&changelog) {
        Some(section) => {
            ctx.fs.write(notes_path, section.as_bytes())?;
            ctx.say("Successfully extracted latest release notes.")?;
            Ok(NotesReport {
                path: notes_path.to_path_buf(),
                source: NotesSource::Extracted,
                content: section.to_string(),
            })
        }
        None => {
            ctx.warn("Could not extract latest release notes. Using default message.")?;
            let content = write_fallback(ctx, notes_path, version_override)?;
            Ok(NotesReport {
                path: notes_path.to_path_buf(),
                source: NotesSource::Fallback,
                content,
            })
        }
    }
}

fn write_fallback(
    ctx: &mut Context,
    notes_path: &Path,
    version_override: Option<&str>,
) -> Result<String> {
    let version = resolve_version(ctx, version_override)?;
    let content = fallback_notes(&version);
    ctx.fs.write(notes_path, content.as_bytes())?;
    Ok(content)
}

/// The version used for fallback notes: the override if given, else the manifest version.
pub fn resolve_version(ctx: &Context, version_override: Option<&str>) -> Result<String> {
    if let Some(version) = version_override {
        return validation::require_non_empty(version, "version", "Version cannot be empty")
            .map(str::to_string);
    }

    let manifest = Manifest::load(ctx.fs, &ctx.manifest_path())?;
    manifest.version().map(str::to_string).ok_or_else(|| {
        Error::manifest_invalid(ctx.config.files.manifest.as_str(), "missing 'version' field")
    })
}
