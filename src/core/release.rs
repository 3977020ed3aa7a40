//! Interactive release-type prompt and version bump delegation.

use semver::Version;
use std::fmt;
use std::str::FromStr;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::utils::validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReleaseType {
    #[default]
    Patch,
    Minor,
    Major,
}

impl ReleaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseType::Patch => "patch",
            ReleaseType::Minor => "minor",
            ReleaseType::Major => "major",
        }
    }

    /// Resolve a prompt answer. Empty or unrecognized answers mean patch.
    ///
    /// Accepts `0`/`p`/`patch`, `1`/`m`/`minor`, `2`/`M`/`major`. Only the
    /// single-letter codes are case sensitive, so `M` is major and `m` is minor.
    /// This differs from a lowercase-first match, where `M` would resolve to minor.
    pub fn from_answer(answer: &str) -> Self {
        let answer = answer.trim();
        if answer == "M" {
            return ReleaseType::Major;
        }

        match answer.to_lowercase().as_str() {
            "1" | "m" | "minor" => ReleaseType::Minor,
            "2" | "major" => ReleaseType::Major,
            _ => ReleaseType::Patch,
        }
    }

    /// The version this release type produces from `current`, or `None` when
    /// the bumped component would overflow.
    pub fn apply(&self, current: &Version) -> Option<Version> {
        let next = match self {
            ReleaseType::Patch => {
                Version::new(current.major, current.minor, current.patch.checked_add(1)?)
            }
            ReleaseType::Minor => Version::new(current.major, current.minor.checked_add(1)?, 0),
            ReleaseType::Major => Version::new(current.major.checked_add(1)?, 0, 0),
        };
        Some(next)
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReleaseType {
    type Err = Error;

    /// Strict parsing for command-line flags: full names only.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "patch" => Ok(ReleaseType::Patch),
            "minor" => Ok(ReleaseType::Minor),
            "major" => Ok(ReleaseType::Major),
            _ => Err(Error::validation_invalid_argument(
                "type",
                format!("Unknown release type '{}'", s),
                Some(vec![
                    "patch".to_string(),
                    "minor".to_string(),
                    "major".to_string(),
                ]),
            )),
        }
    }
}

pub const RELEASE_QUESTION: &str = "Select release type [0/1/2 or p/m/M] (default: 0=patch): ";

/// Print the release-type menu and ask for a choice.
///
/// When the manifest version parses as semver, each option shows the version
/// it would produce.
pub fn prompt_release_type(ctx: &mut Context) -> Result<ReleaseType> {
    let current = current_version(ctx);

    ctx.say("Release")?;
    ctx.say("----------------------------------------")?;
    ctx.say("The release type determines which part of the version number is incremented:")?;
    for (codes, release_type, purpose) in [
        ("0 or p", ReleaseType::Patch, "bug fixes"),
        ("1 or m", ReleaseType::Minor, "new features"),
        ("2 or M", ReleaseType::Major, "breaking changes"),
    ] {
        let preview = current
            .as_ref()
            .and_then(|version| Some((version, release_type.apply(version)?)));
        let line = match preview {
            Some((version, next)) => format!(
                "- {}: {}: {} -> {} (for {})",
                codes, release_type, version, next, purpose
            ),
            None => format!("- {}: {} (for {})", codes, release_type, purpose),
        };
        ctx.say(line)?;
    }
    ctx.say("----------------------------------------")?;

    let answer = ctx.ask(RELEASE_QUESTION)?;
    Ok(ReleaseType::from_answer(&answer))
}

/// Run the configured version-bump tool for `release_type`.
///
/// The tool inherits the terminal. A non-zero exit fails the release.
pub fn bump(ctx: &mut Context, release_type: ReleaseType) -> Result<()> {
    let base = ctx.config.commands.version_bump.clone();
    validation::require_non_empty_vec(&base, "commands.version_bump", "Version bump command is empty")?;

    let mut argv = base;
    argv.push(release_type.as_str().to_string());

    ctx.say("")?;
    ctx.say(format_args!("Creating {} release...", release_type))?;
    crate::log_status!("release", "Running {}", crate::utils::command::display_argv(&argv));

    ctx.run_checked(&argv)?;

    ctx.say("")?;
    ctx.say("Release created successfully!")?;
    ctx.say("")?;
    ctx.say("Next steps:")?;
    ctx.say("1. Push the changes: git push --follow-tags origin main")?;
    ctx.say("2. Create a GitHub release: npm run publish:github")?;
    Ok(())
}

fn current_version(ctx: &Context) -> Option<Version> {
    let manifest = Manifest::load(ctx.fs, &ctx.manifest_path()).ok()?;
    Version::parse(manifest.version()?).ok()
}
