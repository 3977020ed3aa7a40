//! Optional automation features and the files each one provisions.

use crate::context::Prompter;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvisionEntry {
    /// Path relative to the template source.
    pub src: &'static str,
    /// Path relative to the target project.
    pub dest: &'static str,
}

const fn same(path: &'static str) -> ProvisionEntry {
    ProvisionEntry {
        src: path,
        dest: path,
    }
}

const FORMATTING_FILES: &[ProvisionEntry] = &[same(".prettierrc")];

const COMMIT_HOOK_FILES: &[ProvisionEntry] =
    &[same("commitlint.config.js"), same(".husky/pre-commit")];

const VERSIONING_FILES: &[ProvisionEntry] = &[
    same(".versionrc.json"),
    same("scripts/extract-latest-release.sh"),
    same("scripts/release.sh"),
];

const CI_FILES: &[ProvisionEntry] = &[
    same(".github/workflows/ci.yml"),
    same(".github/workflows/release.yml"),
];

/// The release script marked executable when versioning is enabled.
pub const RELEASE_SCRIPT: &str = "scripts/release.sh";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Formatting,
    CommitHooks,
    Versioning,
    CiWorkflows,
}

impl Feature {
    /// Every feature, in prompt order.
    pub const ALL: [Feature; 4] = [
        Feature::Formatting,
        Feature::CommitHooks,
        Feature::Versioning,
        Feature::CiWorkflows,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Feature::Formatting => "formatting",
            Feature::CommitHooks => "commit-hooks",
            Feature::Versioning => "versioning",
            Feature::CiWorkflows => "ci",
        }
    }

    pub fn question(&self) -> &'static str {
        match self {
            Feature::Formatting => "Setup Prettier code formatting? (Y/n): ",
            Feature::CommitHooks => "Setup Husky pre-commit hooks? (Y/n): ",
            Feature::Versioning => "Setup conventional version bumping? (Y/n): ",
            Feature::CiWorkflows => "Setup GitHub Actions workflows? (Y/n): ",
        }
    }

    /// Line printed in the setup summary.
    pub fn summary(&self) -> &'static str {
        match self {
            Feature::Formatting => "Prettier for code formatting",
            Feature::CommitHooks => "Husky pre-commit hooks for commit message linting",
            Feature::Versioning => "Conventional version bumping with standard-version",
            Feature::CiWorkflows => "GitHub Actions workflows for automated CI and releases",
        }
    }

    pub fn files(&self) -> &'static [ProvisionEntry] {
        match self {
            Feature::Formatting => FORMATTING_FILES,
            Feature::CommitHooks => COMMIT_HOOK_FILES,
            Feature::Versioning => VERSIONING_FILES,
            Feature::CiWorkflows => CI_FILES,
        }
    }

    fn index(&self) -> usize {
        match self {
            Feature::Formatting => 0,
            Feature::CommitHooks => 1,
            Feature::Versioning => 2,
            Feature::CiWorkflows => 3,
        }
    }
}

/// Which features the operator enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSelection {
    enabled: [bool; 4],
}

impl FeatureSelection {
    pub fn all() -> Self {
        Self { enabled: [true; 4] }
    }

    pub fn none() -> Self {
        Self { enabled: [false; 4] }
    }

    pub fn with(mut self, feature: Feature, enabled: bool) -> Self {
        self.enabled[feature.index()] = enabled;
        self
    }

    pub fn is_enabled(&self, feature: Feature) -> bool {
        self.enabled[feature.index()]
    }

    /// Enabled features, in prompt order.
    pub fn enabled(&self) -> impl Iterator<Item = Feature> + '_ {
        Feature::ALL.into_iter().filter(|f| self.is_enabled(*f))
    }

    /// Ask once per feature, in order. Anything but an explicit no enables it.
    pub fn prompt(prompter: &mut dyn Prompter) -> Result<Self> {
        let mut selection = Self::none();
        for feature in Feature::ALL {
            let answer = prompter.ask(feature.question())?;
            selection = selection.with(feature, is_affirmative(&answer));
        }
        Ok(selection)
    }
}

/// Default-yes answer parsing: only `n` or `no` (any case) decline.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    !(answer.eq_ignore_ascii_case("n") || answer.eq_ignore_ascii_case("no"))
}
