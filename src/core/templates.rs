//! Template files provisioned into target projects.
//!
//! The default source is the template tree compiled into the binary. A
//! directory source reads the same relative paths from disk instead.

use std::borrow::Cow;
use std::path::PathBuf;

use crate::context::FileSystem;
use crate::error::{Error, Result};

const EMBEDDED: &[(&str, &str)] = &[
    (".prettierrc", include_str!("../../templates/.prettierrc")),
    (
        "commitlint.config.js",
        include_str!("../../templates/commitlint.config.js"),
    ),
    (".husky/pre-commit", include_str!("../../templates/.husky/pre-commit")),
    (".versionrc.json", include_str!("../../templates/.versionrc.json")),
    (
        "scripts/extract-latest-release.sh",
        include_str!("../../templates/scripts/extract-latest-release.sh"),
    ),
    ("scripts/release.sh", include_str!("../../templates/scripts/release.sh")),
    (
        ".github/workflows/ci.yml",
        include_str!("../../templates/.github/workflows/ci.yml"),
    ),
    (
        ".github/workflows/release.yml",
        include_str!("../../templates/.github/workflows/release.yml"),
    ),
];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TemplateSource {
    #[default]
    Embedded,
    Directory(PathBuf),
}

impl TemplateSource {
    /// Read a template by its relative path.
    pub fn read<'a>(&self, fs: &dyn FileSystem, relative: &'a str) -> Result<Cow<'a, [u8]>> {
        match self {
            TemplateSource::Embedded => embedded(relative)
                .map(|content| Cow::Borrowed(content.as_bytes()))
                .ok_or_else(|| Error::template_not_found(relative, self.describe())),
            TemplateSource::Directory(root) => {
                let path = root.join(relative);
                if !fs.exists(&path) {
                    return Err(Error::template_not_found(relative, self.describe()));
                }
                fs.read(&path).map(Cow::Owned)
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            TemplateSource::Embedded => "embedded templates".to_string(),
            TemplateSource::Directory(root) => root.display().to_string(),
        }
    }
}

/// Look up an embedded template by relative path.
pub fn embedded(relative: &str) -> Option<&'static str> {
    EMBEDDED
        .iter()
        .find(|(path, _)| *path == relative)
        .map(|(_, content)| *content)
}

/// Relative paths of every embedded template.
pub fn embedded_paths() -> impl Iterator<Item = &'static str> {
    EMBEDDED.iter().map(|(path, _)| *path)
}
