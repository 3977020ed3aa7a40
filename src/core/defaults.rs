use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::paths;
use crate::utils::io;

/// Root configuration structure for boilerkit.json
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoilerkitConfig {
    #[serde(default)]
    pub files: FilesConfig,

    /// Version ranges used when adding dev dependencies.
    /// Entries here override the built-in ranges one package at a time.
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,

    #[serde(default)]
    pub commands: CommandsConfig,
}

/// File names resolved against the working directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilesConfig {
    #[serde(default = "default_changelog")]
    pub changelog: String,

    #[serde(default = "default_release_notes")]
    pub release_notes: String,

    #[serde(default = "default_manifest")]
    pub manifest: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            changelog: default_changelog(),
            release_notes: default_release_notes(),
            manifest: default_manifest(),
        }
    }
}

/// External collaborators, as argv arrays. Never passed through a shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandsConfig {
    #[serde(default = "default_hook_init")]
    pub hook_init: Vec<String>,

    /// The release type is appended as the final argument.
    #[serde(default = "default_version_bump")]
    pub version_bump: Vec<String>,

    /// The tag, `-F` and the notes file are appended.
    #[serde(default = "default_publish")]
    pub publish: Vec<String>,

    #[serde(default = "default_install")]
    pub install: Vec<String>,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            hook_init: default_hook_init(),
            version_bump: default_version_bump(),
            publish: default_publish(),
            install: default_install(),
        }
    }
}

impl BoilerkitConfig {
    /// Version range for a dev dependency, falling back to the built-in range.
    pub fn dependency_version(&self, package: &str) -> String {
        self.dependencies
            .get(package)
            .cloned()
            .or_else(|| builtin_dependency_version(package).map(str::to_string))
            .unwrap_or_else(|| "latest".to_string())
    }

    /// Reject command entries that cannot be run.
    pub fn validate(&self) -> Result<()> {
        let commands = [
            ("commands.hook_init", &self.commands.hook_init),
            ("commands.version_bump", &self.commands.version_bump),
            ("commands.publish", &self.commands.publish),
            ("commands.install", &self.commands.install),
        ];
        for (key, argv) in commands {
            if argv.first().map_or(true, |program| program.trim().is_empty()) {
                return Err(Error::config_invalid_value(
                    key,
                    Some(format!("{:?}", argv)),
                    "must name a program to run",
                ));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_changelog() -> String {
    "CHANGELOG.md".to_string()
}

fn default_release_notes() -> String {
    "LATEST_RELEASE.md".to_string()
}

fn default_manifest() -> String {
    "package.json".to_string()
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

fn default_hook_init() -> Vec<String> {
    argv(&["npx", "husky", "init"])
}

fn default_version_bump() -> Vec<String> {
    argv(&["npx", "standard-version", "--release-as"])
}

fn default_publish() -> Vec<String> {
    argv(&["gh", "release", "create"])
}

fn default_install() -> Vec<String> {
    argv(&["npm", "install"])
}

const BUILTIN_DEPENDENCIES: &[(&str, &str)] = &[
    ("prettier", "^3.3.3"),
    ("husky", "^9.1.6"),
    ("@commitlint/cli", "^19.5.0"),
    ("@commitlint/config-conventional", "^19.5.0"),
    ("standard-version", "^9.5.0"),
];

fn builtin_dependency_version(package: &str) -> Option<&'static str> {
    BUILTIN_DEPENDENCIES
        .iter()
        .find(|(name, _)| *name == package)
        .map(|(_, version)| *version)
}

// =============================================================================
// Loading functions
// =============================================================================

/// Load boilerkit.json from the project directory.
/// A missing file yields built-in defaults; an unreadable or invalid file is an error.
pub fn load_config(project_dir: &Path) -> Result<BoilerkitConfig> {
    let path = paths::config_file(project_dir);

    if !path.exists() {
        return Ok(BoilerkitConfig::default());
    }

    let content = io::read_file(&path, &format!("read {}", path.display()))?;

    let config: BoilerkitConfig = serde_json::from_str(&content)
        .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))?;
    config.validate()?;
    Ok(config)
}

/// Save config to boilerkit.json in the project directory (creates if missing).
pub fn save_config(project_dir: &Path, config: &BoilerkitConfig) -> Result<()> {
    let path = paths::config_file(project_dir);

    let content = serde_json::to_string_pretty(config).map_err(|e| {
        Error::internal_json(e.to_string(), Some("serialize boilerkit.json".to_string()))
    })?;

    io::write_file(
        &path,
        content.as_bytes(),
        &format!("write {}", path.display()),
    )
}

/// Get built-in defaults (ignoring any file config)
pub fn builtin_defaults() -> BoilerkitConfig {
    BoilerkitConfig::default()
}
