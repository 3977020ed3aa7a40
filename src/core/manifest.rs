//! The target project's `package.json`.
//!
//! The manifest keeps every top-level field in its original order so a
//! rewrite only differs where an entry was added. All mutation goes through
//! [`Manifest::merge_if_absent`], which never replaces an existing key.

use serde_json::{Map, Value};
use std::path::Path;

use crate::context::FileSystem;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestSection {
    Scripts,
    Dependencies,
    DevDependencies,
}

impl ManifestSection {
    pub fn key(&self) -> &'static str {
        match self {
            ManifestSection::Scripts => "scripts",
            ManifestSection::Dependencies => "dependencies",
            ManifestSection::DevDependencies => "devDependencies",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    name: String,
    fields: Map<String, Value>,
}

impl Manifest {
    /// Parse manifest JSON. The document must be an object.
    pub fn parse(content: &str, path: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).map_err(|e| {
            Error::validation_invalid_json(e, Some(format!("parse {}", path)))
        })?;

        match value {
            Value::Object(fields) => Ok(Self {
                name: path.to_string(),
                fields,
            }),
            _ => Err(Error::manifest_invalid(path, "top-level value must be an object")),
        }
    }

    /// Read and parse the manifest. A missing file is a `manifest.not_found` error.
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self> {
        if !fs.exists(path) {
            return Err(Error::manifest_not_found(display_name(path)));
        }

        let content = fs.read_to_string(path)?;
        Self::parse(&content, &display_name(path))
    }

    /// Serialize with two-space indentation and a trailing newline.
    pub fn to_json_string(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(&self.fields).map_err(|e| {
            Error::internal_json(e.to_string(), Some("serialize manifest".to_string()))
        })?;
        out.push('\n');
        Ok(out)
    }

    pub fn save(&self, fs: &dyn FileSystem, path: &Path) -> Result<()> {
        fs.write(path, self.to_json_string()?.as_bytes())
    }

    pub fn version(&self) -> Option<&str> {
        self.fields.get("version").and_then(Value::as_str)
    }

    /// Look up an entry in a section. Absent sections have no entries.
    pub fn get(&self, section: ManifestSection, key: &str) -> Option<&Value> {
        self.fields
            .get(section.key())
            .and_then(Value::as_object)
            .and_then(|entries| entries.get(key))
    }

    pub fn contains(&self, section: ManifestSection, key: &str) -> bool {
        self.get(section, key).is_some()
    }

    /// True when the package is declared as a runtime or dev dependency.
    pub fn has_dependency(&self, package: &str) -> bool {
        self.contains(ManifestSection::Dependencies, package)
            || self.contains(ManifestSection::DevDependencies, package)
    }

    /// Insert `key = value` into a section unless the key is already present.
    ///
    /// Creates the section when missing. Returns whether an entry was added.
    /// A section that exists but is not an object is an error.
    pub fn merge_if_absent(
        &mut self,
        section: ManifestSection,
        key: &str,
        value: impl Into<Value>,
    ) -> Result<bool> {
        let Self { name, fields } = self;
        let entries = fields
            .entry(section.key())
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| {
                Error::manifest_invalid(
                    name.as_str(),
                    format!("'{}' must be an object", section.key()),
                )
            })?;

        if entries.contains_key(key) {
            return Ok(false);
        }

        entries.insert(key.to_string(), value.into());
        Ok(true)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
