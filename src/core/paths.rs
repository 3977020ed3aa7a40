use std::path::{Path, PathBuf};

/// Project-local config file name
pub const CONFIG_FILE: &str = "boilerkit.json";

/// Project-local boilerkit.json path
pub fn config_file(project_dir: &Path) -> PathBuf {
    project_dir.join(CONFIG_FILE)
}

/// Expand a leading `~` and resolve relative paths against `base`.
pub fn resolve(base: &Path, raw: &str) -> PathBuf {
    let expanded = shellexpand::tilde(raw).to_string();
    let path = PathBuf::from(expanded);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
