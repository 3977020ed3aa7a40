//! One-time project automation installer.
//!
//! Order of operations:
//! 1. Require the manifest (before any prompt).
//! 2. Gather the feature selection.
//! 3. Copy every enabled feature's templates.
//! 4. Apply each feature's manifest additions, writing after each block
//!    that changed something (formatting, commit hooks, versioning).
//! 5. Optionally install added dependencies.
//! 6. Run the hook initializer when commit hooks are enabled.
//! 7. Print the summary.

use std::path::{Path, PathBuf};

use crate::context::Context;
use crate::error::{Error, Result};
use crate::features::{Feature, FeatureSelection, ProvisionEntry, RELEASE_SCRIPT};
use crate::manifest::{Manifest, ManifestSection};
use crate::templates::TemplateSource;

const FORMAT_SCRIPT: &str = "prettier --write .";
const PREPARE_SCRIPT: &str = "husky";
const RELEASE_SCRIPT_COMMAND: &str = "sh scripts/release.sh";
const PUBLISH_SCRIPT: &str = "boilerkit publish";

const FORMATTING_DEPENDENCIES: &[&str] = &["prettier"];
const COMMIT_HOOK_DEPENDENCIES: &[&str] =
    &["husky", "@commitlint/cli", "@commitlint/config-conventional"];
const VERSIONING_DEPENDENCIES: &[&str] = &["standard-version"];

#[derive(Debug, Clone, Default)]
pub struct SetupOptions {
    pub templates: TemplateSource,
    /// Skip prompting and use this selection.
    pub selection: Option<FeatureSelection>,
    /// Run the configured install command when dependencies were added.
    pub install: bool,
}

#[derive(Debug, Clone)]
pub struct SetupReport {
    pub selection: FeatureSelection,
    pub copied: Vec<PathBuf>,
    /// Added manifest entries as `section.key`.
    pub added: Vec<String>,
    pub manifest_writes: usize,
    pub installed: bool,
}

impl SetupReport {
    fn new(selection: FeatureSelection) -> Self {
        Self {
            selection,
            copied: Vec::new(),
            added: Vec::new(),
            manifest_writes: 0,
            installed: false,
        }
    }

    fn dependencies_added(&self) -> bool {
        let prefix = format!("{}.", ManifestSection::DevDependencies.key());
        self.added.iter().any(|entry| entry.starts_with(&prefix))
    }
}

pub fn run(ctx: &mut Context, options: &SetupOptions) -> Result<SetupReport> {
    let manifest_path = ctx.manifest_path();
    if !ctx.fs.exists(&manifest_path) {
        return Err(Error::manifest_not_found(ctx.config.files.manifest.as_str()));
    }

    ctx.say("Setting up project automation...")?;

    let manifest_name = ctx.config.files.manifest.clone();
    let mut manifest = Manifest::load(ctx.fs, &manifest_path)?;

    let selection = match options.selection {
        Some(selection) => selection,
        None => FeatureSelection::prompt(&mut *ctx.prompter)?,
    };
    let mut report = SetupReport::new(selection);

    for feature in selection.enabled() {
        crate::log_status!("setup", "Provisioning {} templates", feature.id());
        for entry in feature.files() {
            let dest = provision(ctx, &options.templates, entry)?;
            report.copied.push(dest);
        }
    }

    if selection.is_enabled(Feature::Formatting) {
        let mut block = Block::new(&mut manifest, &mut report);
        block.dependencies(ctx, FORMATTING_DEPENDENCIES)?;
        block.script("format", FORMAT_SCRIPT)?;
        if block.finish(ctx, &manifest_path)? {
            ctx.say(format_args!("Added format script to {}", manifest_name))?;
        }
    }

    if selection.is_enabled(Feature::CommitHooks) {
        let mut block = Block::new(&mut manifest, &mut report);
        block.dependencies(ctx, COMMIT_HOOK_DEPENDENCIES)?;
        block.script("prepare", PREPARE_SCRIPT)?;
        if block.finish(ctx, &manifest_path)? {
            ctx.say(format_args!("Added prepare script to {}", manifest_name))?;
        }
    }

    if selection.is_enabled(Feature::Versioning) {
        ctx.fs.set_executable(&ctx.path(RELEASE_SCRIPT))?;

        let mut block = Block::new(&mut manifest, &mut report);
        block.dependencies(ctx, VERSIONING_DEPENDENCIES)?;
        block.script("release", RELEASE_SCRIPT_COMMAND)?;
        for release_type in ["patch", "minor", "major"] {
            block.script(
                &format!("release:{}", release_type),
                &format!("standard-version --release-as {}", release_type),
            )?;
        }
        block.script("publish:github", PUBLISH_SCRIPT)?;
        if block.finish(ctx, &manifest_path)? {
            ctx.say(format_args!("Added release scripts to {}", manifest_name))?;
        }
    }

    if options.install && report.dependencies_added() {
        install_dependencies(ctx, &mut report)?;
    }

    // The hook initializer expects husky to be installed already.
    if selection.is_enabled(Feature::CommitHooks) {
        ctx.say("Setting up husky...")?;
        let hook_init = ctx.config.commands.hook_init.clone();
        ctx.run_checked(&hook_init)?;
    }

    ctx.say("")?;
    ctx.say("Setup complete! The following features were installed:")?;
    for feature in selection.enabled() {
        ctx.say(format_args!("- {}", feature.summary()))?;
    }

    Ok(report)
}

fn install_dependencies(ctx: &mut Context, report: &mut SetupReport) -> Result<()> {
    ctx.say("Installing dependencies...")?;
    let install = ctx.config.commands.install.clone();
    ctx.run_checked(&install)?;
    report.installed = true;
    Ok(())
}

/// Copy one template into the project, creating parent directories.
/// Existing files are overwritten.
fn provision(
    ctx: &mut Context,
    templates: &TemplateSource,
    entry: &ProvisionEntry,
) -> Result<PathBuf> {
    let content = templates.read(ctx.fs, entry.src)?;
    let dest = ctx.path(entry.dest);

    if let Some(parent) = dest.parent() {
        ctx.fs.create_dir_all(parent)?;
    }
    ctx.fs.write(&dest, &content)?;
    ctx.say(format_args!("Copied {} to {}", entry.src, entry.dest))?;

    Ok(dest)
}

/// Manifest additions for one feature. Written back only if something changed.
struct Block<'m> {
    manifest: &'m mut Manifest,
    report: &'m mut SetupReport,
    changed: bool,
}

impl<'m> Block<'m> {
    fn new(manifest: &'m mut Manifest, report: &'m mut SetupReport) -> Self {
        Self {
            manifest,
            report,
            changed: false,
        }
    }

    fn merge(&mut self, section: ManifestSection, key: &str, value: String) -> Result<()> {
        if self.manifest.merge_if_absent(section, key, value)? {
            self.report.added.push(format!("{}.{}", section.key(), key));
            self.changed = true;
        }
        Ok(())
    }

    fn dependencies(&mut self, ctx: &Context, packages: &[&str]) -> Result<()> {
        for package in packages {
            if self.manifest.has_dependency(package) {
                continue;
            }
            let version = ctx.config.dependency_version(package);
            self.merge(ManifestSection::DevDependencies, package, version)?;
        }
        Ok(())
    }

    fn script(&mut self, name: &str, command: &str) -> Result<()> {
        self.merge(ManifestSection::Scripts, name, command.to_string())
    }

    fn finish(self, ctx: &Context, path: &Path) -> Result<bool> {
        if self.changed {
            self.manifest.save(ctx.fs, path)?;
            self.report.manifest_writes += 1;
        }
        Ok(self.changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{CommandRunner, LocalFs, ScriptedPrompter};
    use crate::defaults::BoilerkitConfig;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Default)]
    struct Recorder(Vec<Vec<String>>);

    impl CommandRunner for Recorder {
        fn run(&mut self, argv: &[String], _dir: &Path) -> Result<Option<i32>> {
            self.0.push(argv.to_vec());
            Ok(Some(0))
        }
    }

    fn setup(dir: &Path, answers: &[&str], options: &SetupOptions) -> (Result<SetupReport>, Recorder, String) {
        let mut prompter = ScriptedPrompter::new(answers.iter().copied());
        let mut runner = Recorder::default();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let result = {
            let mut ctx = Context {
                cwd: dir.to_path_buf(),
                config: BoilerkitConfig::default(),
                fs: &LocalFs,
                prompter: &mut prompter,
                runner: &mut runner,
                out: &mut out,
                err: &mut err,
            };
            run(&mut ctx, options)
        };
        (result, runner, String::from_utf8(out).unwrap())
    }

    #[test]
    fn missing_manifest_fails_before_prompting() {
        let dir = TempDir::new().unwrap();
        let mut prompter = ScriptedPrompter::default();
        let mut runner = Recorder::default();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let mut ctx = Context {
            cwd: dir.path().to_path_buf(),
            config: BoilerkitConfig::default(),
            fs: &LocalFs,
            prompter: &mut prompter,
            runner: &mut runner,
            out: &mut out,
            err: &mut err,
        };

        let error = run(&mut ctx, &SetupOptions::default()).unwrap_err();
        assert_eq!(error.code.as_str(), "manifest.not_found");
        drop(ctx);
        assert!(prompter.asked().is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn formatting_only_adds_prettier_and_format_script() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{ "name": "demo" }"#).unwrap();

        let (result, runner, out) = setup(dir.path(), &["y", "n", "n", "n"], &SetupOptions::default());
        let report = result.unwrap();

        assert_eq!(report.added, vec!["devDependencies.prettier", "scripts.format"]);
        assert_eq!(report.manifest_writes, 1);
        assert!(dir.path().join(".prettierrc").exists());
        assert!(!dir.path().join(".husky").exists());
        assert!(runner.0.is_empty());
        assert!(out.contains("Copied .prettierrc to .prettierrc"));
        assert!(out.ends_with("- Prettier for code formatting\n"));
    }

    #[test]
    fn commit_hooks_run_hook_initializer() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();

        let (result, runner, _) = setup(dir.path(), &["n", "", "n", "n"], &SetupOptions::default());
        result.unwrap();

        assert_eq!(runner.0, vec![vec!["npx", "husky", "init"]]);
        assert!(dir.path().join(".husky/pre-commit").exists());
        assert!(dir.path().join("commitlint.config.js").exists());
    }

    #[test]
    fn existing_dependency_in_dependencies_is_not_duplicated() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{ "dependencies": { "prettier": "2.8.0" }, "scripts": { "format": "prettier -w src" } }"#,
        )
        .unwrap();

        let (result, _, out) = setup(dir.path(), &["y", "n", "n", "n"], &SetupOptions::default());
        let report = result.unwrap();

        assert!(report.added.is_empty());
        assert_eq!(report.manifest_writes, 0);
        assert!(!out.contains("Added format script"));
    }

    #[test]
    fn install_runs_only_when_dependencies_were_added() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();
        let options = SetupOptions {
            selection: Some(FeatureSelection::none().with(Feature::Formatting, true)),
            install: true,
            ..SetupOptions::default()
        };

        let (first, runner, _) = setup(dir.path(), &[], &options);
        assert!(first.unwrap().installed);
        assert_eq!(runner.0, vec![vec!["npm", "install"]]);

        let (second, runner, _) = setup(dir.path(), &[], &options);
        assert!(!second.unwrap().installed);
        assert!(runner.0.is_empty());
    }

    #[test]
    fn install_runs_before_hook_initializer() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();
        let options = SetupOptions {
            selection: Some(
                FeatureSelection::none()
                    .with(Feature::CommitHooks, true)
                    .with(Feature::Versioning, true),
            ),
            install: true,
            ..SetupOptions::default()
        };

        let (result, runner, _) = setup(dir.path(), &[], &options);

        assert!(result.unwrap().installed);
        assert_eq!(
            runner.0,
            vec![vec!["npm", "install"], vec!["npx", "husky", "init"]]
        );
    }

    #[test]
    fn failing_hook_initializer_fails_setup() {
        struct Failing;
        impl CommandRunner for Failing {
            fn run(&mut self, _argv: &[String], _dir: &Path) -> Result<Option<i32>> {
                Ok(Some(1))
            }
        }

        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();
        let mut prompter = ScriptedPrompter::new(["n", "y", "n", "n"]);
        let mut runner = Failing;
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let mut ctx = Context {
            cwd: dir.path().to_path_buf(),
            config: BoilerkitConfig::default(),
            fs: &LocalFs,
            prompter: &mut prompter,
            runner: &mut runner,
            out: &mut out,
            err: &mut err,
        };

        let error = run(&mut ctx, &SetupOptions::default()).unwrap_err();
        assert_eq!(error.code.as_str(), "command.failed");

        // The manifest block was written before the initializer ran.
        let manifest = fs::read_to_string(dir.path().join("package.json")).unwrap();
        assert!(manifest.contains("\"prepare\": \"husky\""));
    }
}
