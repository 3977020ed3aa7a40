mod common;

use boilerkit::features::{Feature, FeatureSelection};
use boilerkit::setup::{self, SetupOptions};
use boilerkit::templates::TemplateSource;
use common::{drive, manifest, read, write, RecordingRunner};
use tempfile::TempDir;

const ALL_YES: &[&str] = &["", "", "", ""];

#[test]
fn accepting_every_default_installs_all_features() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "package.json", r#"{ "name": "demo", "version": "0.1.0" }"#);

    let outcome = drive(dir.path(), ALL_YES, RecordingRunner::succeeding(), |ctx| {
        setup::run(ctx, &SetupOptions::default())
    });
    let report = outcome.result.unwrap();

    assert_eq!(report.selection, FeatureSelection::all());
    assert_eq!(outcome.asked.len(), 4);
    assert_eq!(outcome.calls, vec![vec!["npx", "husky", "init"]]);

    for path in [
        ".prettierrc",
        "commitlint.config.js",
        ".husky/pre-commit",
        ".versionrc.json",
        "scripts/extract-latest-release.sh",
        "scripts/release.sh",
        ".github/workflows/ci.yml",
        ".github/workflows/release.yml",
    ] {
        assert!(dir.path().join(path).is_file(), "{} was not provisioned", path);
    }

    let pkg = manifest(dir.path());
    assert_eq!(pkg["name"], "demo");
    assert_eq!(pkg["scripts"]["format"], "prettier --write .");
    assert_eq!(pkg["scripts"]["prepare"], "husky");
    assert_eq!(pkg["scripts"]["release"], "sh scripts/release.sh");
    assert_eq!(pkg["scripts"]["release:patch"], "standard-version --release-as patch");
    assert_eq!(pkg["scripts"]["release:minor"], "standard-version --release-as minor");
    assert_eq!(pkg["scripts"]["release:major"], "standard-version --release-as major");
    assert_eq!(pkg["scripts"]["publish:github"], "boilerkit publish");
    assert_eq!(pkg["devDependencies"]["prettier"], "^3.3.3");
    assert_eq!(pkg["devDependencies"]["husky"], "^9.1.6");
    assert_eq!(pkg["devDependencies"]["@commitlint/cli"], "^19.5.0");
    assert_eq!(pkg["devDependencies"]["@commitlint/config-conventional"], "^19.5.0");
    assert_eq!(pkg["devDependencies"]["standard-version"], "^9.5.0");

    assert!(outcome
        .stdout
        .contains("- GitHub Actions workflows for automated CI and releases"));
}

#[test]
fn running_twice_leaves_the_manifest_unchanged() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "package.json", r#"{ "name": "demo" }"#);

    let first = drive(dir.path(), ALL_YES, RecordingRunner::succeeding(), |ctx| {
        setup::run(ctx, &SetupOptions::default())
    });
    assert!(first.result.unwrap().manifest_writes > 0);
    let after_first = read(dir.path(), "package.json");

    let second = drive(dir.path(), ALL_YES, RecordingRunner::succeeding(), |ctx| {
        setup::run(ctx, &SetupOptions::default())
    });
    let report = second.result.unwrap();

    assert!(report.added.is_empty());
    assert_eq!(report.manifest_writes, 0);
    assert_eq!(read(dir.path(), "package.json"), after_first);
}

#[test]
fn declining_everything_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let original = "{\n  \"name\": \"demo\"\n}";
    write(dir.path(), "package.json", original);

    let outcome = drive(dir.path(), &["n", "N", "no", "n"], RecordingRunner::succeeding(), |ctx| {
        setup::run(ctx, &SetupOptions::default())
    });
    let report = outcome.result.unwrap();

    assert!(report.copied.is_empty());
    assert!(outcome.calls.is_empty());
    assert_eq!(read(dir.path(), "package.json"), original);
    assert!(!dir.path().join(".prettierrc").exists());
}

#[test]
fn existing_entries_are_never_overwritten() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "package.json",
        r#"{
  "scripts": { "release": "make release", "prepare": "custom" },
  "devDependencies": { "standard-version": "9.0.0" }
}"#,
    );

    let outcome = drive(dir.path(), ALL_YES, RecordingRunner::succeeding(), |ctx| {
        setup::run(ctx, &SetupOptions::default())
    });
    outcome.result.unwrap();

    let pkg = manifest(dir.path());
    assert_eq!(pkg["scripts"]["release"], "make release");
    assert_eq!(pkg["scripts"]["prepare"], "custom");
    assert_eq!(pkg["devDependencies"]["standard-version"], "9.0.0");
    assert_eq!(pkg["scripts"]["release:minor"], "standard-version --release-as minor");
}

#[test]
fn manifest_key_order_is_preserved() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "package.json",
        r#"{ "version": "1.0.0", "name": "demo", "private": true }"#,
    );

    let outcome = drive(dir.path(), &["y", "n", "n", "n"], RecordingRunner::succeeding(), |ctx| {
        setup::run(ctx, &SetupOptions::default())
    });
    outcome.result.unwrap();

    let content = read(dir.path(), "package.json");
    let version = content.find("\"version\"").unwrap();
    let name = content.find("\"name\"").unwrap();
    let private = content.find("\"private\"").unwrap();
    assert!(version < name && name < private);
    assert!(content.ends_with("}\n"));
}

#[test]
fn configured_dependency_ranges_override_builtins() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "package.json", "{}");
    write(
        dir.path(),
        "boilerkit.json",
        r#"{ "dependencies": { "prettier": "~3.0.0" } }"#,
    );

    let options = SetupOptions {
        selection: Some(FeatureSelection::none().with(Feature::Formatting, true)),
        ..SetupOptions::default()
    };
    let outcome = drive(dir.path(), &[], RecordingRunner::succeeding(), |ctx| {
        setup::run(ctx, &options)
    });
    outcome.result.unwrap();

    assert!(outcome.asked.is_empty());
    assert_eq!(manifest(dir.path())["devDependencies"]["prettier"], "~3.0.0");
}

#[test]
fn directory_templates_replace_bundled_ones() {
    let templates = TempDir::new().unwrap();
    write(templates.path(), ".prettierrc", "{ \"semi\": false }\n");

    let dir = TempDir::new().unwrap();
    write(dir.path(), "package.json", "{}");

    let options = SetupOptions {
        templates: TemplateSource::Directory(templates.path().to_path_buf()),
        selection: Some(FeatureSelection::none().with(Feature::Formatting, true)),
        install: false,
    };
    let outcome = drive(dir.path(), &[], RecordingRunner::succeeding(), |ctx| {
        setup::run(ctx, &options)
    });
    outcome.result.unwrap();

    assert_eq!(read(dir.path(), ".prettierrc"), "{ \"semi\": false }\n");
}

#[test]
fn missing_template_in_directory_fails() {
    let templates = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    write(dir.path(), "package.json", "{}");

    let options = SetupOptions {
        templates: TemplateSource::Directory(templates.path().to_path_buf()),
        selection: Some(FeatureSelection::none().with(Feature::CiWorkflows, true)),
        install: false,
    };
    let outcome = drive(dir.path(), &[], RecordingRunner::succeeding(), |ctx| {
        setup::run(ctx, &options)
    });

    assert_eq!(outcome.result.unwrap_err().code.as_str(), "template.not_found");
}

#[cfg(unix)]
#[test]
fn release_script_is_executable() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    write(dir.path(), "package.json", "{}");

    let options = SetupOptions {
        selection: Some(FeatureSelection::none().with(Feature::Versioning, true)),
        ..SetupOptions::default()
    };
    let outcome = drive(dir.path(), &[], RecordingRunner::succeeding(), |ctx| {
        setup::run(ctx, &options)
    });
    outcome.result.unwrap();

    let mode = std::fs::metadata(dir.path().join("scripts/release.sh"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o111, 0o111);
}

#[test]
fn invalid_manifest_is_reported() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "package.json", "[1, 2]");

    let outcome = drive(dir.path(), ALL_YES, RecordingRunner::succeeding(), |ctx| {
        setup::run(ctx, &SetupOptions::default())
    });

    assert_eq!(outcome.result.unwrap_err().code.as_str(), "manifest.invalid");
    assert!(outcome.stderr.is_empty());
}
