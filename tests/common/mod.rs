#![allow(dead_code)]

use std::fs;
use std::path::Path;

use boilerkit::context::{CommandRunner, Context, LocalFs, ScriptedPrompter};
use boilerkit::defaults;
use boilerkit::Result;

/// Records every command and answers each with a fixed exit code.
pub struct RecordingRunner {
    pub calls: Vec<Vec<String>>,
    pub exit_code: Option<i32>,
}

impl RecordingRunner {
    pub fn succeeding() -> Self {
        Self {
            calls: Vec::new(),
            exit_code: Some(0),
        }
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, argv: &[String], _dir: &Path) -> Result<Option<i32>> {
        self.calls.push(argv.to_vec());
        Ok(self.exit_code)
    }
}

pub struct Outcome<T> {
    pub result: Result<T>,
    pub calls: Vec<Vec<String>>,
    pub asked: Vec<String>,
    pub stdout: String,
    pub stderr: String,
}

/// Run a flow in `dir` with scripted answers, loading boilerkit.json from `dir`.
pub fn drive<T>(
    dir: &Path,
    answers: &[&str],
    mut runner: RecordingRunner,
    flow: impl FnOnce(&mut Context) -> Result<T>,
) -> Outcome<T> {
    let mut prompter = ScriptedPrompter::new(answers.iter().copied());
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let result = {
        let mut ctx = Context {
            cwd: dir.to_path_buf(),
            config: defaults::load_config(dir).unwrap(),
            fs: &LocalFs,
            prompter: &mut prompter,
            runner: &mut runner,
            out: &mut out,
            err: &mut err,
        };
        flow(&mut ctx)
    };

    Outcome {
        result,
        calls: runner.calls,
        asked: prompter.asked().to_vec(),
        stdout: String::from_utf8(out).unwrap(),
        stderr: String::from_utf8(err).unwrap(),
    }
}

pub fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

pub fn read(dir: &Path, relative: &str) -> String {
    fs::read_to_string(dir.join(relative)).unwrap()
}

pub fn manifest(dir: &Path) -> serde_json::Value {
    serde_json::from_str(&read(dir, "package.json")).unwrap()
}
