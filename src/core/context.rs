//! Execution context shared by every flow.
//!
//! A [`Context`] carries the working directory, the loaded configuration and
//! the four capabilities a flow may touch: the filesystem, the operator prompt,
//! external commands, and the output streams. Nothing is read from globals, so
//! tests drive flows with scripted answers and recorded commands.

use std::collections::VecDeque;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::defaults::BoilerkitConfig;
use crate::error::{Error, Result};
use crate::utils::{command, io};

/// Filesystem operations used by the flows.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn write(&self, path: &Path, content: &[u8]) -> Result<()>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn set_executable(&self, path: &Path) -> Result<()>;
}

/// The local disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        io::read_bytes(path, &format!("read {}", path.display()))
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        io::read_file(path, &format!("read {}", path.display()))
    }

    fn write(&self, path: &Path, content: &[u8]) -> Result<()> {
        io::write_file(path, content, &format!("write {}", path.display()))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        io::ensure_dir(path, &format!("create {}", path.display()))
    }

    fn set_executable(&self, path: &Path) -> Result<()> {
        io::make_executable(path, &format!("chmod {}", path.display()))
    }
}

/// Asks the operator a question and returns the raw answer.
pub trait Prompter {
    fn ask(&mut self, question: &str) -> Result<String>;
}

/// Prompts on a writer and reads one line per answer.
///
/// End of input is treated as an empty answer.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)
            .and_then(|_| self.output.flush())
            .map_err(|e| Error::internal_io(e.to_string(), Some("write prompt".to_string())))?;

        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .map_err(|e| Error::internal_io(e.to_string(), Some("read input".to_string())))?;

        Ok(line.trim().to_string())
    }
}

/// Answers from a fixed script, then empty answers once the script runs out.
///
/// Used for `--yes` runs and in tests.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Questions asked so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &str) -> Result<String> {
        self.asked.push(question.to_string());
        Ok(self.answers.pop_front().unwrap_or_default())
    }
}

/// Runs an external command to completion.
pub trait CommandRunner {
    /// Returns the exit code, or `None` when the process was killed by a signal.
    fn run(&mut self, argv: &[String], dir: &Path) -> Result<Option<i32>>;
}

/// Spawns real processes with inherited stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, argv: &[String], dir: &Path) -> Result<Option<i32>> {
        command::run_inherited(argv, dir)
    }
}

pub struct Context<'a> {
    pub cwd: PathBuf,
    pub config: BoilerkitConfig,
    pub fs: &'a dyn FileSystem,
    pub prompter: &'a mut dyn Prompter,
    pub runner: &'a mut dyn CommandRunner,
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
}

impl Context<'_> {
    /// Resolve a project-relative path against the working directory.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.cwd.join(relative)
    }

    pub fn changelog_path(&self) -> PathBuf {
        self.path(&self.config.files.changelog)
    }

    pub fn release_notes_path(&self) -> PathBuf {
        self.path(&self.config.files.release_notes)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.path(&self.config.files.manifest)
    }

    /// Write one line to the output stream.
    pub fn say(&mut self, message: impl Display) -> Result<()> {
        write_line(&mut *self.out, message, "write output")
    }

    /// Write one warning line to the error stream.
    pub fn warn(&mut self, message: impl Display) -> Result<()> {
        write_line(&mut *self.err, format_args!("Warning: {}", message), "write warning")
    }

    pub fn ask(&mut self, question: &str) -> Result<String> {
        self.prompter.ask(question)
    }

    /// Run an external command in the working directory; a non-zero exit is an error.
    pub fn run_checked(&mut self, argv: &[String]) -> Result<()> {
        let code = self.runner.run(argv, &self.cwd)?;
        command::require_success(argv, code)
    }
}

fn write_line(out: &mut dyn Write, message: impl Display, operation: &str) -> Result<()> {
    match writeln!(out, "{}", message) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(Error::internal_io(e.to_string(), Some(operation.to_string()))),
    }
}
