//! Command execution primitives with consistent error handling.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Run a command with inherited stdio and wait for it to exit.
///
/// Returns the exit code, or `None` when the process was terminated by a signal.
/// Failing to spawn the program is an error; a non-zero exit is not.
pub fn run_inherited(argv: &[String], dir: &Path) -> Result<Option<i32>> {
    let (program, args) = argv.split_first().ok_or_else(|| {
        Error::validation_invalid_argument("command", "Command cannot be empty", None)
    })?;

    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| {
            Error::internal_io(
                format!("Failed to run {}: {}", program, e),
                Some(display_argv(argv)),
            )
        })?;

    Ok(status.code())
}

/// Render an argv for messages. Arguments containing whitespace are quoted.
pub fn display_argv(argv: &[String]) -> String {
    argv.iter()
        .map(|arg| {
            if arg.is_empty() || arg.chars().any(char::is_whitespace) {
                format!("'{}'", arg.replace('\'', "'\\''"))
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Require a command to have exited with status zero.
pub fn require_success(argv: &[String], code: Option<i32>) -> Result<()> {
    match code {
        Some(0) => Ok(()),
        other => Err(Error::command_failed(display_argv(argv), other)),
    }
}
