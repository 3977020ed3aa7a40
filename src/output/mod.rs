//! CLI error rendering and exit code mapping.

use std::io::{self, Write};

use boilerkit::Error;
use serde_json::Value;

/// Print an error to stderr as `Error: <message>`, followed by its details and hints.
pub fn print_error(err: &Error) {
    let stderr = io::stderr();
    let mut handle = stderr.lock();
    // Nothing left to report to if stderr itself is gone.
    let _ = write_error(&mut handle, err);
}

pub fn write_error(out: &mut dyn Write, err: &Error) -> io::Result<()> {
    writeln!(out, "Error: {}", err.message)?;

    let detail = |key: &str| err.details.get(key).and_then(Value::as_str);
    if let Some(problem) = detail("problem") {
        writeln!(out, "  Problem: {}", problem)?;
    }
    if let Some(cause) = err.cause().filter(|cause| *cause != err.message) {
        writeln!(out, "  Cause: {}", cause)?;
    }
    if let Some(context) = detail("context") {
        writeln!(out, "  Context: {}", context)?;
    }
    if let Some(tried) = err.details.get("tried").and_then(Value::as_array) {
        let options: Vec<&str> = tried.iter().filter_map(Value::as_str).collect();
        writeln!(out, "  Expected one of: {}", options.join(", "))?;
    }
    for hint in &err.hints {
        writeln!(out, "  Hint: {}", hint.message)?;
    }
    Ok(())
}

/// Every failure exits with 1.
pub fn exit_code_for_error(_err: &Error) -> i32 {
    1
}

pub fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
