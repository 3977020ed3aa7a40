//! Terminal I/O utilities for CLI.
//!
//! Provides TTY detection and the operator prompt.

use std::io::{self, IsTerminal, StdinLock, Stdout};

use boilerkit::context::LinePrompter;

pub fn is_stdin_tty() -> bool {
    io::stdin().is_terminal()
}

/// Prompter that asks on stdout and reads answers from stdin.
pub fn line_prompter() -> LinePrompter<StdinLock<'static>, Stdout> {
    LinePrompter::new(io::stdin().lock(), io::stdout())
}

/// Print status message to stderr if running in a terminal.
pub fn status(message: &str) {
    if io::stderr().is_terminal() {
        eprintln!("{}", message);
    }
}

// log_status! macro is defined in lib.rs (#[macro_export]) and available crate-wide.
