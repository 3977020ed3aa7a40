use clap::{Parser, Subcommand};

mod commands;
mod output;
mod tty;

use commands::{config, notes, publish, release, setup};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "boilerkit")]
#[command(version = VERSION)]
#[command(about = "Project automation setup and release helpers for Node.js projects")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the latest changelog section into the release notes file
    Notes(notes::NotesArgs),
    /// Install formatting, commit hooks, versioning and CI into this project
    Setup(setup::SetupArgs),
    /// Choose a release type and bump the version
    Release(release::ReleaseArgs),
    /// Create a hosted release from the latest release notes
    Publish(publish::PublishArgs),
    /// Manage boilerkit.json
    Config(config::ConfigArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    match commands::run(cli.command) {
        Ok(exit_code) => std::process::ExitCode::from(output::exit_code_to_u8(exit_code)),
        Err(err) => {
            output::print_error(&err);
            std::process::ExitCode::from(output::exit_code_to_u8(output::exit_code_for_error(&err)))
        }
    }
}
