use clap::{Args, Subcommand};

use boilerkit::defaults::{self, BoilerkitConfig};
use boilerkit::{paths, Error};

use super::{CmdResult, Session};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Display configuration (merged defaults + file)
    Show {
        /// Show only built-in defaults (ignore boilerkit.json)
        #[arg(long)]
        builtin: bool,
    },
    /// Write the built-in defaults to boilerkit.json
    Init {
        /// Overwrite an existing boilerkit.json
        #[arg(long)]
        force: bool,
    },
    /// Show the path to boilerkit.json
    Path,
}

pub fn run(args: ConfigArgs) -> CmdResult {
    let session = Session::load()?;

    match args.command {
        ConfigCommand::Show { builtin } => {
            let config = if builtin {
                defaults::builtin_defaults()
            } else {
                session.config.clone()
            };
            let rendered = render(&config)?;
            session.run(|ctx| ctx.say(rendered))?;
        }
        ConfigCommand::Init { force } => {
            let path = paths::config_file(&session.cwd);
            if path.exists() && !force {
                return Err(Error::validation_invalid_argument(
                    "force",
                    format!("{} already exists", path.display()),
                    None,
                )
                .with_hint("Pass --force to overwrite it with the built-in defaults"));
            }
            defaults::save_config(&session.cwd, &defaults::builtin_defaults())?;
            session.run(|ctx| ctx.say(format_args!("Wrote {}", path.display())))?;
        }
        ConfigCommand::Path => {
            let path = paths::config_file(&session.cwd);
            session.run(|ctx| ctx.say(path.display()))?;
        }
    }

    Ok(0)
}

fn render(config: &BoilerkitConfig) -> boilerkit::Result<String> {
    serde_json::to_string_pretty(config).map_err(|e| {
        Error::internal_json(e.to_string(), Some("serialize configuration".to_string()))
    })
}
