use clap::Args;

use boilerkit::features::FeatureSelection;
use boilerkit::paths;
use boilerkit::setup::{self, SetupOptions};
use boilerkit::templates::TemplateSource;
use boilerkit::Error;

use super::{CmdResult, Session};

#[derive(Args, Debug, Default)]
pub struct SetupArgs {
    /// Enable every feature without prompting
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Copy templates from this directory instead of the bundled set
    #[arg(long, value_name = "DIR")]
    pub templates: Option<String>,

    /// Run the package installer when dependencies were added
    #[arg(long)]
    pub install: bool,
}

pub fn run(args: SetupArgs) -> CmdResult {
    let session = Session::load()?;

    let templates = match &args.templates {
        Some(raw) => {
            let dir = paths::resolve(&session.cwd, raw);
            if !dir.is_dir() {
                return Err(Error::validation_invalid_argument(
                    "templates",
                    format!("Template directory '{}' does not exist", dir.display()),
                    None,
                ));
            }
            TemplateSource::Directory(dir)
        }
        None => TemplateSource::Embedded,
    };

    if !args.yes && !crate::tty::is_stdin_tty() {
        crate::tty::status("stdin is not a terminal; reading answers from input");
    }

    let options = SetupOptions {
        templates,
        selection: args.yes.then(FeatureSelection::all),
        install: args.install,
    };

    session.run(|ctx| setup::run(ctx, &options))?;
    Ok(0)
}
