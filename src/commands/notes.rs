use clap::Args;

use boilerkit::changelog;

use super::{CmdResult, Session};

#[derive(Args, Debug, Default)]
pub struct NotesArgs {
    /// Version for the fallback note (defaults to the manifest version)
    #[arg(long, value_name = "VERSION")]
    pub version: Option<String>,
}

pub fn run(args: NotesArgs) -> CmdResult {
    let session = Session::load()?;
    session.run(|ctx| changelog::write_release_notes(ctx, args.version.as_deref()))?;
    Ok(0)
}
