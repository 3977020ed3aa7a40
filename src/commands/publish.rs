use clap::Args;

use boilerkit::publish;

use super::{CmdResult, Session};

#[derive(Args, Debug, Default)]
pub struct PublishArgs {
    /// Version to publish (defaults to the manifest version)
    #[arg(long, value_name = "VERSION")]
    pub version: Option<String>,
}

pub fn run(args: PublishArgs) -> CmdResult {
    let session = Session::load()?;
    session.run(|ctx| publish::publish(ctx, args.version.as_deref()))?;
    Ok(0)
}
