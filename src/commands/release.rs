use clap::Args;

use boilerkit::release::{self, ReleaseType};

use super::{CmdResult, Session};

#[derive(Args, Debug, Default)]
pub struct ReleaseArgs {
    /// Release type (patch, minor or major); prompts when omitted
    #[arg(long = "type", value_name = "TYPE")]
    pub release_type: Option<String>,
}

pub fn run(args: ReleaseArgs) -> CmdResult {
    let release_type = args
        .release_type
        .as_deref()
        .map(str::parse::<ReleaseType>)
        .transpose()?;

    let session = Session::load()?;
    session.run(|ctx| {
        let release_type = match release_type {
            Some(release_type) => release_type,
            None => release::prompt_release_type(ctx)?,
        };
        release::bump(ctx, release_type)
    })?;
    Ok(0)
}
