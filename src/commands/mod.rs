use std::io;
use std::path::PathBuf;

use boilerkit::context::{Context, LocalFs, SystemRunner};
use boilerkit::defaults::{self, BoilerkitConfig};
use boilerkit::Error;

/// Exit code on success; errors are rendered by `main`.
pub type CmdResult = boilerkit::Result<i32>;

/// Working directory and configuration for one invocation.
pub(crate) struct Session {
    pub cwd: PathBuf,
    pub config: BoilerkitConfig,
}

impl Session {
    /// Resolve the working directory and load boilerkit.json from it.
    pub fn load() -> boilerkit::Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| {
            Error::internal_io(e.to_string(), Some("read current directory".to_string()))
        })?;
        let config = defaults::load_config(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Run a flow against the real filesystem, terminal and processes.
    pub fn run<T>(
        self,
        flow: impl FnOnce(&mut Context) -> boilerkit::Result<T>,
    ) -> boilerkit::Result<T> {
        let mut prompter = crate::tty::line_prompter();
        let mut runner = SystemRunner;
        let (mut out, mut err) = (io::stdout(), io::stderr());

        let mut ctx = Context {
            cwd: self.cwd,
            config: self.config,
            fs: &LocalFs,
            prompter: &mut prompter,
            runner: &mut runner,
            out: &mut out,
            err: &mut err,
        };
        flow(&mut ctx)
    }
}

pub mod config;
pub mod notes;
pub mod publish;
pub mod release;
pub mod setup;

pub(crate) fn run(command: crate::Commands) -> CmdResult {
    match command {
        crate::Commands::Notes(args) => notes::run(args),
        crate::Commands::Setup(args) => setup::run(args),
        crate::Commands::Release(args) => release::run(args),
        crate::Commands::Publish(args) => publish::run(args),
        crate::Commands::Config(args) => config::run(args),
    }
}
