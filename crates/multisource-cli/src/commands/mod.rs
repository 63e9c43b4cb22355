//! Command dispatch and handler modules.

mod closure;
mod nest;
mod plan;
mod resolve;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Closure { unit, manifest } => closure::exec(&unit, manifest),
        Command::Plan { manifest } => plan::exec(manifest),
        Command::Resolve { snapshot, json } => resolve::exec(snapshot, json),
        Command::Nest {
            snapshot,
            input,
            dest,
            base_name,
            archive_version,
            classifier,
            fabric,
            neoforge,
            work_dir,
        } => nest::exec(nest::NestArgs {
            snapshot,
            input,
            dest,
            base_name,
            archive_version,
            classifier,
            fabric,
            neoforge,
            work_dir,
        }),
    }
}

fn current_dir() -> Result<std::path::PathBuf> {
    Ok(std::env::current_dir().map_err(multisource_util::errors::MultisourceError::Io)?)
}
