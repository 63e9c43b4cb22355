//! Handler for `multisource nest`.

use std::path::PathBuf;

use miette::Result;

use multisource_ops::ops_nest::{self, NestOptions};

pub struct NestArgs {
    pub snapshot: PathBuf,
    pub input: PathBuf,
    pub dest: PathBuf,
    pub base_name: String,
    pub archive_version: String,
    pub classifier: String,
    pub fabric: bool,
    pub neoforge: bool,
    pub work_dir: Option<PathBuf>,
}

pub fn exec(args: NestArgs) -> Result<()> {
    let cwd = super::current_dir()?;
    let opts = NestOptions {
        snapshot: args.snapshot,
        input: args.input,
        destination_dir: args.dest,
        base_name: args.base_name,
        archive_version: args.archive_version,
        classifier: args.classifier,
        fabric: args.fabric,
        neoforge: args.neoforge,
        work_dir: args.work_dir,
    };
    ops_nest::nest(&cwd, &opts)?;
    Ok(())
}
