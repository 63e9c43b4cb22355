//! Handler for `multisource closure`.

use std::path::PathBuf;

use miette::Result;

use multisource_ops::ops_closure::{self, ClosureOptions};

pub fn exec(unit: &str, manifest: Option<PathBuf>) -> Result<()> {
    let cwd = super::current_dir()?;
    ops_closure::closure(&cwd, unit, &ClosureOptions { manifest })
}
