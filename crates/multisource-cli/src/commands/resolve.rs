//! Handler for `multisource resolve`.

use std::path::PathBuf;

use miette::Result;

use multisource_ops::ops_resolve::{self, ResolveOptions};

pub fn exec(snapshot: PathBuf, json: bool) -> Result<()> {
    let cwd = super::current_dir()?;
    let snapshot = multisource_util::fs::resolve_against(&cwd, &snapshot);
    ops_resolve::resolve(&ResolveOptions { snapshot, json })
}
