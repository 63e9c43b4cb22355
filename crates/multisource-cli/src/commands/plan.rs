//! Handler for `multisource plan`.

use std::path::PathBuf;

use miette::Result;

use multisource_ops::ops_plan::{self, PlanOptions};

pub fn exec(manifest: Option<PathBuf>) -> Result<()> {
    let cwd = super::current_dir()?;
    ops_plan::plan(&cwd, &PlanOptions { manifest })
}
