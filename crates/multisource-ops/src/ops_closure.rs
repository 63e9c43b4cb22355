//! Operation: print a unit's ancestor closure.

use std::path::{Path, PathBuf};

use multisource_core::manifest::load_model;
use multisource_core::setup::ProjectModel;

/// Options for `multisource closure`.
#[derive(Default)]
pub struct ClosureOptions {
    /// Explicit manifest path; otherwise discovered from the working directory.
    pub manifest: Option<PathBuf>,
}

/// Ancestors of `unit`, sorted.
pub fn ancestors(model: &ProjectModel, unit: &str) -> miette::Result<Vec<String>> {
    Ok(model.loaders().ancestors_of(unit)?.into_iter().collect())
}

pub fn closure(cwd: &Path, unit: &str, opts: &ClosureOptions) -> miette::Result<()> {
    let manifest = crate::locate_manifest(cwd, opts.manifest.as_deref())?;
    let model = load_model(&manifest)?;
    let ancestors = ancestors(&model, unit)?;
    tracing::debug!("{unit}: {} ancestor(s)", ancestors.len());
    for name in ancestors {
        println!("{name}");
    }
    Ok(())
}
