pub mod ops_closure;
pub mod ops_nest;
pub mod ops_plan;
pub mod ops_resolve;

use std::path::{Path, PathBuf};

use multisource_core::MANIFEST_FILE;
use multisource_util::errors::MultisourceError;

/// The manifest to load: `explicit` if given (relative to `cwd`), otherwise
/// the nearest `Multisource.toml` at or above `cwd`.
pub fn locate_manifest(cwd: &Path, explicit: Option<&Path>) -> miette::Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(multisource_util::fs::resolve_against(cwd, path));
    }
    match multisource_util::fs::find_ancestor_with(cwd, MANIFEST_FILE) {
        Some(dir) => Ok(dir.join(MANIFEST_FILE)),
        None => Err(MultisourceError::Manifest {
            message: format!("could not find {MANIFEST_FILE} in {} or any parent", cwd.display()),
        }
        .into()),
    }
}
