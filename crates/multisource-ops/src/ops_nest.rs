//! Operation: copy an archive and nest a snapshot's jars into it.

use std::path::{Path, PathBuf};

use multisource_core::platform::LoaderMetadata;
use multisource_jarjar::copy_task::ArchiveNaming;
use multisource_jarjar::jar_in_jar::JarInJar;
use multisource_resolver::snapshot::ResolutionSnapshot;
use multisource_util::errors::MultisourceError;
use multisource_util::progress;

/// Options for `multisource nest`.
pub struct NestOptions {
    pub snapshot: PathBuf,
    pub input: PathBuf,
    pub destination_dir: PathBuf,
    pub base_name: String,
    pub archive_version: String,
    pub classifier: String,
    pub fabric: bool,
    pub neoforge: bool,
    /// Scratch directory; a temporary one is used when absent.
    pub work_dir: Option<PathBuf>,
}

impl NestOptions {
    pub fn naming(&self) -> ArchiveNaming {
        ArchiveNaming::new(&self.destination_dir, &self.base_name, &self.archive_version)
            .with_classifier(&self.classifier)
    }

    pub fn loader_metadata(&self) -> LoaderMetadata {
        LoaderMetadata {
            fabric_descriptors: self.fabric,
            neo_metadata: self.neoforge,
        }
    }
}

/// Run the jar-in-jar step and return the written archive.
pub fn nest(cwd: &Path, opts: &NestOptions) -> miette::Result<PathBuf> {
    let snapshot_path = multisource_util::fs::resolve_against(cwd, &opts.snapshot);
    let input = multisource_util::fs::resolve_against(cwd, &opts.input);
    let snapshot = ResolutionSnapshot::from_path(&snapshot_path)?;
    let result = snapshot.resolve_nested();
    progress::status_info(
        "Resolved",
        &format!("{} nested jar(s) from {}", result.jars.len(), snapshot_path.display()),
    );
    for conflict in result.conflicts.iter() {
        progress::status_warn("Conflict", &conflict.to_string());
    }

    let scratch;
    let work_dir = match &opts.work_dir {
        Some(dir) => multisource_util::fs::resolve_against(cwd, dir),
        None => {
            scratch = tempfile::Builder::new()
                .prefix("multisource-")
                .tempdir()
                .map_err(MultisourceError::Io)?;
            scratch.path().to_path_buf()
        }
    };

    let mut naming = opts.naming();
    naming.destination_dir = multisource_util::fs::resolve_against(cwd, &naming.destination_dir);
    let task = JarInJar::new(naming, opts.loader_metadata(), work_dir);
    progress::status(
        "Nesting",
        &format!("{} jar(s) into {}", result.jars.len(), task.naming.file_name()),
    );
    let archive = task.run(&input, &result.jars)?;
    progress::status("Finished", &archive.display().to_string());
    Ok(archive)
}
