//! The jar-in-jar step: copy an archive, then nest resolved jars into the copy.

use std::path::{Path, PathBuf};

use multisource_core::platform::LoaderMetadata;
use multisource_resolver::nested::ResolvedNestedJar;

use crate::archive::{merge_entries, ByteSource, EntryMap};
use crate::copy_task::ArchiveNaming;
use crate::fabric::fabric_entries;
use crate::neo::{NeoMetadata, NEO_METADATA_PATH};

pub struct JarInJar {
    pub naming: ArchiveNaming,
    pub loader_metadata: LoaderMetadata,
    /// Scratch directory for jars that get a generated descriptor.
    pub work_dir: PathBuf,
}

impl JarInJar {
    pub fn new(naming: ArchiveNaming, loader_metadata: LoaderMetadata, work_dir: PathBuf) -> Self {
        Self {
            naming,
            loader_metadata,
            work_dir,
        }
    }

    /// Copy `input` to its archive path and nest `jars` into the copy.
    pub fn run(&self, input: &Path, jars: &[ResolvedNestedJar]) -> miette::Result<PathBuf> {
        let archive = self.naming.copy_from(input)?;
        let entries = self.entries(&archive, jars)?;
        merge_entries(&archive, &entries)?;
        tracing::info!(
            "nested {} jar(s) into {}",
            jars.len(),
            archive.display()
        );
        Ok(archive)
    }

    /// Every entry to inject into `archive`.
    pub fn entries(&self, archive: &Path, jars: &[ResolvedNestedJar]) -> miette::Result<EntryMap> {
        let mut entries = if self.loader_metadata.fabric_descriptors {
            fabric_entries(archive, jars, &self.work_dir)?
        } else {
            jars.iter()
                .map(|jar| (jar.nested_path(), ByteSource::FileBacked(jar.file.clone())))
                .collect()
        };

        if self.loader_metadata.neo_metadata {
            let metadata = NeoMetadata::for_jars(jars)?;
            if !metadata.is_empty() {
                entries.insert(
                    NEO_METADATA_PATH.to_string(),
                    ByteSource::InMemory(metadata.to_json_bytes()?),
                );
            }
        }
        Ok(entries)
    }
}
