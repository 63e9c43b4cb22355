//! Rewriting zip archives with injected entries.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

use multisource_util::errors::MultisourceError;

/// Content of an injected entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByteSource {
    /// Read from disk when the archive is written.
    FileBacked(PathBuf),
    InMemory(Vec<u8>),
}

impl ByteSource {
    pub fn read_all(&self) -> miette::Result<Vec<u8>> {
        match self {
            ByteSource::FileBacked(path) => std::fs::read(path).map_err(|e| {
                MultisourceError::Archive {
                    message: format!("Failed to read {}: {e}", path.display()),
                }
                .into()
            }),
            ByteSource::InMemory(bytes) => Ok(bytes.clone()),
        }
    }
}

/// Entries to inject, keyed by archive path. Iterates in path order.
pub type EntryMap = BTreeMap<String, ByteSource>;

pub(crate) fn zip_error(context: &str, path: &Path) -> impl FnOnce(ZipError) -> MultisourceError {
    let message = format!("{context} {}", path.display());
    move |e| MultisourceError::Archive {
        message: format!("{message}: {e}"),
    }
}

fn open(path: &Path) -> miette::Result<ZipArchive<File>> {
    let file = File::open(path).map_err(|e| MultisourceError::Archive {
        message: format!("Failed to open {}: {e}", path.display()),
    })?;
    Ok(ZipArchive::new(file).map_err(zip_error("Failed to read archive", path))?)
}

/// Read one entry, or `None` if the archive has no entry by that name.
pub fn read_entry(archive: &Path, name: &str) -> miette::Result<Option<Vec<u8>>> {
    let mut zip = open(archive)?;
    let mut entry = match zip.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(zip_error("Failed to read archive", archive)(e).into()),
    };
    let mut buf = Vec::with_capacity(entry.size() as usize);
    entry
        .read_to_end(&mut buf)
        .map_err(|e| MultisourceError::Archive {
            message: format!("Failed to extract {name} from {}: {e}", archive.display()),
        })?;
    Ok(Some(buf))
}

pub fn has_entry(archive: &Path, name: &str) -> miette::Result<bool> {
    let mut zip = open(archive)?;
    let found = match zip.by_name(name) {
        Ok(_) => true,
        Err(ZipError::FileNotFound) => false,
        Err(e) => return Err(zip_error("Failed to read archive", archive)(e).into()),
    };
    Ok(found)
}

/// Rewrite `archive` in place with `entries` injected.
///
/// Original entries are raw-copied in their original order, except those
/// whose path is a key of `entries`. Injected entries follow in path order,
/// deflated, stamped 1980-01-01 00:00:00. The result is written to a
/// sibling temporary file and renamed over `archive`; on error the
/// original is left untouched.
pub fn merge_entries(archive: &Path, entries: &EntryMap) -> miette::Result<()> {
    let parent = archive
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let prefix = format!(".{}", multisource_util::fs::file_name_string(archive));
    let tmp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(MultisourceError::Io)?;

    {
        let mut source = open(archive)?;
        let mut writer = ZipWriter::new(tmp.as_file());

        let mut kept = 0usize;
        for i in 0..source.len() {
            let entry = source
                .by_index_raw(i)
                .map_err(zip_error("Failed to read entry of", archive))?;
            if entries.contains_key(entry.name()) {
                tracing::debug!("superseding {}", entry.name());
                continue;
            }
            writer
                .raw_copy_file(entry)
                .map_err(zip_error("Failed to copy entry of", archive))?;
            kept += 1;
        }

        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());
        for (name, source) in entries {
            let bytes = source.read_all()?;
            writer
                .start_file(name.as_str(), options)
                .map_err(zip_error("Failed to add entry to", archive))?;
            std::io::Write::write_all(&mut writer, &bytes).map_err(MultisourceError::Io)?;
        }
        writer
            .finish()
            .map_err(zip_error("Failed to finish", archive))?;
        tracing::debug!(
            "{}: kept {kept} entries, injected {}",
            archive.display(),
            entries.len()
        );
    }

    tmp.persist(archive)
        .map_err(|e| MultisourceError::Io(e.error))?;
    Ok(())
}
