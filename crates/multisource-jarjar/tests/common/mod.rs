#![allow(dead_code)]

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use multisource_resolver::nested::{ModuleLocation, ResolvedNestedJar};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

pub const PLAIN_MANIFEST: &[u8] = b"Manifest-Version: 1.0\r\n\r\n";
pub const OBFUSCATED_MANIFEST: &[u8] =
    b"Manifest-Version: 1.0\r\nObfuscated-By: ProGuard\r\n\r\n";

pub fn write_jar(path: &Path, entries: &[(&str, &[u8])]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let mut zip = ZipWriter::new(std::fs::File::create(path).unwrap());
    for (name, data) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap();
}

pub fn entry_names(path: &Path) -> Vec<String> {
    let mut zip = ZipArchive::new(std::fs::File::open(path).unwrap()).unwrap();
    (0..zip.len())
        .map(|i| zip.by_index(i).unwrap().name().to_string())
        .collect()
}

pub fn read(path: &Path, name: &str) -> Option<Vec<u8>> {
    let mut zip = ZipArchive::new(std::fs::File::open(path).unwrap()).unwrap();
    let mut entry = zip.by_name(name).ok()?;
    let mut buf = Vec::new();
    entry.read_to_end(&mut buf).unwrap();
    Some(buf)
}

pub fn nested(file: PathBuf, group: &str, artifact: &str, version: &str) -> ResolvedNestedJar {
    ResolvedNestedJar {
        file,
        location: ModuleLocation::new(group, artifact),
        version: version.to_string(),
        version_range: format!("[{version},)"),
    }
}
