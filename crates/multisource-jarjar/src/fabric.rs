//! Fabric descriptors for nested jars.
//!
//! Fabric only loads nested jars that carry a `fabric.mod.json`, and only
//! those the host descriptor lists under `jars`. Plain library jars get a
//! generated descriptor, and the host descriptor is extended with every
//! nested jar.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{json, Map, Value};

use multisource_resolver::nested::{ModuleLocation, ResolvedNestedJar};
use multisource_util::errors::MultisourceError;

use crate::archive::{self, ByteSource, EntryMap};

pub const FABRIC_MOD_JSON: &str = "fabric.mod.json";
/// Marker set under `custom` in generated descriptors.
pub const GENERATED_MARKER: &str = "multisource:generated";
/// Directory under the work dir receiving jars with generated descriptors.
pub const GENERATED_JARS_DIR: &str = "generated-jars";

const MAX_ID_LENGTH: usize = 64;
const SHORT_ID_PREFIX: usize = 50;
const SHORT_ID_HASH: usize = 14;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDescriptor {
    pub schema_version: u32,
    pub id: String,
    pub version: String,
    pub name: String,
    pub custom: Map<String, Value>,
}

/// Mod id for a generated descriptor.
///
/// `group_artifact`, lowercased, with dots replaced by underscores. Ids
/// longer than 64 characters keep their first 50 characters followed by
/// the first 14 hex digits of the SHA-256 of the full id.
pub fn descriptor_id(location: &ModuleLocation) -> String {
    let id = format!("{}_{}", location.group, location.artifact)
        .replace('.', "_")
        .to_lowercase();
    if id.chars().count() <= MAX_ID_LENGTH {
        return id;
    }
    let hash = multisource_util::hash::sha256_prefix(id.as_bytes(), SHORT_ID_HASH);
    let prefix: String = id.chars().take(SHORT_ID_PREFIX).collect();
    format!("{prefix}{hash}")
}

pub fn generate_descriptor(jar: &ResolvedNestedJar) -> GeneratedDescriptor {
    let mut custom = Map::new();
    custom.insert(GENERATED_MARKER.to_string(), Value::Bool(true));
    GeneratedDescriptor {
        schema_version: 1,
        id: descriptor_id(&jar.location),
        version: jar.version.clone(),
        name: jar.location.artifact.clone(),
        custom,
    }
}

fn to_pretty_bytes<T: Serialize>(value: &T, what: &str) -> miette::Result<Vec<u8>> {
    serde_json::to_vec_pretty(value).map_err(|e| {
        MultisourceError::Generic {
            message: format!("Failed to serialize {what}: {e}"),
        }
        .into()
    })
}

/// The file to embed for `jar`.
///
/// Jars that already carry a descriptor are embedded as they are. Others
/// are copied to `<work_dir>/generated-jars/` and given a generated one.
pub fn with_descriptor(jar: &ResolvedNestedJar, work_dir: &Path) -> miette::Result<PathBuf> {
    if archive::has_entry(&jar.file, FABRIC_MOD_JSON)? {
        return Ok(jar.file.clone());
    }

    let out_dir = work_dir.join(GENERATED_JARS_DIR);
    multisource_util::fs::ensure_dir(&out_dir).map_err(MultisourceError::Io)?;
    let out = out_dir.join(jar.file_name());
    std::fs::copy(&jar.file, &out).map_err(|e| MultisourceError::Archive {
        message: format!("Failed to copy {}: {e}", jar.file.display()),
    })?;

    let descriptor = to_pretty_bytes(&generate_descriptor(jar), FABRIC_MOD_JSON)?;
    let mut entries = EntryMap::new();
    entries.insert(FABRIC_MOD_JSON.to_string(), ByteSource::InMemory(descriptor));
    archive::merge_entries(&out, &entries)?;
    tracing::debug!("generated {FABRIC_MOD_JSON} for {}", jar.location);
    Ok(out)
}

/// Append `{"file": path}` to the host descriptor's `jars` array.
///
/// Returns `None` if `host` is not a JSON object.
pub fn list_nested_jars(host: &[u8], nested_paths: &[String]) -> Option<Vec<u8>> {
    let mut descriptor: Map<String, Value> = serde_json::from_slice(host).ok()?;
    let mut jars = match descriptor.shift_remove("jars") {
        Some(Value::Array(existing)) => existing,
        Some(_) => return None,
        None => Vec::new(),
    };
    jars.extend(nested_paths.iter().map(|path| json!({ "file": path })));
    descriptor.insert("jars".to_string(), Value::Array(jars));
    serde_json::to_vec_pretty(&descriptor).ok()
}

/// Entries the Fabric mode contributes for `jars` in `host_archive`.
pub fn fabric_entries(
    host_archive: &Path,
    jars: &[ResolvedNestedJar],
    work_dir: &Path,
) -> miette::Result<EntryMap> {
    let mut entries = EntryMap::new();
    for jar in jars {
        let file = with_descriptor(jar, work_dir)?;
        entries.insert(jar.nested_path(), ByteSource::FileBacked(file));
    }
    if jars.is_empty() {
        return Ok(entries);
    }

    if let Some(host) = archive::read_entry(host_archive, FABRIC_MOD_JSON)? {
        let paths: Vec<String> = jars.iter().map(ResolvedNestedJar::nested_path).collect();
        match list_nested_jars(&host, &paths) {
            Some(updated) => {
                entries.insert(FABRIC_MOD_JSON.to_string(), ByteSource::InMemory(updated));
            }
            None => tracing::warn!(
                "Could not parse {FABRIC_MOD_JSON} in {}, not listing nested jars",
                host_archive.display()
            ),
        }
    }
    Ok(entries)
}
