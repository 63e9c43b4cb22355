//! NeoForge jarjar metadata (`META-INF/jarjar/metadata.json`).

use serde::{Deserialize, Serialize};

use multisource_resolver::nested::ResolvedNestedJar;
use multisource_resolver::version::VersionRange;
use multisource_util::errors::MultisourceError;

use crate::manifest::is_obfuscated;

pub const NEO_METADATA_PATH: &str = "META-INF/jarjar/metadata.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainedVersion {
    pub range: String,
    pub artifact_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainedIdentifier {
    pub group: String,
    pub artifact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeoMetadataEntry {
    pub version: ContainedVersion,
    pub identifier: ContainedIdentifier,
    pub path: String,
    pub is_obfuscated: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeoMetadata {
    pub jars: Vec<NeoMetadataEntry>,
}

impl NeoMetadataEntry {
    /// Metadata for one nested jar. Reads the jar's manifest.
    pub fn for_jar(jar: &ResolvedNestedJar) -> miette::Result<Self> {
        let range = match VersionRange::parse(&jar.version_range) {
            Ok(range) => range.to_string(),
            Err(e) => {
                return Err(MultisourceError::Resolution {
                    message: format!("{}: bad version range: {e}", jar.location),
                }
                .into())
            }
        };
        Ok(Self {
            version: ContainedVersion {
                range,
                artifact_version: jar.version.clone(),
            },
            identifier: ContainedIdentifier {
                group: jar.location.group.clone(),
                artifact: jar.location.artifact.clone(),
            },
            path: jar.nested_path(),
            is_obfuscated: is_obfuscated(&jar.file)?,
        })
    }
}

impl NeoMetadata {
    pub fn for_jars(jars: &[ResolvedNestedJar]) -> miette::Result<Self> {
        let jars = jars
            .iter()
            .map(NeoMetadataEntry::for_jar)
            .collect::<miette::Result<Vec<_>>>()?;
        Ok(Self { jars })
    }

    pub fn is_empty(&self) -> bool {
        self.jars.is_empty()
    }

    /// Pretty-printed UTF-8 JSON.
    pub fn to_json_bytes(&self) -> miette::Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|e| {
            MultisourceError::Generic {
                message: format!("Failed to serialize jarjar metadata: {e}"),
            }
            .into()
        })
    }
}
