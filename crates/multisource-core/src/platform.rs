//! Target platforms a unit can be bound to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The mod loader a unit compiles against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Loader-agnostic code shared by other units.
    #[default]
    Common,
    Fabric,
    #[serde(rename = "neoforge")]
    NeoForge,
}

/// Which loader metadata the jar-in-jar step generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoaderMetadata {
    /// Synthesize `fabric.mod.json` for nested jars and list them in the host descriptor.
    pub fabric_descriptors: bool,
    /// Write the aggregated `META-INF/jarjar/metadata.json`.
    pub neo_metadata: bool,
}

impl LoaderMetadata {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        !self.fabric_descriptors && !self.neo_metadata
    }
}

impl Platform {
    /// Platform name handed to the remapping backend. Common code is
    /// remapped like Fabric code.
    pub fn loom_platform(&self) -> &'static str {
        match self {
            Platform::Common | Platform::Fabric => "fabric",
            Platform::NeoForge => "neoforge",
        }
    }

    /// Loader units produce a remapped, publishable jar; common units do not.
    pub fn produces_output_jar(&self) -> bool {
        !matches!(self, Platform::Common)
    }

    pub fn loader_metadata(&self) -> LoaderMetadata {
        LoaderMetadata {
            fabric_descriptors: matches!(self, Platform::Fabric),
            neo_metadata: matches!(self, Platform::NeoForge),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Platform::Common => "common",
            Platform::Fabric => "fabric",
            Platform::NeoForge => "neoforge",
        })
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "common" => Ok(Platform::Common),
            "fabric" => Ok(Platform::Fabric),
            "neoforge" => Ok(Platform::NeoForge),
            other => Err(format!("unknown platform '{other}'")),
        }
    }
}
