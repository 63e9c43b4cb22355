//! Resolution snapshots: a JSON export of an already-resolved dependency graph.
//!
//! ```json
//! {
//!   "roots": [{
//!     "dependencies": [
//!       { "requested": { "module": { "group": "g", "module": "lib", "strict": "1.2.3" } },
//!         "variant": { "owner": { "group": "g", "name": "lib", "version": "1.2.3" },
//!                      "capabilities": [{ "group": "g", "name": "lib", "version": "1.2.3" }] } },
//!       { "requested": { "project": { "path": ":other" } }, "failure": "not found" }
//!     ]
//!   }],
//!   "artifacts": [{ "file": "libs/lib-1.2.3.jar", "variant": { "...": "..." } }]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use multisource_util::errors::MultisourceError;

/// A `group:name:version` coordinate. Used both for variant owners and
/// capabilities; a capability may omit its version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleCoordinate {
    pub group: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ModuleCoordinate {
    pub fn new(group: &str, name: &str, version: Option<&str>) -> Self {
        Self {
            group: group.to_string(),
            name: name.to_string(),
            version: version.map(str::to_string),
        }
    }
}

/// The variant a dependency edge or artifact resolved to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedVariant {
    /// Owning module; absent for project or file components.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<ModuleCoordinate>,
    #[serde(default)]
    pub capabilities: Vec<ModuleCoordinate>,
}

/// Version constraints of a module request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSelector {
    pub group: String,
    pub module: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSelector {
    pub path: String,
}

/// What a dependency edge asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentSelector {
    Module(ModuleSelector),
    Project(ProjectSelector),
}

/// One direct dependency edge of a root component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependencyResult {
    Resolved {
        requested: ComponentSelector,
        variant: ResolvedVariant,
    },
    Unresolved {
        requested: ComponentSelector,
        failure: String,
    },
}

/// A root of the resolved graph (one per tracked configuration).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootComponent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<DependencyResult>,
}

/// A resolved artifact file and the variant it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedArtifact {
    pub file: PathBuf,
    pub variant: ResolvedVariant,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionSnapshot {
    #[serde(default)]
    pub roots: Vec<RootComponent>,
    #[serde(default)]
    pub artifacts: Vec<ResolvedArtifact>,
}

impl ResolutionSnapshot {
    pub fn parse_json(content: &str) -> miette::Result<Self> {
        serde_json::from_str(content).map_err(|e| {
            MultisourceError::Manifest {
                message: format!("Failed to parse resolution snapshot: {e}"),
            }
            .into()
        })
    }

    /// Read a snapshot; relative artifact paths are resolved against the
    /// snapshot's directory.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MultisourceError::Manifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        let mut snapshot = Self::parse_json(&content)?;
        if let Some(base) = path.parent() {
            for artifact in &mut snapshot.artifacts {
                artifact.file = multisource_util::fs::resolve_against(base, &artifact.file);
            }
        }
        Ok(snapshot)
    }
}
