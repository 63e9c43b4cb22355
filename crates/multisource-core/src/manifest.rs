use serde::{Deserialize, Serialize};
use std::path::Path;

use multisource_util::errors::MultisourceError;

use crate::platform::Platform;
use crate::setup::{DependenciesSetup, ProjectModel, ProjectSetup};

/// The parsed representation of a `Multisource.toml` file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectManifest {
    #[serde(default)]
    pub project: ProjectSection,

    #[serde(default)]
    pub repositories: Vec<RepositoryEntry>,

    /// Dependency lists applied to every unit before its own.
    #[serde(default)]
    pub each: Option<DependenciesSetup>,

    #[serde(default, rename = "unit")]
    pub units: Vec<UnitEntry>,
}

/// The `[project]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSection {
    #[serde(default = "default_root")]
    pub root: String,
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

fn default_root() -> String {
    ":".to_string()
}

/// An extra Maven repository from `[[repositories]]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryEntry {
    pub name: String,
    pub url: String,
}

/// One `[[unit]]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitEntry {
    pub name: String,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub parents: Vec<String>,
    #[serde(default)]
    pub dependencies: DependenciesSetup,
}

impl ProjectManifest {
    /// Parse a manifest from a TOML string.
    pub fn parse_toml(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            MultisourceError::Manifest {
                message: format!("Failed to parse manifest: {e}"),
            }
            .into()
        })
    }

    /// Read and parse a manifest file.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MultisourceError::Manifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::parse_toml(&content)
    }

    /// Replay the manifest onto a fresh configuration session.
    pub fn into_setup(self) -> ProjectSetup {
        let mut setup = ProjectSetup::new(self.project.root);
        for repo in self.repositories {
            setup.repository(repo.name, repo.url);
        }
        if let Some(each) = self.each {
            setup.configure_each(move |deps| deps.extend_from(&each));
        }
        for unit in self.units {
            let parents: Vec<&str> = unit.parents.iter().map(String::as_str).collect();
            let declared = unit.dependencies;
            setup.unit(&unit.name, unit.platform, &parents, move |deps| {
                deps.extend_from(&declared)
            });
        }
        setup
    }

    /// Build the finalized project model.
    pub fn into_model(self) -> miette::Result<ProjectModel> {
        Ok(self.into_setup().finish()?)
    }
}

/// Load `Multisource.toml` (or any manifest path) straight into a model.
pub fn load_model(path: &Path) -> miette::Result<ProjectModel> {
    ProjectManifest::from_path(path)?.into_model()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[project]
root = ":"

[[repositories]]
name = "Fabric"
url = "https://maven.fabricmc.net/"

[each]
minecraft = ["com.mojang:minecraft:1.21.1"]

[[unit]]
name = "main"

[[unit]]
name = "fabric"
platform = "fabric"
parents = ["main"]

[unit.dependencies]
loader = ["net.fabricmc:fabric-loader:0.16.5"]

[[unit]]
name = "neoforge"
platform = "neoforge"
parents = ["main"]

[unit.dependencies]
neo-forge = ["net.neoforged:neoforge:21.1.57"]
"#;

    #[test]
    fn parse_sample_manifest() {
        let manifest = ProjectManifest::parse_toml(SAMPLE).unwrap();
        assert_eq!(manifest.project.root, ":");
        assert_eq!(manifest.repositories.len(), 1);
        assert_eq!(manifest.units.len(), 3);
        assert_eq!(manifest.units[1].platform, Platform::Fabric);
        assert_eq!(manifest.units[2].dependencies.neo_forge.len(), 1);
    }

    #[test]
    fn model_keeps_declaration_order_and_applies_each() {
        let model = ProjectManifest::parse_toml(SAMPLE)
            .unwrap()
            .into_model()
            .unwrap();
        let names: Vec<&str> = model.units().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["main", "fabric", "neoforge"]);

        let fabric = model.unit("fabric").unwrap();
        assert_eq!(fabric.project_path, ":fabric");
        assert_eq!(fabric.dependencies.minecraft, ["com.mojang:minecraft:1.21.1"]);
        assert_eq!(fabric.dependencies.loader, ["net.fabricmc:fabric-loader:0.16.5"]);
        assert_eq!(model.repositories.len(), 2);
    }

    #[test]
    fn empty_manifest_defaults() {
        let manifest = ProjectManifest::parse_toml("").unwrap();
        assert_eq!(manifest.project.root, ":");
        assert!(manifest.units.is_empty());
    }

    #[test]
    fn unknown_platform_is_an_error() {
        let result = ProjectManifest::parse_toml("[[unit]]\nname = \"x\"\nplatform = \"quilt\"\n");
        assert!(result.is_err());
    }
}
