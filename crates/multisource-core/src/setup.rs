//! Project configuration session.
//!
//! [`ProjectSetup`] collects unit declarations, repositories and
//! "configure each" hooks. [`ProjectSetup::finish`] applies the hooks and
//! freezes everything into an immutable [`ProjectModel`], which is what the
//! resolution phase works from.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use multisource_util::errors::MultisourceError;

use crate::loader_set::LoaderGraph;
use crate::naming;
use crate::platform::Platform;

/// Name of the repository every project gets by default.
pub const NEOFORGED_REPOSITORY_NAME: &str = "NeoForged";
pub const NEOFORGED_REPOSITORY_URL: &str = "https://maven.neoforged.net/";

type EachAction = Box<dyn Fn(&mut DependenciesSetup)>;
type UnitAction = Box<dyn FnOnce(&mut DependenciesSetup)>;

/// Dependency declarations of one unit, as `group:artifact:version` strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DependenciesSetup {
    #[serde(default)]
    pub minecraft: Vec<String>,
    #[serde(default)]
    pub mappings: Vec<String>,
    /// Fabric loader; only used by Fabric units.
    #[serde(default)]
    pub loader: Vec<String>,
    /// NeoForge itself; only used by NeoForge units.
    #[serde(default)]
    pub neo_forge: Vec<String>,
}

impl DependenciesSetup {
    pub fn minecraft(&mut self, coordinate: impl Into<String>) -> &mut Self {
        self.minecraft.push(coordinate.into());
        self
    }

    pub fn mappings(&mut self, coordinate: impl Into<String>) -> &mut Self {
        self.mappings.push(coordinate.into());
        self
    }

    pub fn loader(&mut self, coordinate: impl Into<String>) -> &mut Self {
        self.loader.push(coordinate.into());
        self
    }

    pub fn neo_forge(&mut self, coordinate: impl Into<String>) -> &mut Self {
        self.neo_forge.push(coordinate.into());
        self
    }

    /// Append every declaration of `other`.
    pub fn extend_from(&mut self, other: &DependenciesSetup) {
        self.minecraft.extend(other.minecraft.iter().cloned());
        self.mappings.extend(other.mappings.iter().cloned());
        self.loader.extend(other.loader.iter().cloned());
        self.neo_forge.extend(other.neo_forge.iter().cloned());
    }

    /// The configurations a unit on `platform` gets, with their declarations.
    pub fn configurations(&self, platform: Platform) -> Vec<(&'static str, &[String])> {
        let mut configurations = vec![
            ("minecraft", self.minecraft.as_slice()),
            ("mappings", self.mappings.as_slice()),
        ];
        match platform {
            Platform::Fabric => configurations.push(("loader", self.loader.as_slice())),
            Platform::NeoForge => configurations.push(("neoForge", self.neo_forge.as_slice())),
            Platform::Common => {}
        }
        configurations
    }
}

/// A Maven repository added to every unit's project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub url: String,
}

struct PendingUnit {
    name: String,
    platform: Platform,
    /// Number of `configure_each` hooks registered before this unit was declared.
    each_before: usize,
    actions: Vec<UnitAction>,
}

/// Mutable configuration session for one root project.
pub struct ProjectSetup {
    root: String,
    repositories: Vec<Repository>,
    units: Vec<PendingUnit>,
    each: Vec<EachAction>,
    loaders: LoaderGraph,
}

impl ProjectSetup {
    /// Start a session for the project at `root` (e.g. `":"`).
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            repositories: vec![Repository {
                name: NEOFORGED_REPOSITORY_NAME.to_string(),
                url: NEOFORGED_REPOSITORY_URL.to_string(),
            }],
            units: Vec::new(),
            each: Vec::new(),
            loaders: LoaderGraph::new(),
        }
    }

    pub fn repository(&mut self, name: impl Into<String>, url: impl Into<String>) -> &mut Self {
        self.repositories.push(Repository {
            name: name.into(),
            url: url.into(),
        });
        self
    }

    /// Register a hook that runs against every unit's dependencies.
    ///
    /// Hooks registered before a unit is declared run before that unit's own
    /// action; hooks registered afterwards run after it.
    pub fn configure_each(
        &mut self,
        action: impl Fn(&mut DependenciesSetup) + 'static,
    ) -> &mut Self {
        self.each.push(Box::new(action));
        self
    }

    /// Declare a loader-agnostic unit.
    pub fn common(
        &mut self,
        name: &str,
        parents: &[&str],
        dependencies: impl FnOnce(&mut DependenciesSetup) + 'static,
    ) -> &mut Self {
        self.declare(name, Platform::Common, parents, Box::new(dependencies))
    }

    /// Declare a Fabric unit.
    pub fn fabric(
        &mut self,
        name: &str,
        parents: &[&str],
        dependencies: impl FnOnce(&mut DependenciesSetup) + 'static,
    ) -> &mut Self {
        self.declare(name, Platform::Fabric, parents, Box::new(dependencies))
    }

    /// Declare a NeoForge unit.
    pub fn neoforge(
        &mut self,
        name: &str,
        parents: &[&str],
        dependencies: impl FnOnce(&mut DependenciesSetup) + 'static,
    ) -> &mut Self {
        self.declare(name, Platform::NeoForge, parents, Box::new(dependencies))
    }

    /// Declare a unit on an explicit platform.
    pub fn unit(
        &mut self,
        name: &str,
        platform: Platform,
        parents: &[&str],
        dependencies: impl FnOnce(&mut DependenciesSetup) + 'static,
    ) -> &mut Self {
        self.declare(name, platform, parents, Box::new(dependencies))
    }

    fn declare(
        &mut self,
        name: &str,
        platform: Platform,
        parents: &[&str],
        action: UnitAction,
    ) -> &mut Self {
        let each_before = self.each.len();
        match self.units.iter_mut().find(|u| u.name == name) {
            Some(existing) => {
                if existing.platform != platform {
                    tracing::warn!(
                        "unit '{name}' redeclared as {platform} (was {})",
                        existing.platform
                    );
                    existing.platform = platform;
                }
                existing.actions.push(action);
            }
            None => self.units.push(PendingUnit {
                name: name.to_string(),
                platform,
                each_before,
                actions: vec![action],
            }),
        }

        let loader = self.loaders.get_or_create(name);
        for parent in parents {
            loader.parent(*parent);
        }
        self
    }

    /// Apply all actions and freeze the session.
    ///
    /// Fails when a parent was never declared or the parent links form a cycle.
    pub fn finish(self) -> Result<ProjectModel, MultisourceError> {
        let ProjectSetup {
            root,
            repositories,
            units,
            each,
            loaders,
        } = self;

        for set in loaders.iter() {
            for parent in set.parents() {
                if !loaders.contains(parent) {
                    return Err(MultisourceError::UnknownUnit {
                        name: parent.clone(),
                    });
                }
            }
        }
        for name in loaders.names() {
            loaders.ancestors_of(name)?;
        }

        let mut order = Vec::with_capacity(units.len());
        let mut models = BTreeMap::new();
        for pending in units {
            let mut dependencies = DependenciesSetup::default();
            for hook in &each[..pending.each_before] {
                hook(&mut dependencies);
            }
            for action in pending.actions {
                action(&mut dependencies);
            }
            for hook in &each[pending.each_before..] {
                hook(&mut dependencies);
            }

            let parents = loaders
                .get(&pending.name)
                .map(|set| set.parents().to_vec())
                .unwrap_or_default();
            tracing::debug!(
                "unit {} ({}) parents={parents:?}",
                pending.name,
                pending.platform
            );
            order.push(pending.name.clone());
            models.insert(
                pending.name.clone(),
                UnitModel {
                    project_path: naming::unit_project_path(&root, &pending.name),
                    name: pending.name,
                    platform: pending.platform,
                    parents,
                    dependencies,
                },
            );
        }

        Ok(ProjectModel {
            root,
            repositories,
            units: models,
            order,
            loaders,
        })
    }
}

/// A finalized unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitModel {
    pub name: String,
    pub platform: Platform,
    pub project_path: String,
    pub parents: Vec<String>,
    pub dependencies: DependenciesSetup,
}

/// The immutable result of a configuration session.
#[derive(Debug, Clone)]
pub struct ProjectModel {
    pub root: String,
    pub repositories: Vec<Repository>,
    units: BTreeMap<String, UnitModel>,
    order: Vec<String>,
    loaders: LoaderGraph,
}

impl ProjectModel {
    pub fn unit(&self, name: &str) -> Option<&UnitModel> {
        self.units.get(name)
    }

    /// Units in declaration order.
    pub fn units(&self) -> impl Iterator<Item = &UnitModel> {
        self.order.iter().filter_map(|name| self.units.get(name))
    }

    pub fn loaders(&self) -> &LoaderGraph {
        &self.loaders
    }
}
