//! Per-unit build plan.
//!
//! Turns a finalized [`ProjectModel`] into what each unit's build needs to
//! know: which ancestor outputs fold into its archives, which parents link
//! for runtime mod classes, the names of its configurations and tasks, and
//! which loader metadata the jar-in-jar step writes. Units are ordered
//! parents first with `petgraph`.

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

use multisource_util::errors::MultisourceError;

use crate::closure::resolve_ancestors;
use crate::loader_set::LoaderGraph;
use crate::naming;
use crate::platform::{LoaderMetadata, Platform};
use crate::setup::ProjectModel;

/// Configurations a unit's project creates or exposes to other projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitConfigurations {
    pub runtime_classpath: String,
    pub runtime_classpath_exposed: String,
    pub compile_classpath: String,
    pub compile_classpath_exposed: String,
    pub runtime_elements: String,
    pub api_elements: String,
    pub sources_elements: String,
    /// Remapped jar handed to the root project; loader units only.
    pub output_jar: Option<String>,
    pub output_sources_jar: Option<String>,
}

impl UnitConfigurations {
    fn new(name: &str, platform: Platform) -> Self {
        let output = |base: &str| {
            platform
                .produces_output_jar()
                .then(|| naming::for_feature(name, base))
        };
        Self {
            runtime_classpath: naming::for_feature(name, naming::RUNTIME_CLASSPATH),
            runtime_classpath_exposed: naming::for_feature(name, naming::RUNTIME_CLASSPATH_EXPOSED),
            compile_classpath: naming::for_feature(name, naming::COMPILE_CLASSPATH),
            compile_classpath_exposed: naming::for_feature(name, naming::COMPILE_CLASSPATH_EXPOSED),
            runtime_elements: naming::for_feature(name, naming::RUNTIME_ELEMENTS),
            api_elements: naming::for_feature(name, naming::API_ELEMENTS),
            sources_elements: naming::for_feature(name, naming::SOURCES_ELEMENTS),
            output_jar: output(naming::OUTPUT_JAR),
            output_sources_jar: output(naming::OUTPUT_SOURCES_JAR),
        }
    }
}

/// Everything derived for a single unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitPlan {
    pub name: String,
    pub platform: Platform,
    pub project_path: String,
    /// Full closure, sorted. Folded into the jar, sources jar and javadoc.
    pub ancestors: Vec<String>,
    /// Direct parents only, first occurrence order.
    pub runtime_mod_class_parents: Vec<String>,
    pub compile_only_configuration: String,
    pub runtime_mod_classes_configuration: String,
    pub include_configuration: String,
    pub jar_task: String,
    pub sources_jar_task: String,
    pub javadoc_task: String,
    pub remap_jar_task: String,
    pub remap_sources_jar_task: String,
    pub dev_classifier: String,
    pub output_classifier: String,
    pub loader_metadata: LoaderMetadata,
    /// Platform name passed to the remapper.
    pub remap_platform: &'static str,
    pub configurations: UnitConfigurations,
}

impl UnitPlan {
    fn new(
        name: &str,
        platform: Platform,
        project_path: String,
        parents: &[String],
        ancestors: Vec<String>,
    ) -> Self {
        let mut direct: Vec<String> = Vec::new();
        for parent in parents {
            if !direct.contains(parent) {
                direct.push(parent.clone());
            }
        }
        Self {
            name: name.to_string(),
            platform,
            project_path,
            ancestors,
            runtime_mod_class_parents: direct,
            compile_only_configuration: naming::for_feature(name, naming::COMPILE_ONLY),
            runtime_mod_classes_configuration: naming::for_feature(
                name,
                naming::RUNTIME_MOD_CLASSES,
            ),
            include_configuration: naming::for_feature(name, naming::INCLUDE),
            jar_task: naming::task_name(name, None, "jar"),
            sources_jar_task: naming::task_name(name, None, "sourcesJar"),
            javadoc_task: naming::task_name(name, None, "javadoc"),
            remap_jar_task: naming::task_name(name, Some("remap"), "jar"),
            remap_sources_jar_task: naming::task_name(name, Some("remap"), "sourcesJar"),
            dev_classifier: format!("{name}-dev"),
            output_classifier: name.to_string(),
            loader_metadata: platform.loader_metadata(),
            remap_platform: platform.loom_platform(),
            configurations: UnitConfigurations::new(name, platform),
        }
    }

    /// Units whose output folds into this unit's jar.
    pub fn jar_inputs(&self) -> &[String] {
        &self.ancestors
    }

    pub fn sources_jar_inputs(&self) -> &[String] {
        &self.ancestors
    }

    pub fn javadoc_inputs(&self) -> &[String] {
        &self.ancestors
    }
}

/// Plans for every unit, parents first.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    units: Vec<UnitPlan>,
}

impl BuildPlan {
    pub fn new(model: &ProjectModel) -> Result<Self, MultisourceError> {
        let order = build_order(model.loaders())?;
        let mut units = Vec::with_capacity(order.len());
        for name in order {
            let Some(unit) = model.unit(&name) else {
                continue;
            };
            let ancestors = resolve_ancestors(&name, model.loaders())?
                .into_iter()
                .collect();
            units.push(UnitPlan::new(
                &name,
                unit.platform,
                unit.project_path.clone(),
                &unit.parents,
                ancestors,
            ));
        }
        tracing::debug!("planned {} units", units.len());
        Ok(Self { units })
    }

    pub fn units(&self) -> &[UnitPlan] {
        &self.units
    }

    pub fn unit(&self, name: &str) -> Option<&UnitPlan> {
        self.units.iter().find(|u| u.name == name)
    }
}

/// Unit names ordered so every parent precedes its children.
///
/// A cycle is reported with the same chain as [`resolve_ancestors`].
pub fn build_order(graph: &LoaderGraph) -> Result<Vec<String>, MultisourceError> {
    let mut dag: DiGraph<&str, ()> = DiGraph::new();
    let mut indices: HashMap<&str, NodeIndex> = HashMap::new();
    for name in graph.names() {
        indices.insert(name, dag.add_node(name));
    }
    for set in graph.iter() {
        let Some(&child) = indices.get(set.name()) else {
            continue;
        };
        for parent in set.parents() {
            let Some(&from) = indices.get(parent.as_str()) else {
                return Err(MultisourceError::UnknownUnit {
                    name: parent.clone(),
                });
            };
            dag.update_edge(from, child, ());
        }
    }

    match toposort(&dag, None) {
        Ok(order) => Ok(order.into_iter().map(|idx| dag[idx].to_string()).collect()),
        Err(cycle) => {
            let name = dag[cycle.node_id()];
            resolve_ancestors(name, graph)?;
            Err(MultisourceError::CircularDependency {
                chain: name.to_string(),
            })
        }
    }
}
