//! Loader sets: named units and the parents they inherit output from.

use std::collections::{BTreeMap, BTreeSet};

use multisource_util::errors::MultisourceError;

/// A named unit and its declared parents, in declaration order.
///
/// Duplicate parents are kept; they do not change the closure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderSet {
    name: String,
    parents: Vec<String>,
}

impl LoaderSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parents: Vec::new(),
        }
    }

    /// Append a parent.
    pub fn parent(&mut self, parent: impl Into<String>) {
        self.parents.push(parent.into());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parents(&self) -> &[String] {
        &self.parents
    }
}

/// All loader sets of a project, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct LoaderGraph {
    sets: BTreeMap<String, LoaderSet>,
}

impl LoaderGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the set named `name`, creating an empty one if needed.
    pub fn get_or_create(&mut self, name: &str) -> &mut LoaderSet {
        self.sets
            .entry(name.to_string())
            .or_insert_with(|| LoaderSet::new(name))
    }

    pub fn get(&self, name: &str) -> Option<&LoaderSet> {
        self.sets.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sets.contains_key(name)
    }

    /// Unit names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoaderSet> {
        self.sets.values()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Every unit reachable from `name` through parent links.
    ///
    /// See [`crate::closure::resolve_ancestors`].
    pub fn ancestors_of(&self, name: &str) -> Result<BTreeSet<String>, MultisourceError> {
        crate::closure::resolve_ancestors(name, self)
    }
}
