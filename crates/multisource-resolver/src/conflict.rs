//! Identities reached at more than one version through direct edges.

use std::cmp::Ordering;
use std::fmt;

use crate::nested::ModuleLocation;
use crate::version::MavenVersion;

/// One identity requested at two versions, and which of them was used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConflict {
    pub module: ModuleLocation,
    pub kept: String,
    pub discarded: String,
}

impl VersionConflict {
    /// Settle `first` against `second` by Maven ordering, higher wins.
    ///
    /// `None` when the two versions compare equal (`1.0` and `1.0.0`).
    pub fn between(module: &ModuleLocation, first: &str, second: &str) -> Option<Self> {
        let (kept, discarded) =
            match MavenVersion::parse(first).cmp(&MavenVersion::parse(second)) {
                Ordering::Equal => return None,
                Ordering::Greater => (first, second),
                Ordering::Less => (second, first),
            };
        Some(Self {
            module: module.clone(),
            kept: kept.to_string(),
            discarded: discarded.to_string(),
        })
    }
}

/// Conflicts in the order the resolver met them.
#[derive(Debug, Default, Clone)]
pub struct ConflictReport {
    entries: Vec<VersionConflict>,
}

impl ConflictReport {
    pub fn push(&mut self, conflict: VersionConflict) {
        self.entries.push(conflict);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VersionConflict> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a ConflictReport {
    type Item = &'a VersionConflict;
    type IntoIter = std::slice::Iter<'a, VersionConflict>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for VersionConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: kept {} over {} (highest version wins)",
            self.module, self.kept, self.discarded
        )
    }
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.entries.len() {
            0 => writeln!(f, "no version conflicts"),
            n => {
                writeln!(f, "{n} version conflict(s):")?;
                self.entries
                    .iter()
                    .try_for_each(|conflict| writeln!(f, "  {conflict}"))
            }
        }
    }
}
