//! Choosing the jars to nest.
//!
//! Only modules that are *direct* dependencies of a tracked root are nested.
//! Versions and ranges come from the dependency edges when possible, so the
//! range reflects what the build asked for rather than what happened to be
//! resolved. Artifacts fall back to their own variant version.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::PathBuf;

use crate::conflict::{ConflictReport, VersionConflict};
use crate::snapshot::{
    ComponentSelector, DependencyResult, ModuleSelector, ResolutionSnapshot, ResolvedArtifact,
    ResolvedVariant, RootComponent,
};
use crate::version::VersionRange;

/// Directory nested jars are stored under inside the host archive.
pub const NESTED_JAR_DIR: &str = "META-INF/jars";

/// A module identity: group and artifact, without version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleLocation {
    pub group: String,
    pub artifact: String,
}

impl ModuleLocation {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
        }
    }

    /// `group:artifact`
    pub fn key(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }
}

impl fmt::Display for ModuleLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)
    }
}

/// A jar selected for nesting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNestedJar {
    pub file: PathBuf,
    pub location: ModuleLocation,
    pub version: String,
    pub version_range: String,
}

impl ResolvedNestedJar {
    pub fn file_name(&self) -> String {
        multisource_util::fs::file_name_string(&self.file)
    }

    /// Entry path of this jar inside the host archive.
    pub fn nested_path(&self) -> String {
        format!("{NESTED_JAR_DIR}/{}", self.file_name())
    }

    pub fn sort_key(&self) -> String {
        self.location.key()
    }
}

/// Output of [`resolve`].
#[derive(Debug, Clone, Default)]
pub struct NestedResolution {
    pub jars: Vec<ResolvedNestedJar>,
    pub conflicts: ConflictReport,
}

impl ResolutionSnapshot {
    pub fn resolve_nested(&self) -> NestedResolution {
        resolve(&self.roots, &self.artifacts)
    }
}

#[derive(Default)]
struct EdgeScan {
    known: HashSet<ModuleLocation>,
    versions: HashMap<ModuleLocation, String>,
    ranges: HashMap<ModuleLocation, String>,
    conflicts: ConflictReport,
}

/// Compute the jars to nest from the roots' direct edges and the resolved artifacts.
///
/// The result holds one jar per identity, sorted by `group:artifact`.
pub fn resolve(roots: &[RootComponent], artifacts: &[ResolvedArtifact]) -> NestedResolution {
    let mut scan = EdgeScan::default();
    for root in roots {
        for dependency in &root.dependencies {
            scan.record(dependency);
        }
    }

    let mut jars: Vec<ResolvedNestedJar> = Vec::new();
    let mut chosen: HashMap<ModuleLocation, (usize, bool)> = HashMap::new();
    for artifact in artifacts {
        let Some((location, variant_version)) = identify(&artifact.variant) else {
            tracing::debug!("no module identity for {}", artifact.file.display());
            continue;
        };
        if !scan.known.contains(&location) {
            tracing::debug!("{location} is not a direct dependency, not nesting");
            continue;
        }

        let graph_version = scan.versions.get(&location);
        let version = graph_version.cloned().or_else(|| variant_version.clone());
        let range = scan
            .ranges
            .get(&location)
            .cloned()
            .or_else(|| variant_version.as_deref().map(open_range));
        let (Some(version), Some(version_range)) = (version, range) else {
            tracing::debug!("no version for {location}, dropping {}", artifact.file.display());
            continue;
        };

        let matches_graph = graph_version.is_some() && graph_version == variant_version.as_ref();
        let jar = ResolvedNestedJar {
            file: artifact.file.clone(),
            location: location.clone(),
            version,
            version_range,
        };
        match chosen.get(&location) {
            None => {
                chosen.insert(location, (jars.len(), matches_graph));
                jars.push(jar);
            }
            Some(&(index, previous_matches)) if matches_graph && !previous_matches => {
                tracing::debug!("{location}: preferring {}", artifact.file.display());
                jars[index] = jar;
                chosen.insert(location, (index, true));
            }
            Some(_) => {
                tracing::debug!(
                    "{location}: ignoring duplicate artifact {}",
                    artifact.file.display()
                );
            }
        }
    }

    jars.sort_by_key(ResolvedNestedJar::sort_key);
    NestedResolution {
        jars,
        conflicts: scan.conflicts,
    }
}

impl EdgeScan {
    fn record(&mut self, dependency: &DependencyResult) {
        let DependencyResult::Resolved { requested, variant } = dependency else {
            return;
        };
        let Some((location, version)) = identify(variant) else {
            return;
        };
        self.known.insert(location.clone());

        let requested_range = match requested {
            ComponentSelector::Module(selector) => requested_range(selector),
            ComponentSelector::Project(_) => None,
        };
        let range = requested_range.or_else(|| version.as_deref().map(open_range));

        let Some(version) = version else {
            if let Some(range) = range {
                self.ranges.insert(location, range);
            }
            return;
        };

        if let Some(existing) = self.versions.get(&location) {
            if let Some(conflict) = VersionConflict::between(&location, existing, &version) {
                tracing::warn!(
                    "{location} requested at {existing} and {version}; using {}",
                    conflict.kept
                );
                let keep_existing = conflict.kept == *existing;
                self.conflicts.push(conflict);
                if keep_existing {
                    return;
                }
            }
        }

        if let Some(range) = range {
            self.ranges.insert(location.clone(), range);
        }
        self.versions.insert(location, version);
    }
}

/// Identity of a variant and the version of the coordinate it came from.
///
/// A capability matching the owning module wins, then the first capability.
/// Without capabilities the owning module itself is used.
pub fn identify(variant: &ResolvedVariant) -> Option<(ModuleLocation, Option<String>)> {
    let owner = variant.owner.as_ref();
    let coordinate = owner
        .and_then(|o| {
            variant
                .capabilities
                .iter()
                .find(|c| c.group == o.group && c.name == o.name)
        })
        .or_else(|| variant.capabilities.first())
        .or(owner)?;
    Some((
        ModuleLocation::new(&coordinate.group, &coordinate.name),
        coordinate.version.clone(),
    ))
}

fn requested_range(selector: &ModuleSelector) -> Option<String> {
    [
        (selector.strict.as_deref(), true),
        (selector.required.as_deref(), false),
        (selector.preferred.as_deref(), false),
        (selector.version.as_deref(), false),
    ]
    .into_iter()
    .find_map(|(candidate, strict)| {
        candidate
            .filter(|c| is_valid_version_range(c, strict))
            .map(str::to_string)
    })
}

/// Whether `candidate` can be used as a nested jar's version range.
///
/// Closed Maven ranges qualify; dynamic versions (`1.+`, `latest.release`,
/// `RELEASE`) never do. A bare version only qualifies from a strict
/// constraint, where it pins exactly that version.
pub fn is_valid_version_range(candidate: &str, strict: bool) -> bool {
    if candidate.trim().is_empty() || is_dynamic_version(candidate) {
        return false;
    }
    match VersionRange::parse(candidate) {
        Ok(range) if range.has_restrictions() => true,
        Ok(range) => strict && range.recommended().is_some(),
        Err(e) => {
            tracing::debug!("ignoring version range '{candidate}': {e}");
            false
        }
    }
}

/// Selectors that name whatever is newest rather than a version.
fn is_dynamic_version(candidate: &str) -> bool {
    let lower = candidate.trim().to_ascii_lowercase();
    candidate.contains('+')
        || lower.starts_with("latest.")
        || lower == "latest"
        || lower == "release"
}

fn open_range(version: &str) -> String {
    VersionRange::at_least(version).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::ModuleCoordinate;

    #[test]
    fn validity_of_candidates() {
        assert!(is_valid_version_range("[1.0,2.0)", false));
        assert!(is_valid_version_range("[1.2.3]", false));
        assert!(is_valid_version_range("1.2.3", true));
        assert!(!is_valid_version_range("1.2.3", false));
        assert!(!is_valid_version_range("1.2.+", false));
        assert!(!is_valid_version_range("1.2.+", true));
        assert!(!is_valid_version_range("[1.0,+)", false));
        assert!(!is_valid_version_range("[2.0,1.0]", false));
        assert!(!is_valid_version_range("", true));
    }

    #[test]
    fn dynamic_selectors_are_never_ranges() {
        let selectors = [
            "latest.release",
            "latest.integration",
            "Latest.Milestone",
            "RELEASE",
            "LATEST",
        ];
        for candidate in selectors {
            assert!(!is_valid_version_range(candidate, true), "{candidate}");
            assert!(!is_valid_version_range(candidate, false), "{candidate}");
        }
        assert!(is_valid_version_range("1.0-release", true));
    }

    #[test]
    fn identity_prefers_matching_capability() {
        let variant = ResolvedVariant {
            owner: Some(ModuleCoordinate::new("g", "lib", Some("1.0"))),
            capabilities: vec![
                ModuleCoordinate::new("g", "lib-extra", Some("9.9")),
                ModuleCoordinate::new("g", "lib", Some("1.0")),
            ],
        };
        let (location, version) = identify(&variant).unwrap();
        assert_eq!(location, ModuleLocation::new("g", "lib"));
        assert_eq!(version.as_deref(), Some("1.0"));
    }

    #[test]
    fn identity_falls_back_to_first_capability_then_owner() {
        let variant = ResolvedVariant {
            owner: Some(ModuleCoordinate::new("g", "lib", Some("1.0"))),
            capabilities: vec![ModuleCoordinate::new("g", "lib-test-fixtures", Some("1.0"))],
        };
        assert_eq!(identify(&variant).unwrap().0.artifact, "lib-test-fixtures");

        let variant = ResolvedVariant {
            owner: Some(ModuleCoordinate::new("g", "lib", Some("1.0"))),
            capabilities: vec![],
        };
        assert_eq!(identify(&variant).unwrap().0.artifact, "lib");

        assert!(identify(&ResolvedVariant::default()).is_none());
    }

    #[test]
    fn nested_path_uses_file_name() {
        let jar = ResolvedNestedJar {
            file: PathBuf::from("/cache/files/lib-1.0.jar"),
            location: ModuleLocation::new("g", "lib"),
            version: "1.0".into(),
            version_range: "[1.0,)".into(),
        };
        assert_eq!(jar.nested_path(), "META-INF/jars/lib-1.0.jar");
        assert_eq!(jar.sort_key(), "g:lib");
    }
}
