//! Closure resolution over the loader set graph.
//!
//! The closure of a unit is every unit reachable by following parent links.
//! The walk tracks the units on the current descent path rather than every
//! unit seen so far, so a shared grandparent reached through two parents is
//! fine while a unit reachable from itself is rejected.

use std::collections::BTreeSet;

use multisource_util::errors::MultisourceError;

use crate::loader_set::{LoaderGraph, LoaderSet};

/// Compute the transitive ancestors of `name`.
///
/// The result never contains `name` itself. Fails with
/// [`MultisourceError::CircularDependency`] when a parent is already on the
/// descent path, reporting the chain as `a -> b -> ... -> a`, and with
/// [`MultisourceError::UnknownUnit`] when a parent was never declared.
pub fn resolve_ancestors(
    name: &str,
    graph: &LoaderGraph,
) -> Result<BTreeSet<String>, MultisourceError> {
    let start = lookup(graph, name)?;
    let mut ancestors = BTreeSet::new();
    let mut path = vec![name];
    traverse(start, graph, &mut ancestors, &mut path)?;
    tracing::trace!("closure of {name}: {ancestors:?}");
    Ok(ancestors)
}

fn traverse<'a>(
    set: &'a LoaderSet,
    graph: &'a LoaderGraph,
    ancestors: &mut BTreeSet<String>,
    path: &mut Vec<&'a str>,
) -> Result<(), MultisourceError> {
    for parent in set.parents() {
        if path.contains(&parent.as_str()) {
            let mut chain = path.join(" -> ");
            chain.push_str(" -> ");
            chain.push_str(parent);
            return Err(MultisourceError::CircularDependency { chain });
        }
        ancestors.insert(parent.clone());
        let next = lookup(graph, parent)?;
        path.push(parent);
        traverse(next, graph, ancestors, path)?;
        path.pop();
    }
    Ok(())
}

fn lookup<'a>(graph: &'a LoaderGraph, name: &str) -> Result<&'a LoaderSet, MultisourceError> {
    graph.get(name).ok_or_else(|| MultisourceError::UnknownUnit {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, &[&str])]) -> LoaderGraph {
        let mut graph = LoaderGraph::new();
        for (name, parents) in edges {
            let set = graph.get_or_create(name);
            for parent in *parents {
                set.parent(*parent);
            }
        }
        graph
    }

    fn set_of(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn root_unit_has_no_ancestors() {
        let g = graph(&[("main", &[])]);
        assert!(resolve_ancestors("main", &g).unwrap().is_empty());
    }

    #[test]
    fn loaders_inherit_main() {
        let g = graph(&[("main", &[]), ("fabric", &["main"]), ("neoforge", &["main"])]);
        assert_eq!(resolve_ancestors("fabric", &g).unwrap(), set_of(&["main"]));
        assert_eq!(resolve_ancestors("neoforge", &g).unwrap(), set_of(&["main"]));
    }

    #[test]
    fn closure_is_transitive() {
        let g = graph(&[
            ("main", &[]),
            ("common", &["main"]),
            ("fabric", &["common"]),
        ]);
        assert_eq!(
            resolve_ancestors("fabric", &g).unwrap(),
            set_of(&["common", "main"])
        );
    }

    #[test]
    fn diamond_is_not_a_cycle() {
        let g = graph(&[
            ("main", &[]),
            ("left", &["main"]),
            ("right", &["main"]),
            ("leaf", &["left", "right"]),
        ]);
        assert_eq!(
            resolve_ancestors("leaf", &g).unwrap(),
            set_of(&["left", "main", "right"])
        );
    }

    #[test]
    fn duplicate_parents_are_harmless() {
        let g = graph(&[("main", &[]), ("fabric", &["main", "main"])]);
        assert_eq!(resolve_ancestors("fabric", &g).unwrap(), set_of(&["main"]));
    }

    #[test]
    fn two_unit_cycle_reports_chain() {
        let g = graph(&[("a", &["b"]), ("b", &["a"])]);
        let err = resolve_ancestors("a", &g).unwrap_err();
        match err {
            MultisourceError::CircularDependency { chain } => assert_eq!(chain, "a -> b -> a"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn three_unit_cycle_reports_chain_in_order() {
        let g = graph(&[("a", &["b"]), ("b", &["c"]), ("c", &["a"])]);
        let err = resolve_ancestors("a", &g).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Circular dependency detected: a -> b -> c -> a"
        );
    }

    #[test]
    fn self_parent_is_a_cycle() {
        let g = graph(&[("a", &["a"])]);
        let err = resolve_ancestors("a", &g).unwrap_err();
        assert_eq!(err.to_string(), "Circular dependency detected: a -> a");
    }

    #[test]
    fn cycle_above_the_start_is_detected() {
        let g = graph(&[("leaf", &["b"]), ("b", &["c"]), ("c", &["b"])]);
        let err = resolve_ancestors("leaf", &g).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Circular dependency detected: leaf -> b -> c -> b"
        );
    }

    #[test]
    fn undeclared_parent_is_unknown() {
        let g = graph(&[("fabric", &["main"])]);
        let err = resolve_ancestors("fabric", &g).unwrap_err();
        assert!(matches!(err, MultisourceError::UnknownUnit { ref name } if name == "main"));
    }

    #[test]
    fn unknown_start_unit() {
        let g = graph(&[("main", &[])]);
        assert!(matches!(
            resolve_ancestors("quilt", &g),
            Err(MultisourceError::UnknownUnit { .. })
        ));
    }
}
