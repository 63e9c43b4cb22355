use std::path::PathBuf;

use multisource_resolver::nested::{resolve, ModuleLocation};
use multisource_resolver::snapshot::{
    ComponentSelector, DependencyResult, ModuleCoordinate, ModuleSelector, ProjectSelector,
    ResolutionSnapshot, ResolvedArtifact, ResolvedVariant, RootComponent,
};

fn variant(group: &str, name: &str, version: &str) -> ResolvedVariant {
    ResolvedVariant {
        owner: Some(ModuleCoordinate::new(group, name, Some(version))),
        capabilities: vec![ModuleCoordinate::new(group, name, Some(version))],
    }
}

fn module_edge(selector: ModuleSelector, resolved: &str) -> DependencyResult {
    let variant = variant(&selector.group, &selector.module, resolved);
    DependencyResult::Resolved {
        requested: ComponentSelector::Module(selector),
        variant,
    }
}

fn selector(group: &str, module: &str) -> ModuleSelector {
    ModuleSelector {
        group: group.into(),
        module: module.into(),
        ..Default::default()
    }
}

fn artifact(file: &str, group: &str, name: &str, version: &str) -> ResolvedArtifact {
    ResolvedArtifact {
        file: PathBuf::from(file),
        variant: variant(group, name, version),
    }
}

fn root(dependencies: Vec<DependencyResult>) -> Vec<RootComponent> {
    vec![RootComponent {
        id: None,
        dependencies,
    }]
}

#[test]
fn strict_bare_version_is_single_point_range() {
    let roots = root(vec![module_edge(
        ModuleSelector {
            strict: Some("1.2.3".into()),
            required: Some("1.2.3".into()),
            ..selector("group", "lib")
        },
        "1.2.3",
    )]);
    let artifacts = vec![artifact("lib-1.2.3.jar", "group", "lib", "1.2.3")];

    let result = resolve(&roots, &artifacts);
    assert_eq!(result.jars.len(), 1);
    let jar = &result.jars[0];
    assert_eq!(jar.version, "1.2.3");
    assert_eq!(jar.version_range, "1.2.3");
    assert_eq!(jar.location, ModuleLocation::new("group", "lib"));
}

#[test]
fn dynamic_version_falls_back_to_open_range() {
    let roots = root(vec![module_edge(
        ModuleSelector {
            required: Some("1.2.+".into()),
            version: Some("1.2.+".into()),
            ..selector("group", "lib")
        },
        "1.2.3",
    )]);
    let artifacts = vec![artifact("lib-1.2.3.jar", "group", "lib", "1.2.3")];

    let result = resolve(&roots, &artifacts);
    assert_eq!(result.jars[0].version, "1.2.3");
    assert_eq!(result.jars[0].version_range, "[1.2.3,)");
}

#[test]
fn strict_latest_selector_falls_back_to_open_range() {
    let roots = root(vec![module_edge(
        ModuleSelector {
            strict: Some("latest.release".into()),
            ..selector("group", "lib")
        },
        "3.1",
    )]);
    let artifacts = vec![artifact("lib-3.1.jar", "group", "lib", "3.1")];

    let result = resolve(&roots, &artifacts);
    assert_eq!(result.jars[0].version, "3.1");
    assert_eq!(result.jars[0].version_range, "[3.1,)");
}

#[test]
fn artifact_without_any_version_is_dropped() {
    let unversioned = ResolvedVariant {
        owner: Some(ModuleCoordinate::new("group", "lib", None)),
        capabilities: vec![ModuleCoordinate::new("group", "lib", None)],
    };
    let roots = root(vec![
        DependencyResult::Resolved {
            requested: ComponentSelector::Module(ModuleSelector {
                version: Some("1.+".into()),
                ..selector("group", "lib")
            }),
            variant: unversioned.clone(),
        },
        module_edge(selector("group", "other"), "1.0"),
    ]);
    let artifacts = vec![
        ResolvedArtifact {
            file: PathBuf::from("lib.jar"),
            variant: unversioned,
        },
        artifact("other-1.0.jar", "group", "other", "1.0"),
    ];

    let result = resolve(&roots, &artifacts);
    assert_eq!(result.jars.len(), 1);
    assert_eq!(result.jars[0].location, ModuleLocation::new("group", "other"));
}

#[test]
fn explicit_range_is_kept_verbatim() {
    let roots = root(vec![module_edge(
        ModuleSelector {
            required: Some("[1.0,2.0)".into()),
            ..selector("group", "lib")
        },
        "1.5",
    )]);
    let artifacts = vec![artifact("lib-1.5.jar", "group", "lib", "1.5")];
    let result = resolve(&roots, &artifacts);
    assert_eq!(result.jars[0].version_range, "[1.0,2.0)");
    assert_eq!(result.jars[0].version, "1.5");
}

#[test]
fn duplicate_identity_collapses_to_one() {
    let roots = root(vec![module_edge(selector("group", "lib"), "2.0")]);
    let artifacts = vec![
        artifact("old/lib-1.0.jar", "group", "lib", "1.0"),
        artifact("new/lib-2.0.jar", "group", "lib", "2.0"),
        artifact("other/lib-2.0.jar", "group", "lib", "2.0"),
    ];

    let result = resolve(&roots, &artifacts);
    assert_eq!(result.jars.len(), 1);
    assert_eq!(result.jars[0].file, PathBuf::from("new/lib-2.0.jar"));
    assert_eq!(result.jars[0].version, "2.0");
}

#[test]
fn transitive_artifacts_are_not_nested() {
    let roots = root(vec![module_edge(selector("group", "lib"), "1.0")]);
    let artifacts = vec![
        artifact("lib-1.0.jar", "group", "lib", "1.0"),
        artifact("transitive-3.0.jar", "group", "transitive", "3.0"),
    ];

    let result = resolve(&roots, &artifacts);
    let names: Vec<String> = result.jars.iter().map(|j| j.location.key()).collect();
    assert_eq!(names, ["group:lib"]);
}

#[test]
fn unresolved_and_project_edges() {
    let roots = root(vec![
        DependencyResult::Unresolved {
            requested: ComponentSelector::Module(selector("group", "missing")),
            failure: "Could not find group:missing".into(),
        },
        DependencyResult::Resolved {
            requested: ComponentSelector::Project(ProjectSelector {
                path: ":api".into(),
            }),
            variant: variant("com.example", "api", "0.1.0"),
        },
    ]);
    let artifacts = vec![
        artifact("missing-1.0.jar", "group", "missing", "1.0"),
        artifact("api-0.1.0.jar", "com.example", "api", "0.1.0"),
    ];

    let result = resolve(&roots, &artifacts);
    assert_eq!(result.jars.len(), 1);
    assert_eq!(result.jars[0].location.artifact, "api");
    assert_eq!(result.jars[0].version_range, "[0.1.0,)");
}

#[test]
fn output_sorted_by_group_artifact_string() {
    let roots = root(vec![
        module_edge(selector("a", "b"), "1"),
        module_edge(selector("a.b", "c"), "1"),
        module_edge(selector("A", "z"), "1"),
    ]);
    let artifacts = vec![
        artifact("ab.jar", "a", "b", "1"),
        artifact("abc.jar", "a.b", "c", "1"),
        artifact("az.jar", "A", "z", "1"),
    ];

    let result = resolve(&roots, &artifacts);
    let keys: Vec<String> = result.jars.iter().map(|j| j.sort_key()).collect();
    assert_eq!(keys, ["A:z", "a.b:c", "a:b"]);
}

#[test]
fn conflicting_edges_keep_highest_version() {
    let roots = vec![
        RootComponent {
            id: Some("include".into()),
            dependencies: vec![module_edge(
                ModuleSelector {
                    required: Some("[2.0,3.0)".into()),
                    ..selector("group", "lib")
                },
                "2.1",
            )],
        },
        RootComponent {
            id: Some("fabricInclude".into()),
            dependencies: vec![module_edge(selector("group", "lib"), "1.4")],
        },
    ];
    let artifacts = vec![artifact("lib-2.1.jar", "group", "lib", "2.1")];

    let result = resolve(&roots, &artifacts);
    assert_eq!(result.jars[0].version, "2.1");
    assert_eq!(result.jars[0].version_range, "[2.0,3.0)");
    assert_eq!(result.conflicts.len(), 1);
    let conflict = result.conflicts.iter().next().unwrap();
    assert_eq!(conflict.kept, "2.1");
    assert_eq!(conflict.discarded, "1.4");
}

#[test]
fn equal_versions_let_later_edge_win() {
    let roots = root(vec![
        module_edge(
            ModuleSelector {
                required: Some("[1.0,2.0)".into()),
                ..selector("group", "lib")
            },
            "1.0",
        ),
        module_edge(
            ModuleSelector {
                strict: Some("[1.0]".into()),
                ..selector("group", "lib")
            },
            "1.0",
        ),
    ]);
    let artifacts = vec![artifact("lib-1.0.jar", "group", "lib", "1.0")];

    let result = resolve(&roots, &artifacts);
    assert!(result.conflicts.is_empty());
    assert_eq!(result.jars[0].version_range, "[1.0]");
}

#[test]
fn snapshot_file_paths_resolve_against_snapshot_dir() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("snapshot.json");
    std::fs::write(
        &path,
        r#"{
            "roots": [{ "dependencies": [
                { "requested": { "module": { "group": "g", "module": "lib", "version": "1.0" } },
                  "variant": { "owner": { "group": "g", "name": "lib", "version": "1.0" },
                               "capabilities": [{ "group": "g", "name": "lib", "version": "1.0" }] } }
            ] }],
            "artifacts": [
                { "file": "libs/lib-1.0.jar",
                  "variant": { "owner": { "group": "g", "name": "lib", "version": "1.0" },
                               "capabilities": [{ "group": "g", "name": "lib", "version": "1.0" }] } }
            ]
        }"#,
    )
    .unwrap();

    let snapshot = ResolutionSnapshot::from_path(&path).unwrap();
    let result = snapshot.resolve_nested();
    assert_eq!(result.jars.len(), 1);
    assert_eq!(result.jars[0].file, tmp.path().join("libs/lib-1.0.jar"));
    assert_eq!(result.jars[0].version_range, "[1.0,)");
}
