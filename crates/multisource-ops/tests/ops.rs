use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use multisource_core::manifest::load_model;
use multisource_ops::ops_closure::ancestors;
use multisource_ops::ops_nest::{nest, NestOptions};
use multisource_ops::locate_manifest;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests/fixtures")
}

fn write_jar(path: &Path, entries: &[(&str, &[u8])]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut zip = zip::ZipWriter::new(std::fs::File::create(path).unwrap());
    for (name, data) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap();
}

#[test]
fn closure_of_fixture_units() {
    let model = load_model(&fixtures_dir().join("multiloader.toml")).unwrap();
    assert_eq!(ancestors(&model, "fabric").unwrap(), ["api", "main"]);
    assert!(ancestors(&model, "main").unwrap().is_empty());
    assert!(ancestors(&model, "quilt").is_err());
}

#[test]
fn locate_manifest_walks_up() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("Multisource.toml"), "").unwrap();
    let nested = tmp.path().join("src/main");
    std::fs::create_dir_all(&nested).unwrap();
    assert_eq!(
        locate_manifest(&nested, None).unwrap(),
        tmp.path().join("Multisource.toml")
    );
    assert_eq!(
        locate_manifest(&nested, Some(Path::new("custom.toml"))).unwrap(),
        nested.join("custom.toml")
    );
    assert!(locate_manifest(TempDir::new().unwrap().path(), None).is_err());
}

#[test]
fn nest_from_snapshot() {
    let tmp = TempDir::new().unwrap();
    write_jar(
        &tmp.path().join("build/mod.jar"),
        &[("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0\n\n")],
    );
    write_jar(
        &tmp.path().join("deps/lib-1.0.jar"),
        &[("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0\n\n")],
    );
    write_jar(
        &tmp.path().join("deps/transitive-1.0.jar"),
        &[("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0\n\n")],
    );
    std::fs::write(
        tmp.path().join("snapshot.json"),
        r#"{
          "roots": [{ "dependencies": [
            { "requested": { "module": { "group": "g", "module": "lib", "version": "1.0" } },
              "variant": { "owner": { "group": "g", "name": "lib", "version": "1.0" },
                           "capabilities": [{ "group": "g", "name": "lib", "version": "1.0" }] } }
          ] }],
          "artifacts": [
            { "file": "deps/lib-1.0.jar",
              "variant": { "owner": { "group": "g", "name": "lib", "version": "1.0" } } },
            { "file": "deps/transitive-1.0.jar",
              "variant": { "owner": { "group": "g", "name": "transitive", "version": "1.0" } } }
          ]
        }"#,
    )
    .unwrap();

    let opts = NestOptions {
        snapshot: PathBuf::from("snapshot.json"),
        input: PathBuf::from("build/mod.jar"),
        destination_dir: PathBuf::from("build/libs"),
        base_name: "mod".into(),
        archive_version: "1.0".into(),
        classifier: "neoforge".into(),
        fabric: false,
        neoforge: true,
        work_dir: None,
    };
    let archive = nest(tmp.path(), &opts).unwrap();
    assert_eq!(archive, tmp.path().join("build/libs/mod-1.0-neoforge.jar"));

    let mut zip = zip::ZipArchive::new(std::fs::File::open(&archive).unwrap()).unwrap();
    let names: Vec<String> = zip.file_names().map(str::to_string).collect();
    assert!(names.contains(&"META-INF/jars/lib-1.0.jar".to_string()));
    assert!(!names.iter().any(|n| n.contains("transitive")));

    let mut metadata = String::new();
    zip.by_name("META-INF/jarjar/metadata.json")
        .unwrap()
        .read_to_string(&mut metadata)
        .unwrap();
    assert!(metadata.contains("\"range\": \"[1.0,)\""));
}
