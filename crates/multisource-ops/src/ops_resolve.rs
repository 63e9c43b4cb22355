//! Operation: show which jars a resolution snapshot nests.

use std::path::PathBuf;

use serde_json::{json, Value};

use multisource_resolver::nested::NestedResolution;
use multisource_resolver::snapshot::ResolutionSnapshot;
use multisource_util::errors::MultisourceError;

/// Options for `multisource resolve`.
pub struct ResolveOptions {
    pub snapshot: PathBuf,
    /// Print JSON instead of text.
    pub json: bool,
}

pub fn resolve(opts: &ResolveOptions) -> miette::Result<()> {
    let snapshot = ResolutionSnapshot::from_path(&opts.snapshot)?;
    let result = snapshot.resolve_nested();
    if opts.json {
        let text = serde_json::to_string_pretty(&to_json(&result)).map_err(|e| {
            MultisourceError::Generic {
                message: format!("Failed to serialize result: {e}"),
            }
        })?;
        println!("{text}");
    } else {
        print!("{}", render_text(&result));
    }
    Ok(())
}

pub fn to_json(result: &NestedResolution) -> Value {
    let jars: Vec<Value> = result
        .jars
        .iter()
        .map(|jar| {
            json!({
                "file": jar.file.display().to_string(),
                "group": jar.location.group,
                "artifact": jar.location.artifact,
                "version": jar.version,
                "versionRange": jar.version_range,
                "path": jar.nested_path(),
            })
        })
        .collect();
    let conflicts: Vec<Value> = result
        .conflicts
        .iter()
        .map(|c| {
            json!({
                "module": c.module.key(),
                "kept": c.kept,
                "discarded": c.discarded,
            })
        })
        .collect();
    json!({ "jars": jars, "conflicts": conflicts })
}

pub fn render_text(result: &NestedResolution) -> String {
    let mut out = String::new();
    if result.jars.is_empty() {
        out.push_str("No nested jars.\n");
    }
    for jar in &result.jars {
        out.push_str(&format!(
            "{}:{} {} -> {}\n",
            jar.location, jar.version, jar.version_range, jar.nested_path()
        ));
    }
    if !result.conflicts.is_empty() {
        out.push_str(&result.conflicts.to_string());
    }
    out
}
