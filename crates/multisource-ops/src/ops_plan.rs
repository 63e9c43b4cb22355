//! Operation: print the per-unit build plan.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use multisource_core::manifest::load_model;
use multisource_core::plan::{BuildPlan, UnitPlan};

/// Options for `multisource plan`.
#[derive(Default)]
pub struct PlanOptions {
    pub manifest: Option<PathBuf>,
}

pub fn plan(cwd: &Path, opts: &PlanOptions) -> miette::Result<()> {
    let manifest = crate::locate_manifest(cwd, opts.manifest.as_deref())?;
    let model = load_model(&manifest)?;
    let plan = BuildPlan::new(&model)?;
    print!("{}", render_plan(&plan));
    Ok(())
}

fn list(names: &[String]) -> String {
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(", ")
    }
}

fn render_unit(out: &mut String, unit: &UnitPlan) -> std::fmt::Result {
    writeln!(out, "{} ({}) at {}", unit.name, unit.platform, unit.project_path)?;
    writeln!(out, "  closure:             {}", list(unit.jar_inputs()))?;
    writeln!(out, "  runtime mod classes: {}", list(&unit.runtime_mod_class_parents))?;
    writeln!(out, "  compile only:        {}", unit.compile_only_configuration)?;
    writeln!(out, "  include:             {}", unit.include_configuration)?;
    let configs = &unit.configurations;
    writeln!(
        out,
        "  exposed:             {}, {}",
        configs.runtime_classpath_exposed, configs.compile_classpath_exposed
    )?;
    if unit.platform.produces_output_jar() {
        writeln!(
            out,
            "  remap:               {}, {} ({})",
            unit.remap_jar_task, unit.remap_sources_jar_task, unit.remap_platform
        )?;
        if let (Some(jar), Some(sources)) = (&configs.output_jar, &configs.output_sources_jar) {
            writeln!(out, "  outputs:             {jar}, {sources}")?;
        }
        writeln!(
            out,
            "  classifiers:         {} (dev), {}",
            unit.dev_classifier, unit.output_classifier
        )?;
    }
    let mut modes = Vec::new();
    if unit.loader_metadata.fabric_descriptors {
        modes.push("fabric descriptors".to_string());
    }
    if unit.loader_metadata.neo_metadata {
        modes.push("neoforge metadata".to_string());
    }
    writeln!(out, "  jar-in-jar metadata: {}", list(&modes))
}

/// Human-readable plan, one block per unit in build order.
pub fn render_plan(plan: &BuildPlan) -> String {
    let mut out = String::new();
    for unit in plan.units() {
        let _ = render_unit(&mut out, unit);
    }
    out
}
