//! Naming rules for configurations, tasks and projects derived from unit names.

/// The unit whose names are left unprefixed.
pub const DEFAULT_UNIT: &str = "main";

pub const SOURCES_ELEMENTS: &str = "sourcesElements";
pub const RUNTIME_CLASSPATH_EXPOSED: &str = "runtimeClasspathExposed";
pub const RUNTIME_CLASSPATH: &str = "runtimeClasspath";
pub const RUNTIME_ELEMENTS: &str = "runtimeElements";
pub const COMPILE_CLASSPATH_EXPOSED: &str = "compileClasspathExposed";
pub const COMPILE_CLASSPATH: &str = "compileClasspath";
pub const API_ELEMENTS: &str = "apiElements";
pub const RUNTIME_MOD_CLASSES: &str = "runtimeModClasses";
pub const COMPILE_ONLY: &str = "compileOnly";
pub const INCLUDE: &str = "include";
pub const OUTPUT_JAR: &str = "outputJar";
pub const OUTPUT_SOURCES_JAR: &str = "outputSourcesJar";

/// Qualify `base` for `feature`.
///
/// Returns `base` unchanged for the default unit, otherwise
/// `feature + Base`: `for_feature("fabric", "compileOnly") == "fabricCompileOnly"`.
pub fn for_feature(feature: &str, base: &str) -> String {
    if feature == DEFAULT_UNIT {
        return base.to_string();
    }
    format!("{feature}{}", capitalize(base))
}

/// Task name for a unit, following source-set conventions.
///
/// The default unit contributes nothing to the name, so
/// `task_name("main", Some("remap"), "jar") == "remapJar"` while
/// `task_name("fabric", Some("remap"), "jar") == "remapFabricJar"`.
pub fn task_name(unit: &str, verb: Option<&str>, target: &str) -> String {
    let unit_part = if unit == DEFAULT_UNIT { "" } else { unit };
    lower_camel(&[verb.unwrap_or(""), unit_part, target])
}

/// Project path of the build that hosts a unit.
///
/// The default unit lives in the root project; every other unit gets a
/// child project named after it.
pub fn unit_project_path(root: &str, unit: &str) -> String {
    if unit == DEFAULT_UNIT {
        return root.to_string();
    }
    if root == ":" {
        format!(":{unit}")
    } else {
        format!("{root}:{unit}")
    }
}

/// Upper-case the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lower_camel(parts: &[&str]) -> String {
    let mut out = String::new();
    for part in parts.iter().filter(|p| !p.is_empty()) {
        if out.is_empty() {
            let mut chars = part.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_lowercase());
                out.push_str(chars.as_str());
            }
        } else {
            out.push_str(&capitalize(part));
        }
    }
    out
}
