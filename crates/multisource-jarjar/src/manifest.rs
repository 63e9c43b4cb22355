//! Reading `META-INF/MANIFEST.MF` main attributes.

use std::collections::BTreeMap;
use std::path::Path;

use multisource_util::errors::MultisourceError;

use crate::archive::read_entry;

pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";
pub const OBFUSCATED_BY: &str = "Obfuscated-By";

/// Parse the main section of a manifest into name/value pairs.
///
/// The main section ends at the first blank line. Lines starting with a
/// single space continue the previous value. Returns `None` when a line is
/// neither a continuation nor a `Name: value` pair.
pub fn main_attributes(content: &str) -> Option<BTreeMap<String, String>> {
    let mut attributes = BTreeMap::new();
    let mut current: Option<(String, String)> = None;

    for line in content.lines() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            break;
        }
        if let Some(continued) = line.strip_prefix(' ') {
            let (_, value) = current.as_mut()?;
            value.push_str(continued);
            continue;
        }
        let (name, value) = line.split_once(": ")?;
        if name.is_empty() {
            return None;
        }
        if let Some((name, value)) = current.take() {
            attributes.insert(name, value);
        }
        current = Some((name.to_string(), value.to_string()));
    }
    if let Some((name, value)) = current {
        attributes.insert(name, value);
    }
    Some(attributes)
}

/// Whether a nested jar declares `Obfuscated-By` in its main manifest section.
///
/// A jar without a manifest is an error; an unreadable manifest counts as
/// not obfuscated.
pub fn is_obfuscated(jar: &Path) -> miette::Result<bool> {
    let Some(bytes) = read_entry(jar, MANIFEST_PATH)? else {
        return Err(MultisourceError::MissingManifest {
            path: jar.display().to_string(),
        }
        .into());
    };
    let Some(attributes) = std::str::from_utf8(&bytes).ok().and_then(main_attributes) else {
        tracing::warn!("malformed manifest in {}", jar.display());
        return Ok(false);
    };
    Ok(attributes
        .keys()
        .any(|name| name.eq_ignore_ascii_case(OBFUSCATED_BY)))
}
