//! Planning and applying manifest corrections for missing dependencies.

use crate::error::ManifestError;
use crate::model::WorkspaceEntry;
use camino::Utf8Path;
use fixdeps_types::{DependencyCategory, DependencyInsertion, ManifestFix, RepoPath};
use serde_json::{Map, Value as JsonValue};

/// Packages that must be provided by the host application.
const PEER_PACKAGES: &[&str] = &["react", "react-dom"];

/// Plan the edit that declares `package` in the manifest at `nearest`.
///
/// Returns `None` when no concrete version is known; versions are never guessed.
pub fn plan_fix(
    package: &str,
    nearest: &RepoPath,
    root_version: Option<&str>,
    workspace_match: Option<&WorkspaceEntry>,
) -> Option<ManifestFix> {
    let version = match root_version {
        Some(v) => v.to_string(),
        None => format!("^{}", workspace_match?.manifest.version.as_deref()?),
    };

    let categories: &[DependencyCategory] = if PEER_PACKAGES.contains(&package) {
        &[
            DependencyCategory::PeerDependencies,
            DependencyCategory::DevDependencies,
        ]
    } else {
        &[DependencyCategory::Dependencies]
    };

    Some(ManifestFix {
        manifest: nearest.clone(),
        insertions: categories
            .iter()
            .map(|category| DependencyInsertion {
                category: *category,
                name: package.to_string(),
                version: version.clone(),
            })
            .collect(),
    })
}

/// Apply `fix` to the manifest text, returning the new file contents.
///
/// Existing key order is kept, missing category objects are appended, and the
/// output is 2-space indented JSON with one trailing newline.
pub fn apply_fix(path: &Utf8Path, original_text: &str, fix: &ManifestFix) -> Result<String, ManifestError> {
    let parse_error = |message: String| ManifestError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let mut root: JsonValue =
        serde_json::from_str(original_text).map_err(|e| parse_error(e.to_string()))?;
    let object = root
        .as_object_mut()
        .ok_or_else(|| parse_error("manifest is not a JSON object".to_string()))?;

    for insertion in &fix.insertions {
        let key = insertion.category.as_str();
        let slot = object
            .entry(key)
            .or_insert_with(|| JsonValue::Object(Map::new()));
        if slot.is_null() {
            *slot = JsonValue::Object(Map::new());
        }
        let map = slot
            .as_object_mut()
            .ok_or_else(|| parse_error(format!("\"{key}\" is not a JSON object")))?;
        map.insert(
            insertion.name.clone(),
            JsonValue::String(insertion.version.clone()),
        );
    }

    let mut text =
        serde_json::to_string_pretty(&root).map_err(|e| parse_error(e.to_string()))?;
    text.push('\n');
    Ok(text)
}
