use crate::error::ManifestError;
use crate::workspace::WorkspaceTool;
use camino::{Utf8Path, Utf8PathBuf};
use fixdeps_types::DependencyCategory;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Parsed `package.json`, reduced to the fields fixdeps reads.
///
/// `workspaces` and `bolt` stay untyped: real manifests put arrays, objects, and
/// the occasional `false` there, and none of those should make the manifest unreadable.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub dependencies: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub dev_dependencies: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub optional_dependencies: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub peer_dependencies: Option<BTreeMap<String, String>>,

    #[serde(default)]
    pub workspaces: Option<JsonValue>,
    #[serde(default)]
    pub bolt: Option<JsonValue>,
}

impl Manifest {
    /// Package name, treating an empty string as absent.
    pub fn package_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Version declared for `package` in `dependencies`, then `devDependencies`.
    pub fn declared_version(&self, package: &str) -> Option<&str> {
        [&self.dependencies, &self.dev_dependencies]
            .into_iter()
            .flatten()
            .find_map(|map| map.get(package))
            .map(String::as_str)
    }

    /// Workspace globs declared for the enabled tools.
    ///
    /// Yarn's `workspaces` wins over `bolt.workspaces` whenever it is present and
    /// truthy, even if it carries no usable patterns. `None` means the manifest
    /// declares no workspaces for these tools.
    pub fn workspace_patterns(&self, tools: &[WorkspaceTool]) -> Option<Vec<String>> {
        if tools.contains(&WorkspaceTool::Yarn)
            && let Some(ws) = self.workspaces.as_ref().filter(|v| is_truthy(v))
        {
            return match ws {
                JsonValue::Object(map) => map.get("packages").and_then(pattern_list),
                other => pattern_list(other),
            };
        }

        if tools.contains(&WorkspaceTool::Bolt)
            && let Some(ws) = self
                .bolt
                .as_ref()
                .and_then(|b| b.get("workspaces"))
                .filter(|v| is_truthy(v))
        {
            return pattern_list(ws);
        }

        None
    }
}

fn pattern_list(value: &JsonValue) -> Option<Vec<String>> {
    match value {
        JsonValue::Array(items) => Some(
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
        ),
        JsonValue::String(s) => Some(vec![s.clone()]),
        _ => None,
    }
}

fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}

pub fn parse_manifest(path: &Utf8Path, text: &str) -> Result<Manifest, ManifestError> {
    serde_json::from_str(text).map_err(|e| ManifestError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// The four dependency maps of one manifest (or of several merged ones).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DependencyFields {
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
    pub optional_dependencies: BTreeMap<String, String>,
    pub peer_dependencies: BTreeMap<String, String>,
}

impl DependencyFields {
    pub fn extract(manifest: &Manifest) -> Self {
        Self {
            dependencies: manifest.dependencies.clone().unwrap_or_default(),
            dev_dependencies: manifest.dev_dependencies.clone().unwrap_or_default(),
            optional_dependencies: manifest.optional_dependencies.clone().unwrap_or_default(),
            peer_dependencies: manifest.peer_dependencies.clone().unwrap_or_default(),
        }
    }

    pub fn get(&self, category: DependencyCategory) -> &BTreeMap<String, String> {
        match category {
            DependencyCategory::Dependencies => &self.dependencies,
            DependencyCategory::DevDependencies => &self.dev_dependencies,
            DependencyCategory::OptionalDependencies => &self.optional_dependencies,
            DependencyCategory::PeerDependencies => &self.peer_dependencies,
        }
    }

    pub fn contains(&self, category: DependencyCategory, package: &str) -> bool {
        self.get(category).contains_key(package)
    }

    pub fn is_empty(&self) -> bool {
        DependencyCategory::ALL
            .iter()
            .all(|c| self.get(*c).is_empty())
    }

    /// Union per category; later entries win on key collisions.
    pub fn merge(&mut self, other: DependencyFields) {
        let DependencyFields {
            dependencies,
            dev_dependencies,
            optional_dependencies,
            peer_dependencies,
        } = other;
        self.dependencies.extend(dependencies);
        self.dev_dependencies.extend(dev_dependencies);
        self.optional_dependencies.extend(optional_dependencies);
        self.peer_dependencies.extend(peer_dependencies);
    }
}

/// One workspace package found by discovery.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkspaceEntry {
    /// Absolute directory containing the package.json.
    pub directory: Utf8PathBuf,
    pub name: String,
    pub manifest: Manifest,
}
