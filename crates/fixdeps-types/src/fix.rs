use crate::RepoPath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The four dependency maps of a `package.json`.
///
/// Serialized with the manifest key spelling so fixes read like the file they edit.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum DependencyCategory {
    #[serde(rename = "dependencies")]
    Dependencies,
    #[serde(rename = "devDependencies")]
    DevDependencies,
    #[serde(rename = "optionalDependencies")]
    OptionalDependencies,
    #[serde(rename = "peerDependencies")]
    PeerDependencies,
}

impl DependencyCategory {
    pub const ALL: [DependencyCategory; 4] = [
        DependencyCategory::Dependencies,
        DependencyCategory::DevDependencies,
        DependencyCategory::OptionalDependencies,
        DependencyCategory::PeerDependencies,
    ];

    /// The manifest key for this category.
    pub fn as_str(self) -> &'static str {
        match self {
            DependencyCategory::Dependencies => "dependencies",
            DependencyCategory::DevDependencies => "devDependencies",
            DependencyCategory::OptionalDependencies => "optionalDependencies",
            DependencyCategory::PeerDependencies => "peerDependencies",
        }
    }
}

impl std::fmt::Display for DependencyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `"name": "version"` entry to add under a dependency map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DependencyInsertion {
    pub category: DependencyCategory,
    pub name: String,
    pub version: String,
}

/// A planned edit of one manifest.
///
/// Fixes only ever add entries; they never remove or rewrite existing ones.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ManifestFix {
    /// Manifest to edit, relative to the project root.
    pub manifest: RepoPath,
    pub insertions: Vec<DependencyInsertion>,
}

impl ManifestFix {
    /// Short human summary, e.g. `add "lodash": "^4.0.0" to dependencies`.
    pub fn describe(&self) -> String {
        self.insertions
            .iter()
            .map(|i| format!("add \"{}\": \"{}\" to {}", i.name, i.version, i.category))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
