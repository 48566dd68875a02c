use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `fixdeps.toml` schema v1.
///
/// Keys accept snake_case and the camelCase spelling used by JavaScript tooling.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FixdepsConfigV1 {
    /// Optional schema string for tooling (`fixdeps.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `strict` (default) or `warn`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Project root holding the root package.json. Required unless overridden.
    #[serde(default, alias = "projectDir", skip_serializing_if = "Option::is_none")]
    pub project_dir: Option<String>,

    /// Manifest directories merged instead of using each file's nearest package.json.
    #[serde(default, alias = "packageDir", skip_serializing_if = "Option::is_none")]
    pub package_dir: Option<PathSetting>,

    #[serde(default, alias = "devDependencies", skip_serializing_if = "Option::is_none")]
    pub dev_dependencies: Option<AllowanceSetting>,

    #[serde(
        default,
        alias = "optionalDependencies",
        skip_serializing_if = "Option::is_none"
    )]
    pub optional_dependencies: Option<AllowanceSetting>,

    #[serde(default, alias = "peerDependencies", skip_serializing_if = "Option::is_none")]
    pub peer_dependencies: Option<AllowanceSetting>,

    /// Extra module names treated as builtin (e.g. `electron`).
    #[serde(default, alias = "coreModules", skip_serializing_if = "Vec::is_empty")]
    pub core_modules: Vec<String>,

    /// Override the profile severity: `info`, `warning`, `error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    /// When to fail the check: `error` (default) or `warning`.
    #[serde(default, alias = "failOn", skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<String>,

    /// How many findings to emit before truncating the list.
    #[serde(default, alias = "maxFindings", skip_serializing_if = "Option::is_none")]
    pub max_findings: Option<u32>,
}

/// `true`/`false`, or the source-file globs for which the category is allowed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum AllowanceSetting {
    Flag(bool),
    Globs(Vec<String>),
}

/// A single directory or a list of them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum PathSetting {
    One(String),
    Many(Vec<String>),
}

impl PathSetting {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            PathSetting::One(p) => vec![p],
            PathSetting::Many(ps) => ps,
        }
    }
}
