//! In-memory doubles for the domain ports.

use crate::error::WorkspaceError;
use crate::fs::ProjectFs;
use crate::policy::{EffectiveConfig, FailOn, RuleOptions, RulePolicy};
use crate::resolve::{ImportSite, SiteKind};
use crate::specifier::ModuleResolver;
use crate::workspace::{IGNORED_DIRS, WorkspaceGlobs};
use camino::{Utf8Path, Utf8PathBuf};
use fixdeps_types::Severity;
use std::collections::{BTreeMap, BTreeSet};

/// Project tree held in memory. Directories exist implicitly above each file.
#[derive(Clone, Debug, Default)]
pub struct MemFs {
    files: BTreeMap<Utf8PathBuf, String>,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, path: &str, contents: &str) -> Self {
        self.files
            .insert(Utf8PathBuf::from(path), contents.to_string());
        self
    }

    fn directories(&self) -> BTreeSet<&Utf8Path> {
        self.files
            .keys()
            .flat_map(|p| p.ancestors().skip(1))
            .collect()
    }
}

impl ProjectFs for MemFs {
    fn read_to_string(&self, path: &Utf8Path) -> std::io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::NotFound))
    }

    fn is_file(&self, path: &Utf8Path) -> bool {
        self.files.contains_key(path)
    }

    fn glob_directories(
        &self,
        root: &Utf8Path,
        patterns: &[String],
    ) -> Result<Vec<Utf8PathBuf>, WorkspaceError> {
        let globs = WorkspaceGlobs::new(patterns)?;
        Ok(self
            .directories()
            .into_iter()
            .filter_map(|dir| {
                let rel = dir.strip_prefix(root).ok()?;
                if rel.as_str().is_empty()
                    || rel.components().any(|c| IGNORED_DIRS.contains(&c.as_str()))
                {
                    return None;
                }
                globs.matches(rel.as_str()).then(|| dir.to_path_buf())
            })
            .collect())
    }
}

/// Resolver that finds only the listed packages.
#[derive(Clone, Debug, Default)]
pub struct InstalledPackages(pub BTreeSet<String>);

impl InstalledPackages {
    pub fn of(names: &[&str]) -> Self {
        Self(names.iter().map(|n| n.to_string()).collect())
    }
}

impl ModuleResolver for InstalledPackages {
    fn resolve(&self, specifier: &str, _from_file: &Utf8Path) -> Option<Utf8PathBuf> {
        let name = crate::specifier::package_name(specifier);
        self.0
            .contains(name)
            .then(|| Utf8PathBuf::from(format!("/node_modules/{specifier}")))
    }
}

pub fn config(rule: RulePolicy) -> EffectiveConfig {
    EffectiveConfig {
        profile: "strict".to_string(),
        severity: Severity::Error,
        fail_on: FailOn::Error,
        max_findings: 200,
        rule,
        core_modules: Vec::new(),
    }
}

pub fn permissive_config(project_dir: &str) -> EffectiveConfig {
    config(RulePolicy::permissive(Utf8PathBuf::from(project_dir)))
}

pub fn config_with(project_dir: &str, options: RuleOptions) -> EffectiveConfig {
    config(RulePolicy::new(Utf8PathBuf::from(project_dir), options).expect("policy"))
}

pub fn import(file: &str, specifier: &str, line: u32) -> ImportSite {
    ImportSite {
        source_file: Utf8PathBuf::from(file),
        specifier: specifier.to_string(),
        kind: SiteKind::Import,
        type_only: false,
        line: Some(line),
        col: Some(1),
    }
}
