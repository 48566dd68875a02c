use crate::error::PolicyError;
use camino::{Utf8Path, Utf8PathBuf};
use fixdeps_types::Severity;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    Error,
    Warning,
}

/// Whether a non-runtime dependency category may satisfy an import.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DepsAllowance {
    #[default]
    Allow,
    Deny,
    /// Allowed only for source files matching one of these globs.
    AllowForPaths(Vec<String>),
}

/// User-facing rule options before glob compilation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleOptions {
    pub dev_dependencies: DepsAllowance,
    pub optional_dependencies: DepsAllowance,
    pub peer_dependencies: DepsAllowance,
    /// Directories whose manifests are merged instead of using the nearest one.
    pub package_dirs: Vec<Utf8PathBuf>,
}

#[derive(Clone, Debug)]
enum AllowanceMatcher {
    Fixed(bool),
    Globs(GlobSet),
}

impl AllowanceMatcher {
    fn compile(
        option: &'static str,
        allowance: &DepsAllowance,
        project_dir: &Utf8Path,
    ) -> Result<Self, PolicyError> {
        let patterns = match allowance {
            DepsAllowance::Allow => return Ok(AllowanceMatcher::Fixed(true)),
            DepsAllowance::Deny => return Ok(AllowanceMatcher::Fixed(false)),
            DepsAllowance::AllowForPaths(patterns) => patterns,
        };

        let escaped_root = globset::escape(project_dir.as_str().trim_end_matches('/'));
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let anchored = if pattern.starts_with('/') {
                pattern.clone()
            } else {
                format!("{escaped_root}/{}", pattern.trim_start_matches("./"))
            };
            for candidate in [pattern.as_str(), anchored.as_str()] {
                let glob = GlobBuilder::new(candidate)
                    .literal_separator(true)
                    .build()
                    .map_err(|e| PolicyError::InvalidGlob {
                        option,
                        pattern: pattern.clone(),
                        message: e.kind().to_string(),
                    })?;
                builder.add(glob);
            }
        }
        let set = builder.build().map_err(|e| PolicyError::InvalidGlob {
            option,
            pattern: patterns.join(", "),
            message: e.to_string(),
        })?;
        Ok(AllowanceMatcher::Globs(set))
    }

    fn allows(&self, file: &Utf8Path) -> bool {
        match self {
            AllowanceMatcher::Fixed(allowed) => *allowed,
            AllowanceMatcher::Globs(set) => set.is_match(file.as_str()),
        }
    }
}

/// Compiled rule configuration for one project.
#[derive(Clone, Debug)]
pub struct RulePolicy {
    pub project_dir: Utf8PathBuf,
    pub package_dirs: Vec<Utf8PathBuf>,
    dev: AllowanceMatcher,
    optional: AllowanceMatcher,
    peer: AllowanceMatcher,
}

/// Per-file view of the rule options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyConfig {
    pub allow_dev_deps: bool,
    pub allow_opt_deps: bool,
    pub allow_peer_deps: bool,
    pub project_root_dir: Utf8PathBuf,
}

impl RulePolicy {
    /// Glob patterns match a file's absolute path either as written or joined onto
    /// `project_dir`.
    pub fn new(project_dir: Utf8PathBuf, options: RuleOptions) -> Result<Self, PolicyError> {
        let dev = AllowanceMatcher::compile(
            "dev_dependencies",
            &options.dev_dependencies,
            &project_dir,
        )?;
        let optional = AllowanceMatcher::compile(
            "optional_dependencies",
            &options.optional_dependencies,
            &project_dir,
        )?;
        let peer = AllowanceMatcher::compile(
            "peer_dependencies",
            &options.peer_dependencies,
            &project_dir,
        )?;
        Ok(Self {
            project_dir,
            package_dirs: options.package_dirs,
            dev,
            optional,
            peer,
        })
    }

    /// Every category allowed, nearest manifest used.
    pub fn permissive(project_dir: Utf8PathBuf) -> Self {
        Self {
            project_dir,
            package_dirs: Vec::new(),
            dev: AllowanceMatcher::Fixed(true),
            optional: AllowanceMatcher::Fixed(true),
            peer: AllowanceMatcher::Fixed(true),
        }
    }

    pub fn for_file(&self, file: &Utf8Path) -> PolicyConfig {
        PolicyConfig {
            allow_dev_deps: self.dev.allows(file),
            allow_opt_deps: self.optional.allows(file),
            allow_peer_deps: self.peer.allows(file),
            project_root_dir: self.project_dir.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    /// Severity of every finding this run emits.
    pub severity: Severity,
    pub fail_on: FailOn,
    pub max_findings: usize,
    pub rule: RulePolicy,
    /// Extra module names treated as builtin.
    pub core_modules: Vec<String>,
}

impl EffectiveConfig {
    pub fn project_dir(&self) -> &Utf8Path {
        &self.rule.project_dir
    }
}
