//! Per-site dependency resolution.

use crate::error::{ManifestError, WorkspaceError};
use crate::fingerprint::fingerprint_for_site;
use crate::fix::plan_fix;
use crate::fs::{MANIFEST_FILE, ProjectFs};
use crate::model::DependencyFields;
use crate::policy::{EffectiveConfig, PolicyConfig};
use crate::specifier::{ModuleResolver, SpecifierClass, SpecifierClassifier, package_name};
use crate::workspace::{DEFAULT_TOOLS, discover};
use camino::{Utf8Path, Utf8PathBuf};
use fixdeps_types::{DependencyCategory, Finding, Location, ManifestFix, RepoPath, ids};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteKind {
    #[default]
    Import,
    Require,
}

/// One import declaration or `require` call, as reported by source traversal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSite {
    pub source_file: Utf8PathBuf,
    pub specifier: String,
    #[serde(default)]
    pub kind: SiteKind,
    /// Type-only imports vanish at runtime and are never checked.
    #[serde(default)]
    pub type_only: bool,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub col: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionVerdict {
    Acceptable,
    MissingEntirely,
    WronglyInDevDeps,
    WronglyInOptDeps,
}

impl ResolutionVerdict {
    pub fn code(self) -> Option<&'static str> {
        match self {
            ResolutionVerdict::Acceptable => None,
            ResolutionVerdict::MissingEntirely => Some(ids::CODE_MISSING_DEPENDENCY),
            ResolutionVerdict::WronglyInDevDeps => Some(ids::CODE_DEV_DEPENDENCY_NOT_ALLOWED),
            ResolutionVerdict::WronglyInOptDeps => {
                Some(ids::CODE_OPTIONAL_DEPENDENCY_NOT_ALLOWED)
            }
        }
    }
}

/// Ports and configuration shared by every site of a run.
#[derive(Clone, Copy)]
pub struct Ports<'a> {
    pub fs: &'a dyn ProjectFs,
    pub classifier: &'a dyn SpecifierClassifier,
    pub resolver: &'a dyn ModuleResolver,
    pub config: &'a EffectiveConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SiteOutcome {
    pub verdict: ResolutionVerdict,
    pub package: String,
    /// Category that satisfied the import, for acceptable sites.
    pub satisfied_by: Option<DependencyCategory>,
    pub message: Option<String>,
    pub fix: Option<ManifestFix>,
    pub root_version: Option<String>,
    pub workspace_member: Option<String>,
}

/// Category lookup: any allowed category accepts the package, in the order
/// runtime, dev, peer, optional. Only then is a denied dev or optional listing
/// reported.
pub fn decide(
    deps: &DependencyFields,
    package: &str,
    policy: &PolicyConfig,
) -> (ResolutionVerdict, Option<DependencyCategory>) {
    use DependencyCategory::*;

    let allowed = [
        (Dependencies, true),
        (DevDependencies, policy.allow_dev_deps),
        (PeerDependencies, policy.allow_peer_deps),
        (OptionalDependencies, policy.allow_opt_deps),
    ];
    if let Some((category, _)) = allowed
        .into_iter()
        .find(|(category, allow)| *allow && deps.contains(*category, package))
    {
        return (ResolutionVerdict::Acceptable, Some(category));
    }

    if deps.contains(DevDependencies, package) {
        (ResolutionVerdict::WronglyInDevDeps, None)
    } else if deps.contains(OptionalDependencies, package) {
        (ResolutionVerdict::WronglyInOptDeps, None)
    } else {
        (ResolutionVerdict::MissingEntirely, None)
    }
}

/// Resolve one external site against already-loaded dependency maps.
///
/// `owner` is the manifest a fix would edit. Only the missing case consults
/// the project root and its workspaces; a discovery failure aborts the site.
pub fn resolve_site(
    ports: Ports<'_>,
    policy: &PolicyConfig,
    site: &ImportSite,
    deps: &DependencyFields,
    owner: Option<&Utf8Path>,
) -> Result<SiteOutcome, WorkspaceError> {
    let package = package_name(&site.specifier).to_string();
    let (verdict, satisfied_by) = decide(deps, &package, policy);

    let mut outcome = SiteOutcome {
        verdict,
        package,
        satisfied_by,
        message: None,
        fix: None,
        root_version: None,
        workspace_member: None,
    };
    let pkg = outcome.package.as_str();

    match verdict {
        ResolutionVerdict::Acceptable => {}
        ResolutionVerdict::WronglyInDevDeps => {
            outcome.message = Some(format!(
                "'{pkg}' should be listed in the package's dependencies, not devDependencies."
            ));
        }
        ResolutionVerdict::WronglyInOptDeps => {
            outcome.message = Some(format!(
                "'{pkg}' should be listed in the package's dependencies, not optionalDependencies."
            ));
        }
        ResolutionVerdict::MissingEntirely => {
            let project_dir = &policy.project_root_dir;
            let root_version = root_dependency_version(ports.fs, project_dir, pkg);

            let workspaces = match discover(ports.fs, project_dir, DEFAULT_TOOLS) {
                Ok(entries) => entries,
                Err(WorkspaceError::Manifest(err)) if err.path() == &project_dir.join(MANIFEST_FILE) => {
                    tracing::debug!(error = %err, "project root manifest unusable; no workspaces");
                    Vec::new()
                }
                Err(err) => return Err(err),
            };
            let member = workspaces.into_iter().find(|w| w.name == pkg);

            let message = if root_version.is_some() || member.is_some() {
                format!("'{pkg}' should be listed in the package's dependencies.")
            } else {
                format!("'{pkg}' should be listed in the project and package's dependencies.")
            };

            let fix = owner.and_then(|path| {
                plan_fix(
                    pkg,
                    &RepoPath::relative_to(project_dir, path),
                    root_version.as_deref(),
                    member.as_ref(),
                )
            });

            outcome.message = Some(message);
            outcome.fix = fix;
            outcome.workspace_member = member.map(|m| m.name);
            outcome.root_version = root_version;
        }
    }

    tracing::debug!(
        specifier = %site.specifier,
        package = %outcome.package,
        verdict = ?outcome.verdict,
        "resolved import site"
    );
    Ok(outcome)
}

fn root_dependency_version(fs: &dyn ProjectFs, project_dir: &Utf8Path, package: &str) -> Option<String> {
    let path = project_dir.join(MANIFEST_FILE);
    match fs.read_manifest(&path) {
        Ok(manifest) => manifest.declared_version(package).map(str::to_string),
        Err(ManifestError::NotFound { .. }) => None,
        Err(err) => {
            tracing::warn!(error = %err, "project root manifest unreadable; assuming no root version");
            None
        }
    }
}

struct LoadedDeps {
    fields: DependencyFields,
    owner: Option<Utf8PathBuf>,
}

/// Checks the sites of one source file.
///
/// Manifest problems are reported once per file, however many sites hit them.
pub struct FileCheck<'a> {
    ports: Ports<'a>,
    file: Utf8PathBuf,
    file_rel: RepoPath,
    policy: PolicyConfig,
    reported: BTreeSet<(&'static str, Utf8PathBuf)>,
}

impl<'a> FileCheck<'a> {
    pub fn new(ports: Ports<'a>, file: &Utf8Path) -> Self {
        let rule = &ports.config.rule;
        Self {
            ports,
            file: file.to_path_buf(),
            file_rel: RepoPath::relative_to(&rule.project_dir, file),
            policy: rule.for_file(file),
            reported: BTreeSet::new(),
        }
    }

    pub fn check_site(&mut self, site: &ImportSite) -> Vec<Finding> {
        let mut out = Vec::new();

        if site.type_only {
            return out;
        }
        if self.ports.classifier.classify(&site.specifier) != SpecifierClass::External {
            return out;
        }
        if self.ports.resolver.resolve(&site.specifier, &self.file).is_none() {
            tracing::debug!(specifier = %site.specifier, file = %self.file_rel, "unresolved; skipped");
            return out;
        }

        let Some(loaded) = self.load_dependencies(&mut out) else {
            return out;
        };

        match resolve_site(
            self.ports,
            &self.policy,
            site,
            &loaded.fields,
            loaded.owner.as_deref(),
        ) {
            Ok(outcome) => {
                if let Some(finding) = self.violation_finding(site, outcome, loaded.owner.as_deref()) {
                    out.push(finding);
                }
            }
            Err(err) => out.push(self.workspace_finding(site, &err)),
        }
        out
    }

    fn load_dependencies(&mut self, out: &mut Vec<Finding>) -> Option<LoadedDeps> {
        let ports = self.ports;
        let rule = &ports.config.rule;

        if !rule.package_dirs.is_empty() {
            let mut fields = DependencyFields::default();
            for dir in &rule.package_dirs {
                match ports.fs.read_manifest(&dir.join(MANIFEST_FILE)) {
                    Ok(manifest) => fields.merge(DependencyFields::extract(&manifest)),
                    Err(err) => self.report_manifest_error(out, &err),
                }
            }
            let owner = ports
                .fs
                .closest_manifest(&self.file)
                .ok()
                .flatten()
                .map(|found| found.path);
            return Some(LoadedDeps { fields, owner });
        }

        match ports.fs.closest_manifest(&self.file) {
            Ok(Some(found)) => Some(LoadedDeps {
                fields: DependencyFields::extract(&found.manifest),
                owner: Some(found.path),
            }),
            Ok(None) => {
                tracing::debug!(file = %self.file_rel, "no package.json above file; skipped");
                None
            }
            Err(err) => {
                self.report_manifest_error(out, &err);
                Some(LoadedDeps {
                    fields: DependencyFields::default(),
                    owner: None,
                })
            }
        }
    }

    fn report_manifest_error(&mut self, out: &mut Vec<Finding>, err: &ManifestError) {
        let (code, message) = match err {
            ManifestError::NotFound { .. } => (
                ids::CODE_MANIFEST_NOT_FOUND,
                "The package.json file could not be found.".to_string(),
            ),
            ManifestError::Parse { message, .. } => (
                ids::CODE_MANIFEST_PARSE_ERROR,
                format!("The package.json file could not be parsed: {message}"),
            ),
            ManifestError::Io { source, .. } => (
                ids::CODE_MANIFEST_PARSE_ERROR,
                format!("The package.json file could not be parsed: {source}"),
            ),
        };

        if !self.reported.insert((code, err.path().clone())) {
            return;
        }
        tracing::warn!(file = %self.file_rel, error = %err, "manifest unusable");

        let manifest = RepoPath::relative_to(&self.policy.project_root_dir, err.path());
        out.push(Finding {
            severity: self.ports.config.severity,
            check_id: ids::CHECK_MANIFEST_READ.to_string(),
            code: code.to_string(),
            message,
            location: Some(Location::top_of_file(self.file_rel.clone())),
            help: Some(format!("Check {manifest}.")),
            fingerprint: Some(fingerprint_for_site(
                ids::CHECK_MANIFEST_READ,
                code,
                self.file_rel.as_str(),
                Some(manifest.as_str()),
            )),
            fix: None,
            data: serde_json::json!({ "manifest": manifest }),
        });
    }

    fn violation_finding(
        &self,
        site: &ImportSite,
        outcome: SiteOutcome,
        owner: Option<&Utf8Path>,
    ) -> Option<Finding> {
        let code = outcome.verdict.code()?;
        let message = outcome.message?;
        let owner = owner.map(|p| RepoPath::relative_to(&self.policy.project_root_dir, p));

        let help = match (&outcome.fix, &owner) {
            (Some(fix), _) => format!("Run with --fix to {}.", fix.describe()),
            (None, Some(manifest)) => {
                format!("Declare '{}' in {manifest}.", outcome.package)
            }
            (None, None) => format!("Declare '{}' in the owning package.json.", outcome.package),
        };

        Some(Finding {
            severity: self.ports.config.severity,
            check_id: ids::CHECK_DEPS_EXTRANEOUS.to_string(),
            code: code.to_string(),
            message,
            location: Some(self.site_location(site)),
            help: Some(help),
            fingerprint: Some(fingerprint_for_site(
                ids::CHECK_DEPS_EXTRANEOUS,
                code,
                self.file_rel.as_str(),
                Some(&outcome.package),
            )),
            fix: outcome.fix,
            data: serde_json::json!({
                "package": outcome.package,
                "specifier": site.specifier,
                "kind": site.kind,
                "manifest": owner,
                "root_version": outcome.root_version,
                "workspace": outcome.workspace_member,
            }),
        })
    }

    fn workspace_finding(&self, site: &ImportSite, err: &WorkspaceError) -> Finding {
        let package = package_name(&site.specifier);
        tracing::warn!(file = %self.file_rel, error = %err, "workspace discovery failed");
        Finding {
            severity: self.ports.config.severity,
            check_id: ids::CHECK_WORKSPACE_DISCOVERY.to_string(),
            code: ids::CODE_WORKSPACE_INVALID.to_string(),
            message: err.to_string(),
            location: Some(self.site_location(site)),
            help: Some("Every workspace package.json must declare a name.".to_string()),
            fingerprint: Some(fingerprint_for_site(
                ids::CHECK_WORKSPACE_DISCOVERY,
                ids::CODE_WORKSPACE_INVALID,
                self.file_rel.as_str(),
                Some(package),
            )),
            fix: None,
            data: serde_json::json!({ "package": package, "specifier": site.specifier }),
        }
    }

    fn site_location(&self, site: &ImportSite) -> Location {
        Location {
            path: self.file_rel.clone(),
            line: site.line,
            col: site.col,
        }
    }
}

/// Check every site of one source file (all sites must belong to `file`).
pub fn check_file(ports: Ports<'_>, file: &Utf8Path, sites: &[ImportSite]) -> Vec<Finding> {
    let mut check = FileCheck::new(ports, file);
    sites.iter().flat_map(|s| check.check_site(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{DepsAllowance, RuleOptions};
    use crate::specifier::{AssumeResolved, NodeClassifier};
    use crate::test_support::{InstalledPackages, MemFs, config_with, import, permissive_config};

    fn monorepo() -> MemFs {
        MemFs::new()
            .file(
                "/repo/package.json",
                r#"{
                    "name": "root",
                    "private": true,
                    "workspaces": ["packages/*"],
                    "dependencies": { "lodash": "^4.0.0", "react": "^17.0.0" },
                    "devDependencies": { "jest": "^29.0.0" }
                }"#,
            )
            .file(
                "/repo/packages/app/package.json",
                r#"{
                    "name": "app",
                    "dependencies": { "zod": "^3.0.0" },
                    "devDependencies": { "chalk": "^5.0.0" },
                    "optionalDependencies": { "fsevents": "^2.0.0" },
                    "peerDependencies": { "vue": "^3.0.0" }
                }"#,
            )
            .file(
                "/repo/packages/shared/package.json",
                r#"{ "name": "@acme/shared", "version": "1.4.0" }"#,
            )
    }

    fn run(fs: &MemFs, cfg: &EffectiveConfig, specifier: &str) -> Vec<Finding> {
        let ports = Ports {
            fs,
            classifier: &NodeClassifier::default(),
            resolver: &AssumeResolved,
            config: cfg,
        };
        let file = Utf8Path::new("/repo/packages/app/src/index.js");
        check_file(ports, file, &[import(file.as_str(), specifier, 3)])
    }

    #[test]
    fn declared_runtime_dependency_is_acceptable() {
        let cfg = permissive_config("/repo");
        assert!(run(&monorepo(), &cfg, "zod").is_empty());
        assert!(run(&monorepo(), &cfg, "chalk").is_empty());
        assert!(run(&monorepo(), &cfg, "fsevents").is_empty());
        assert!(run(&monorepo(), &cfg, "vue").is_empty());
    }

    #[test]
    fn builtins_and_relative_imports_are_skipped() {
        let cfg = permissive_config("/repo");
        assert!(run(&monorepo(), &cfg, "fs").is_empty());
        assert!(run(&monorepo(), &cfg, "./local").is_empty());
        assert!(run(&monorepo(), &cfg, "node:path").is_empty());
    }

    #[test]
    fn denied_dev_dependency_is_reported() {
        let cfg = config_with(
            "/repo",
            RuleOptions {
                dev_dependencies: DepsAllowance::Deny,
                ..RuleOptions::default()
            },
        );
        let findings = run(&monorepo(), &cfg, "chalk");
        assert_eq!(findings.len(), 1);
        let f = &findings[0];
        assert_eq!(f.code, ids::CODE_DEV_DEPENDENCY_NOT_ALLOWED);
        assert_eq!(
            f.message,
            "'chalk' should be listed in the package's dependencies, not devDependencies."
        );
        assert!(f.fix.is_none());
        let loc = f.location.as_ref().expect("location");
        assert_eq!(loc.path.as_str(), "packages/app/src/index.js");
        assert_eq!(loc.line, Some(3));
    }

    #[test]
    fn denied_optional_dependency_is_reported() {
        let cfg = config_with(
            "/repo",
            RuleOptions {
                optional_dependencies: DepsAllowance::Deny,
                ..RuleOptions::default()
            },
        );
        let findings = run(&monorepo(), &cfg, "fsevents");
        assert_eq!(findings[0].code, ids::CODE_OPTIONAL_DEPENDENCY_NOT_ALLOWED);
        assert_eq!(
            findings[0].message,
            "'fsevents' should be listed in the package's dependencies, not optionalDependencies."
        );
    }

    #[test]
    fn denied_peer_dependency_falls_through_to_missing() {
        let cfg = config_with(
            "/repo",
            RuleOptions {
                peer_dependencies: DepsAllowance::Deny,
                ..RuleOptions::default()
            },
        );
        let findings = run(&monorepo(), &cfg, "vue");
        assert_eq!(findings[0].code, ids::CODE_MISSING_DEPENDENCY);
        assert_eq!(
            findings[0].message,
            "'vue' should be listed in the project and package's dependencies."
        );
    }

    #[test]
    fn root_declared_package_gets_fix_with_root_version() {
        let cfg = permissive_config("/repo");
        let findings = run(&monorepo(), &cfg, "lodash/debounce");
        assert_eq!(findings.len(), 1);
        let f = &findings[0];
        assert_eq!(f.message, "'lodash' should be listed in the package's dependencies.");
        let fix = f.fix.as_ref().expect("fix");
        assert_eq!(fix.manifest.as_str(), "packages/app/package.json");
        assert_eq!(fix.insertions.len(), 1);
        assert_eq!(fix.insertions[0].category, DependencyCategory::Dependencies);
        assert_eq!(fix.insertions[0].version, "^4.0.0");
    }

    #[test]
    fn root_dev_dependency_version_is_used_too() {
        let cfg = permissive_config("/repo");
        let findings = run(&monorepo(), &cfg, "jest");
        let fix = findings[0].fix.as_ref().expect("fix");
        assert_eq!(fix.insertions[0].version, "^29.0.0");
    }

    #[test]
    fn react_fix_targets_peer_and_dev() {
        let cfg = permissive_config("/repo");
        let findings = run(&monorepo(), &cfg, "react");
        let fix = findings[0].fix.as_ref().expect("fix");
        let cats: Vec<_> = fix.insertions.iter().map(|i| i.category).collect();
        assert_eq!(
            cats,
            vec![
                DependencyCategory::PeerDependencies,
                DependencyCategory::DevDependencies
            ]
        );
        assert!(fix.insertions.iter().all(|i| i.version == "^17.0.0"));
    }

    #[test]
    fn workspace_sibling_gets_caret_member_version() {
        let cfg = permissive_config("/repo");
        let findings = run(&monorepo(), &cfg, "@acme/shared/utils");
        let f = &findings[0];
        assert_eq!(f.message, "'@acme/shared' should be listed in the package's dependencies.");
        let fix = f.fix.as_ref().expect("fix");
        assert_eq!(fix.insertions[0].name, "@acme/shared");
        assert_eq!(fix.insertions[0].version, "^1.4.0");
        assert_eq!(f.data["workspace"], "@acme/shared");
    }

    #[test]
    fn unknown_package_has_no_fix() {
        let cfg = permissive_config("/repo");
        let findings = run(&monorepo(), &cfg, "left-pad");
        assert_eq!(
            findings[0].message,
            "'left-pad' should be listed in the project and package's dependencies."
        );
        assert!(findings[0].fix.is_none());
    }

    #[test]
    fn unresolved_and_type_only_sites_are_skipped() {
        let fs = monorepo();
        let cfg = permissive_config("/repo");
        let ports = Ports {
            fs: &fs,
            classifier: &NodeClassifier::default(),
            resolver: &InstalledPackages::of(&["zod"]),
            config: &cfg,
        };
        let file = Utf8Path::new("/repo/packages/app/src/index.js");
        let mut typed = import(file.as_str(), "left-pad", 1);
        typed.type_only = true;
        let sites = vec![import(file.as_str(), "left-pad", 2), typed];
        let resolver_findings = check_file(ports, file, &sites);
        assert!(resolver_findings.is_empty());
    }

    #[test]
    fn file_outside_any_package_is_acceptable() {
        let fs = MemFs::new();
        let cfg = permissive_config("/repo");
        let ports = Ports {
            fs: &fs,
            classifier: &NodeClassifier::default(),
            resolver: &AssumeResolved,
            config: &cfg,
        };
        let file = Utf8Path::new("/repo/src/index.js");
        assert!(check_file(ports, file, &[import(file.as_str(), "lodash", 1)]).is_empty());
    }

    #[test]
    fn parse_error_is_reported_once_per_file_then_deps_are_empty() {
        let fs = MemFs::new()
            .file("/repo/package.json", r#"{ "name": "root" }"#)
            .file("/repo/packages/app/package.json", "{ \"name\": ");
        let cfg = permissive_config("/repo");
        let ports = Ports {
            fs: &fs,
            classifier: &NodeClassifier::default(),
            resolver: &AssumeResolved,
            config: &cfg,
        };
        let file = Utf8Path::new("/repo/packages/app/src/index.js");
        let sites = vec![
            import(file.as_str(), "lodash", 1),
            import(file.as_str(), "zod", 2),
        ];
        let findings = check_file(ports, file, &sites);

        let parse: Vec<_> = findings
            .iter()
            .filter(|f| f.code == ids::CODE_MANIFEST_PARSE_ERROR)
            .collect();
        assert_eq!(parse.len(), 1);
        assert!(parse[0]
            .message
            .starts_with("The package.json file could not be parsed: "));
        let loc = parse[0].location.as_ref().expect("location");
        assert_eq!((loc.line, loc.col), (Some(0), Some(0)));

        let missing = findings
            .iter()
            .filter(|f| f.code == ids::CODE_MISSING_DEPENDENCY)
            .count();
        assert_eq!(missing, 2);
    }

    #[test]
    fn broken_root_manifest_means_no_workspaces() {
        let fs = MemFs::new().file("/repo/package.json", r#"{ "workspaces": ["a"], }"#);
        let cfg = permissive_config("/repo");
        let ports = Ports {
            fs: &fs,
            classifier: &NodeClassifier::default(),
            resolver: &AssumeResolved,
            config: &cfg,
        };
        let file = Utf8Path::new("/repo/src/index.js");
        let codes: Vec<String> = check_file(ports, file, &[import(file.as_str(), "lodash", 1)])
            .into_iter()
            .map(|f| f.code)
            .collect();
        assert_eq!(
            codes,
            vec![
                ids::CODE_MANIFEST_PARSE_ERROR.to_string(),
                ids::CODE_MISSING_DEPENDENCY.to_string()
            ]
        );
    }

    #[test]
    fn package_dirs_merge_and_report_missing_manifests() {
        let fs = monorepo();
        let cfg = config_with(
            "/repo",
            RuleOptions {
                package_dirs: vec![
                    Utf8PathBuf::from("/repo/packages/app"),
                    Utf8PathBuf::from("/repo/packages/gone"),
                    Utf8PathBuf::from("/repo"),
                ],
                ..RuleOptions::default()
            },
        );
        let ports = Ports {
            fs: &fs,
            classifier: &NodeClassifier::default(),
            resolver: &AssumeResolved,
            config: &cfg,
        };
        let file = Utf8Path::new("/repo/packages/app/src/index.js");
        let sites = vec![
            import(file.as_str(), "lodash", 1),
            import(file.as_str(), "zod", 2),
            import(file.as_str(), "left-pad", 3),
        ];
        let findings = check_file(ports, file, &sites);

        let not_found: Vec<_> = findings
            .iter()
            .filter(|f| f.code == ids::CODE_MANIFEST_NOT_FOUND)
            .collect();
        assert_eq!(not_found.len(), 1);
        assert_eq!(not_found[0].message, "The package.json file could not be found.");

        let missing: Vec<_> = findings
            .iter()
            .filter(|f| f.code == ids::CODE_MISSING_DEPENDENCY)
            .collect();
        assert_eq!(missing.len(), 1);
        assert!(missing[0].message.starts_with("'left-pad'"));
    }

    #[test]
    fn nameless_workspace_becomes_site_finding() {
        let fs = monorepo()
            .file("/repo/packages/broken/package.json", r#"{ "version": "1.0.0" }"#);
        let cfg = permissive_config("/repo");
        let findings = run(&fs, &cfg, "left-pad");
        assert_eq!(findings.len(), 1);
        let f = &findings[0];
        assert_eq!(f.check_id, ids::CHECK_WORKSPACE_DISCOVERY);
        assert_eq!(f.code, ids::CODE_WORKSPACE_INVALID);
        assert_eq!(
            f.message,
            "The following package.jsons are missing the \"name\" field:\npackages/broken/package.json"
        );
        assert_eq!(f.location.as_ref().and_then(|l| l.line), Some(3));
    }

    #[test]
    fn peer_listing_satisfies_import_when_dev_is_denied() {
        let fs = MemFs::new()
            .file("/repo/package.json", r#"{ "name": "root" }"#)
            .file(
                "/repo/packages/ui/package.json",
                r#"{
                    "name": "ui",
                    "peerDependencies": { "react": "^17.0.0" },
                    "devDependencies": { "react": "^17.0.0" }
                }"#,
            );
        let cfg = config_with(
            "/repo",
            RuleOptions {
                dev_dependencies: DepsAllowance::Deny,
                ..RuleOptions::default()
            },
        );
        let ports = Ports {
            fs: &fs,
            classifier: &NodeClassifier::default(),
            resolver: &AssumeResolved,
            config: &cfg,
        };
        let file = Utf8Path::new("/repo/packages/ui/src/index.js");
        let findings = check_file(ports, file, &[import(file.as_str(), "react", 1)]);
        assert!(findings.is_empty(), "{findings:#?}");
    }

    #[test]
    fn decide_reports_denied_dev_only_after_allowed_categories() {
        let mut deps = DependencyFields::default();
        deps.dev_dependencies.insert("x".to_string(), "1".to_string());
        deps.optional_dependencies.insert("x".to_string(), "1".to_string());
        let mut policy = PolicyConfig {
            allow_dev_deps: false,
            allow_opt_deps: true,
            allow_peer_deps: true,
            project_root_dir: Utf8PathBuf::from("/repo"),
        };
        assert_eq!(
            decide(&deps, "x", &policy),
            (ResolutionVerdict::Acceptable, Some(DependencyCategory::OptionalDependencies))
        );

        policy.allow_opt_deps = false;
        assert_eq!(decide(&deps, "x", &policy), (ResolutionVerdict::WronglyInDevDeps, None));
    }

    #[test]
    fn decide_prefers_dependencies_over_other_maps() {
        let mut deps = DependencyFields::default();
        deps.dependencies.insert("x".to_string(), "1".to_string());
        deps.dev_dependencies.insert("x".to_string(), "1".to_string());
        let policy = PolicyConfig {
            allow_dev_deps: false,
            allow_opt_deps: false,
            allow_peer_deps: false,
            project_root_dir: Utf8PathBuf::from("/repo"),
        };
        assert_eq!(
            decide(&deps, "x", &policy),
            (ResolutionVerdict::Acceptable, Some(DependencyCategory::Dependencies))
        );
    }
}
