use crate::model::{AllowanceSetting, FixdepsConfigV1};
use crate::presets;
use anyhow::Context;
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use fixdeps_domain::policy::{DepsAllowance, EffectiveConfig, FailOn, RuleOptions, RulePolicy};
use fixdeps_types::Severity;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    /// Takes precedence over `project_dir` in the config file.
    pub project_dir: Option<Utf8PathBuf>,
    pub max_findings: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: FixdepsConfigV1,
    overrides: Overrides,
    base_dir: &Utf8Path,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());
    let preset = presets::preset(&profile);

    let project_dir = match (overrides.project_dir, cfg.project_dir.as_deref()) {
        (Some(dir), _) => anchor(base_dir, &dir),
        (None, Some(dir)) => anchor(base_dir, Utf8Path::new(dir)),
        (None, None) => anyhow::bail!("project_dir is required (set it in fixdeps.toml or pass --project-dir)"),
    };

    let package_dirs = cfg
        .package_dir
        .map(|p| p.into_vec())
        .unwrap_or_default()
        .iter()
        .map(|dir| anchor(base_dir, Utf8Path::new(dir)))
        .collect();

    let options = RuleOptions {
        dev_dependencies: allowance(cfg.dev_dependencies),
        optional_dependencies: allowance(cfg.optional_dependencies),
        peer_dependencies: allowance(cfg.peer_dependencies),
        package_dirs,
    };
    let rule = RulePolicy::new(project_dir, options).context("invalid rule options")?;

    let severity = match cfg.severity.as_deref() {
        Some(s) => parse_severity(s).context("invalid severity")?,
        None => preset.severity,
    };
    let fail_on = match cfg.fail_on.as_deref() {
        Some(s) => parse_fail_on(s)?,
        None => preset.fail_on,
    };
    let max_findings = overrides
        .max_findings
        .or(cfg.max_findings)
        .map(|n| n as usize)
        .unwrap_or(preset.max_findings);

    Ok(ResolvedConfig {
        effective: EffectiveConfig {
            profile: preset.profile,
            severity,
            fail_on,
            max_findings,
            rule,
            core_modules: cfg.core_modules,
        },
    })
}

fn allowance(setting: Option<AllowanceSetting>) -> DepsAllowance {
    match setting {
        None | Some(AllowanceSetting::Flag(true)) => DepsAllowance::Allow,
        Some(AllowanceSetting::Flag(false)) => DepsAllowance::Deny,
        Some(AllowanceSetting::Globs(patterns)) => DepsAllowance::AllowForPaths(patterns),
    }
}

fn anchor(base_dir: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    normalize_path(&base_dir.join(path))
}

/// Lexically normalize a path: drop `.` components and fold `..` into its parent.
pub fn normalize_path(path: &Utf8Path) -> Utf8PathBuf {
    let mut out = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => match out.components().next_back() {
                Some(Utf8Component::Normal(_)) => {
                    out.pop();
                }
                Some(Utf8Component::RootDir) | Some(Utf8Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_str()),
        }
    }
    if out.as_str().is_empty() {
        out.push(".");
    }
    out
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v {
        "info" => Ok(Severity::Info),
        "warning" | "warn" => Ok(Severity::Warning),
        "error" => Ok(Severity::Error),
        other => anyhow::bail!("unknown severity: {other} (expected info|warning|error)"),
    }
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "error" => Ok(FailOn::Error),
        "warning" | "warn" => Ok(FailOn::Warning),
        other => anyhow::bail!("unknown fail_on: {other} (expected error|warning)"),
    }
}
