use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fixdeps_domain::specifier::{AssumeResolved, ModuleResolver, NodeClassifier};
use fixdeps_domain::{FileCheck, ImportSite, Ports, RunStats, evaluate};
use fixdeps_repo::{DiskFs, NodeModulesResolver, write_manifest_fix};
use fixdeps_settings::{FixdepsConfigV1, Overrides, ResolvedConfig, normalize_path};
use fixdeps_types::{FixdepsReport, ReportEnvelope, SCHEMA_REPORT_V1, ToolMeta, Verdict};
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Contents of `fixdeps.toml` (may be empty when every setting comes from overrides).
    pub config_text: &'a str,
    /// Directory relative config paths are resolved against.
    pub config_dir: &'a Utf8Path,
    pub overrides: Overrides,
    /// Import sites from source traversal. Relative `source_file`s are resolved
    /// against the effective project directory.
    pub sites: Vec<ImportSite>,
    /// Write each planned manifest fix as soon as it is produced.
    pub apply_fixes: bool,
    /// Treat every external specifier as resolvable instead of probing `node_modules`.
    pub assume_resolved: bool,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: FixdepsReport,
    pub resolved_config: ResolvedConfig,
    pub fixes_applied: u32,
}

/// Run the check use case: load config, resolve every import site, and build the report.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    let cfg = if input.config_text.trim().is_empty() {
        FixdepsConfigV1::default()
    } else {
        fixdeps_settings::parse_config_toml(input.config_text).context("parse config")?
    };
    let resolved = fixdeps_settings::resolve_config(cfg, input.overrides, input.config_dir)
        .context("resolve config")?;
    let effective = &resolved.effective;
    let project_dir = effective.project_dir().to_path_buf();

    if !project_dir.is_dir() {
        anyhow::bail!("project directory does not exist: {project_dir}");
    }

    let classifier = NodeClassifier::with_core_modules(effective.core_modules.iter().cloned());
    let resolver: &dyn ModuleResolver = if input.assume_resolved {
        &AssumeResolved
    } else {
        &NodeModulesResolver
    };
    let ports = Ports {
        fs: &DiskFs,
        classifier: &classifier,
        resolver,
        config: effective,
    };

    let mut stats = RunStats::default();
    let mut findings = Vec::new();

    for (file, sites) in group_by_file(&project_dir, input.sites) {
        stats.files_scanned += 1;
        let mut check = FileCheck::new(ports, &file);
        for site in &sites {
            stats.sites_scanned += 1;
            for finding in check.check_site(site) {
                let Some(fix) = finding.fix.as_ref().filter(|_| input.apply_fixes) else {
                    findings.push(finding);
                    continue;
                };
                match write_manifest_fix(&project_dir, fix) {
                    Ok(_) => stats.fixes_applied += 1,
                    Err(err) => {
                        tracing::warn!(file = %file, error = ?err, "could not apply fix");
                        findings.push(finding);
                    }
                }
            }
        }
    }

    let evaluation = evaluate(findings, effective, stats);
    tracing::info!(
        files = stats.files_scanned,
        sites = stats.sites_scanned,
        fixes = stats.fixes_applied,
        findings = evaluation.data.findings_emitted,
        "check finished"
    );

    let finished_at = OffsetDateTime::now_utc();
    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "fixdeps".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at,
        verdict: evaluation.verdict,
        findings: evaluation.findings,
        data: evaluation.data,
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
        fixes_applied: stats.fixes_applied,
    })
}

/// Group sites by absolute source file, in path order, keeping site order within a file.
fn group_by_file(
    project_dir: &Utf8Path,
    sites: Vec<ImportSite>,
) -> BTreeMap<Utf8PathBuf, Vec<ImportSite>> {
    let mut by_file: BTreeMap<Utf8PathBuf, Vec<ImportSite>> = BTreeMap::new();
    for mut site in sites {
        let file = normalize_path(&project_dir.join(&site.source_file));
        site.source_file = file.clone();
        by_file.entry(file).or_default().push(site);
    }
    by_file
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}
