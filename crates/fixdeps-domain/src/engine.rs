use crate::policy::{EffectiveConfig, FailOn};
use fixdeps_types::{Finding, FixdepsData, Severity, Verdict};

/// Counters gathered while walking the sites.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub files_scanned: u32,
    pub sites_scanned: u32,
    pub fixes_applied: u32,
}

/// Judged findings of a run, ready to be wrapped in a report envelope.
#[derive(Clone, Debug)]
pub struct Evaluation {
    pub verdict: Verdict,
    pub findings: Vec<Finding>,
    pub data: FixdepsData,
}

/// Order, truncate, and judge the findings of a run.
pub fn evaluate(mut findings: Vec<Finding>, cfg: &EffectiveConfig, stats: RunStats) -> Evaluation {
    // Deterministic ordering before truncation.
    findings.sort_by(compare_findings);

    let total = findings.len() as u32;

    let mut emitted = findings;
    let mut truncated_reason: Option<String> = None;
    if emitted.len() > cfg.max_findings {
        emitted.truncate(cfg.max_findings);
        truncated_reason = Some(format!(
            "findings truncated to max_findings={}",
            cfg.max_findings
        ));
    }

    let verdict = compute_verdict(&emitted, cfg.fail_on);

    let data = FixdepsData {
        profile: cfg.profile.clone(),
        project_dir: cfg.project_dir().to_string(),
        files_scanned: stats.files_scanned,
        sites_scanned: stats.sites_scanned,
        findings_total: total,
        findings_emitted: emitted.len() as u32,
        fixes_applied: stats.fixes_applied,
        truncated_reason,
    };

    Evaluation {
        verdict,
        findings: emitted,
        data,
    }
}

fn compute_verdict(findings: &[Finding], fail_on: FailOn) -> Verdict {
    let has_error = findings.iter().any(|f| f.severity == Severity::Error);
    if has_error {
        return Verdict::Fail;
    }

    let has_warn = findings.iter().any(|f| f.severity == Severity::Warning);
    if has_warn {
        return match fail_on {
            FailOn::Warning => Verdict::Fail,
            FailOn::Error => Verdict::Warn,
        };
    }

    Verdict::Pass
}

pub(crate) fn compare_findings(a: &Finding, b: &Finding) -> std::cmp::Ordering {
    // Ordering priority:
    // 1) severity (error -> warning -> info)
    // 2) location.path (missing last)
    // 3) location.line, then col (missing last)
    // 4) check_id, code, message
    let severity_rank = |sev: Severity| match sev {
        Severity::Error => 0,
        Severity::Warning => 1,
        Severity::Info => 2,
    };
    let key = |f: &Finding| match &f.location {
        Some(l) => (
            l.path.as_str().to_string(),
            l.line.unwrap_or(u32::MAX),
            l.col.unwrap_or(u32::MAX),
        ),
        None => ("~".to_string(), u32::MAX, u32::MAX),
    };

    severity_rank(a.severity)
        .cmp(&severity_rank(b.severity))
        .then_with(|| key(a).cmp(&key(b)))
        .then_with(|| a.check_id.cmp(&b.check_id))
        .then_with(|| a.code.cmp(&b.code))
        .then_with(|| a.message.cmp(&b.message))
}
