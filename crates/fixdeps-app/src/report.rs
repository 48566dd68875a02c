use anyhow::Context;
use fixdeps_render::{
    RenderableData, RenderableFinding, RenderableLocation, RenderableReport, RenderableSeverity,
    RenderableVerdictStatus,
};
use fixdeps_types::{
    Finding, FixdepsData, FixdepsReport, ReportEnvelope, SCHEMA_REPORT_V1, Severity, ToolMeta,
    Verdict, ids,
};
use time::OffsetDateTime;

pub fn parse_report_json(text: &str) -> anyhow::Result<FixdepsReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema:?} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse fixdeps report")
}

pub fn serialize_report(report: &FixdepsReport) -> anyhow::Result<Vec<u8>> {
    let mut out = serde_json::to_vec_pretty(report).context("serialize report")?;
    out.push(b'\n');
    Ok(out)
}

pub fn to_renderable(report: &FixdepsReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdictStatus::Pass,
            Verdict::Warn => RenderableVerdictStatus::Warn,
            Verdict::Fail => RenderableVerdictStatus::Fail,
        },
        findings: report.findings.iter().map(renderable_finding).collect(),
        data: RenderableData {
            files_scanned: report.data.files_scanned,
            sites_scanned: report.data.sites_scanned,
            fixes_applied: report.data.fixes_applied,
            findings_emitted: report.data.findings_emitted,
            findings_total: report.data.findings_total,
            truncated_reason: report.data.truncated_reason.clone(),
        },
    }
}

fn renderable_finding(f: &Finding) -> RenderableFinding {
    RenderableFinding {
        severity: match f.severity {
            Severity::Info => RenderableSeverity::Info,
            Severity::Warning => RenderableSeverity::Warning,
            Severity::Error => RenderableSeverity::Error,
        },
        check_id: f.check_id.clone(),
        code: f.code.clone(),
        message: f.message.clone(),
        location: f.location.as_ref().map(|loc| RenderableLocation {
            path: loc.path.as_str().to_string(),
            line: loc.line,
            col: loc.col,
        }),
        help: f.help.clone(),
        fix: f.fix.as_ref().map(|fix| fix.describe()),
    }
}

/// A failing report carrying a single tool-level finding, for when the run itself failed.
pub fn runtime_error_report(message: &str) -> FixdepsReport {
    let now = OffsetDateTime::now_utc();
    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "fixdeps".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at: now,
        finished_at: now,
        verdict: Verdict::Fail,
        findings: vec![Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
            code: ids::CODE_RUNTIME_ERROR.to_string(),
            message: message.to_string(),
            location: None,
            help: Some("Fix the tool error and re-run fixdeps.".to_string()),
            fingerprint: None,
            fix: None,
            data: serde_json::Value::Null,
        }],
        data: FixdepsData {
            profile: "unknown".to_string(),
            project_dir: String::new(),
            files_scanned: 0,
            sites_scanned: 0,
            findings_total: 1,
            findings_emitted: 1,
            fixes_applied: 0,
            truncated_reason: None,
        },
    }
}
