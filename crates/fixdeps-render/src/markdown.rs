use crate::{RenderableReport, RenderableSeverity, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# fixdeps report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Warn => "WARN",
        RenderableVerdictStatus::Fail => "FAIL",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Scanned: {} sites in {} files\n- Findings: {} (emitted) / {} (total)\n",
        verdict,
        report.data.sites_scanned,
        report.data.files_scanned,
        report.data.findings_emitted,
        report.data.findings_total
    ));
    if report.data.fixes_applied > 0 {
        out.push_str(&format!("- Fixes applied: {}\n", report.data.fixes_applied));
    }
    out.push('\n');

    if let Some(r) = &report.data.truncated_reason {
        out.push_str(&format!("> Note: {}\n\n", r));
    }

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    out.push_str("## Findings\n\n");

    for f in &report.findings {
        let sev = match f.severity {
            RenderableSeverity::Info => "INFO",
            RenderableSeverity::Warning => "WARN",
            RenderableSeverity::Error => "ERROR",
        };

        let mut line = format!(
            "- [{}] `{}` / `{}`: {}",
            sev,
            f.check_id,
            f.code,
            f.message.replace('\n', " ")
        );
        if let Some(loc) = &f.location {
            line.push_str(&format!(
                " (`{}`:{}:{})",
                loc.path,
                loc.line.unwrap_or(0),
                loc.col.unwrap_or(0)
            ));
        }
        out.push_str(&line);
        out.push('\n');

        if let Some(fix) = &f.fix {
            out.push_str(&format!("  - fix: {}\n", fix));
        } else if let Some(help) = &f.help {
            out.push_str(&format!("  - help: {}\n", help));
        }
    }

    out
}
