//! Render use cases: markdown and GitHub annotations from in-memory reports.

use fixdeps_render::RenderableReport;

pub fn render_markdown(report: &RenderableReport) -> String {
    fixdeps_render::render_markdown(report)
}

pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    fixdeps_render::render_github_annotations(report)
        .into_iter()
        .take(max)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixdeps_render::{
        RenderableData, RenderableFinding, RenderableLocation, RenderableSeverity,
        RenderableVerdictStatus,
    };

    fn finding(line: u32) -> RenderableFinding {
        RenderableFinding {
            severity: RenderableSeverity::Error,
            check_id: "deps.no_extraneous".to_string(),
            code: "missing_dependency".to_string(),
            message: "'lodash' should be listed in the package's dependencies.".to_string(),
            location: Some(RenderableLocation {
                path: "src/index.js".to_string(),
                line: Some(line),
                col: Some(1),
            }),
            help: None,
            fix: None,
        }
    }

    fn sample_report() -> RenderableReport {
        RenderableReport {
            verdict: RenderableVerdictStatus::Fail,
            findings: vec![finding(1), finding(2), finding(3)],
            data: RenderableData {
                findings_emitted: 3,
                findings_total: 3,
                ..RenderableData::default()
            },
        }
    }

    #[test]
    fn render_annotations_respects_max() {
        let annotations = render_annotations(&sample_report(), 2);
        assert_eq!(annotations.len(), 2);
        assert!(annotations[0].starts_with("::error file=src/index.js,line=1"));
    }

    #[test]
    fn render_markdown_smoke() {
        let markdown = render_markdown(&sample_report());
        assert!(markdown.contains("src/index.js"));
    }
}
