//! Text summary builder for CLI output.
//!
//! Formats the fixed report as human-readable lines for text mode.

use crate::model::format_size;
use crate::report::{self, AssessmentReport};

/// Pre-formatted lines for text output.
pub(crate) struct TextSummary {
    pub lines: Vec<String>,
}

/// Build a text summary from the assessment report.
pub(crate) fn build_text_summary(report: &AssessmentReport) -> TextSummary {
    let mut lines = Vec::new();

    lines.push("Carbon Project Quality Assessment".to_string());
    lines.push(report::RESULTS_CAPTION.to_string());
    lines.push(String::new());

    if let Some(doc) = report.document.as_ref() {
        lines.push(format!(
            "Document: {} ({})",
            doc.file_name,
            format_size(doc.size_bytes)
        ));
    }
    if let Some(note) = report.note.as_deref() {
        if !note.trim().is_empty() {
            lines.push(format!("Note: {}", note));
        }
    }

    lines.push(format!(
        "Overall quality score: {}",
        report.overall_display()
    ));
    lines.push(format!("  {}", report.overall.summary));
    lines.push(format!(
        "Recommended action: {}",
        report.overall.recommended_action
    ));
    lines.push(format!("  {}", report.overall.action_rationale));
    lines.push(String::new());

    lines.push("Quality dimension scores:".to_string());
    let width = report
        .dimensions
        .iter()
        .map(|d| d.label.chars().count())
        .max()
        .unwrap_or(0);
    for dim in &report.dimensions {
        lines.push(format!(
            "  {:width$}  {:>2} / {}",
            dim.label,
            dim.score,
            dim.max_score,
            width = width
        ));
    }
    lines.push(String::new());

    lines.push("Key risk flags identified:".to_string());
    for flag in &report.risk_flags {
        lines.push(format!("  - {}: {}", flag.title, flag.detail));
    }
    lines.push(format!("  {}", report::RISK_FLAGS_CAPTION));
    lines.push(String::new());

    lines.push("Targeted due diligence checklist:".to_string());
    for item in &report.checklist {
        lines.push(format!("  [ ] {}", item));
    }
    lines.push(String::new());

    lines.push("Executive advisory summary:".to_string());
    lines.push(format!("  {}", report.advisory));
    lines.push(String::new());
    lines.push(report.disclaimer.clone());

    TextSummary { lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RunConfig;
    use crate::report::DocumentInfo;
    use std::time::Duration;

    fn report() -> AssessmentReport {
        let cfg = RunConfig {
            assessment_id: "7".into(),
            note: Some("pilot batch".into()),
            document: None,
            analysis_delay: Duration::from_secs(2),
        };
        let mut r = AssessmentReport::fixed(&cfg, "t".into());
        r.document = Some(DocumentInfo {
            file_name: "pdd.pdf".into(),
            size_bytes: 2048,
        });
        r
    }

    #[test]
    fn summary_contains_the_fixed_scores() {
        let text = build_text_summary(&report()).lines.join("\n");
        assert!(text.contains("Overall quality score: 72 / 100"));
        assert!(text.contains("Additionality"));
        assert!(text.contains("14 / 20"));
        assert!(text.contains("Co-Benefits & SDG Alignment"));
        assert!(text.contains("17 / 20"));
        assert!(text.contains("Investigate Further Before Proceeding"));
    }

    #[test]
    fn summary_lists_all_flags_and_checklist_items() {
        let lines = build_text_summary(&report()).lines;
        assert_eq!(lines.iter().filter(|l| l.starts_with("  - ")).count(), 3);
        assert_eq!(lines.iter().filter(|l| l.starts_with("  [ ] ")).count(), 4);
    }

    #[test]
    fn summary_echoes_document_and_note() {
        let text = build_text_summary(&report()).lines.join("\n");
        assert!(text.contains("Document: pdd.pdf (2.0 KB)"));
        assert!(text.contains("Note: pilot batch"));
    }
}
