//! The fixed assessment report.
//!
//! Every score, risk flag, checklist item, and advisory paragraph here is a
//! literal constant. Nothing is computed from the selected document; the
//! report content is identical for every run. Only run metadata (timestamp,
//! assessment id, document name/size, analyst note) varies.

use serde::{Deserialize, Serialize};

use crate::model::{RunConfig, SelectedDocument};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallAssessment {
    pub score: u8,
    pub max_score: u8,
    pub summary: String,
    pub recommended_action: String,
    pub action_rationale: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub label: String,
    pub score: u8,
    pub max_score: u8,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFlag {
    pub title: String,
    pub detail: String,
}

/// Metadata of the selected document, echoed into the report for display.
/// The document's bytes play no part in the assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub file_name: String,
    pub size_bytes: u64,
}

impl From<&SelectedDocument> for DocumentInfo {
    fn from(doc: &SelectedDocument) -> Self {
        Self {
            file_name: doc.file_name.clone(),
            size_bytes: doc.size_bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    #[serde(default)]
    pub timestamp_utc: String,
    pub assessment_id: String,
    #[serde(default)]
    pub document: Option<DocumentInfo>,
    #[serde(default)]
    pub note: Option<String>,
    pub overall: OverallAssessment,
    pub dimensions: Vec<DimensionScore>,
    pub risk_flags: Vec<RiskFlag>,
    pub checklist: Vec<String>,
    pub advisory: String,
    pub disclaimer: String,
}

pub const RESULTS_CAPTION: &str =
    "This assessment provides decision support - it does not replace third-party verification.";

pub const RISK_FLAGS_CAPTION: &str = "These risks do not invalidate the project, but materially \
     affect credit credibility and pricing.";

pub const CHECKLIST_CAPTION: &str =
    "Focus human review on flagged areas to reduce time and cost.";

pub const ADVISORY_AUDIENCE: &str = "Prepared for investment and procurement decision-makers";

impl AssessmentReport {
    /// Build the fixed report for a run.
    pub fn fixed(cfg: &RunConfig, timestamp_utc: String) -> Self {
        Self {
            timestamp_utc,
            assessment_id: cfg.assessment_id.clone(),
            document: cfg.document.as_ref().map(DocumentInfo::from),
            note: cfg.note.clone(),
            overall: overall_assessment(),
            dimensions: dimension_scores(),
            risk_flags: risk_flags(),
            checklist: due_diligence_checklist(),
            advisory: executive_advisory().to_string(),
            disclaimer: disclaimer().to_string(),
        }
    }

    /// "72 / 100" as displayed on the summary card.
    pub fn overall_display(&self) -> String {
        format!("{} / {}", self.overall.score, self.overall.max_score)
    }
}

pub fn overall_assessment() -> OverallAssessment {
    OverallAssessment {
        score: 72,
        max_score: 100,
        summary: "Moderate quality with identifiable risk areas requiring targeted \
                  due diligence."
            .into(),
        recommended_action: "Investigate Further Before Proceeding".into(),
        action_rationale: "Key risks identified in baseline integrity and long-term \
                           permanence assumptions."
            .into(),
    }
}

pub fn dimension_scores() -> Vec<DimensionScore> {
    let dim = |label: &str, score: u8, caption: &str| DimensionScore {
        label: label.into(),
        score,
        max_score: 20,
        caption: caption.into(),
    };
    vec![
        dim(
            "Additionality",
            14,
            "Likelihood that emissions reductions would not occur without carbon finance",
        ),
        dim(
            "Permanence",
            13,
            "Risk of reversal or loss of credited emissions reductions",
        ),
        dim(
            "Baseline Integrity",
            12,
            "Credibility and conservativeness of baseline assumptions",
        ),
        dim(
            "Leakage Risk",
            16,
            "Risk of emissions displacement outside project boundaries",
        ),
        dim(
            "Co-Benefits & SDG Alignment",
            17,
            "Environmental and social benefits beyond carbon mitigation",
        ),
    ]
}

pub fn risk_flags() -> Vec<RiskFlag> {
    let flag = |title: &str, detail: &str| RiskFlag {
        title: title.into(),
        detail: detail.into(),
    };
    vec![
        flag(
            "Baseline Inflation Risk",
            "Baseline relies on regional averages that may not reflect current policy \
             or market conditions.",
        ),
        flag(
            "Permanence Uncertainty",
            "Limited long-term monitoring commitments increase reversal risk beyond \
             the crediting period.",
        ),
        flag(
            "Data Verification Gaps",
            "Certain emissions factors lack third-party validation references.",
        ),
    ]
}

pub fn due_diligence_checklist() -> Vec<String> {
    vec![
        "Verify baseline assumptions against updated regional benchmarks".into(),
        "Review permanence safeguards and buffer mechanisms".into(),
        "Validate emissions factors with third-party sources".into(),
        "Assess long-term monitoring and reporting commitments".into(),
    ]
}

pub fn executive_advisory() -> &'static str {
    "Based on the document analysis, the project demonstrates moderate additionality \
     and co-benefits. However, weaknesses in baseline integrity and permanence \
     assumptions introduce material quality risk. Proceeding without further \
     verification may expose buyers to reputational and performance risk."
}

pub fn disclaimer() -> &'static str {
    "CCQRA provides AI-assisted decision support only. Final investment decisions \
     should include independent verification and professional judgment."
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    fn cfg(document: Option<SelectedDocument>) -> RunConfig {
        RunConfig {
            assessment_id: "test".into(),
            note: None,
            document,
            analysis_delay: Duration::from_secs(2),
        }
    }

    #[test]
    fn overall_score_is_72_of_100() {
        let overall = overall_assessment();
        assert_eq!(overall.score, 72);
        assert_eq!(overall.max_score, 100);
    }

    #[test]
    fn dimension_scores_are_the_fixed_five() {
        let dims = dimension_scores();
        let got: Vec<(&str, u8)> = dims
            .iter()
            .map(|d| (d.label.as_str(), d.score))
            .collect();
        assert_eq!(
            got,
            vec![
                ("Additionality", 14),
                ("Permanence", 13),
                ("Baseline Integrity", 12),
                ("Leakage Risk", 16),
                ("Co-Benefits & SDG Alignment", 17),
            ]
        );
        assert!(dims.iter().all(|d| d.max_score == 20));
    }

    #[test]
    fn exactly_three_risk_flags_and_four_checklist_items() {
        assert_eq!(risk_flags().len(), 3);
        assert_eq!(due_diligence_checklist().len(), 4);
    }

    #[test]
    fn report_content_does_not_depend_on_the_document() {
        let doc = SelectedDocument {
            file_name: "a.pdf".into(),
            path: PathBuf::from("a.pdf"),
            size_bytes: 10,
        };
        let other = SelectedDocument {
            file_name: "b.bin".into(),
            path: PathBuf::from("b.bin"),
            size_bytes: 999_999,
        };
        let r1 = AssessmentReport::fixed(&cfg(Some(doc)), "t".into());
        let r2 = AssessmentReport::fixed(&cfg(Some(other)), "t".into());
        assert_eq!(r1.overall, r2.overall);
        assert_eq!(r1.dimensions, r2.dimensions);
        assert_eq!(r1.risk_flags, r2.risk_flags);
        assert_eq!(r1.checklist, r2.checklist);
        assert_eq!(r1.advisory, r2.advisory);
        assert_eq!(r1.disclaimer, r2.disclaimer);
    }

    #[test]
    fn repeated_builds_are_identical() {
        let c = cfg(None);
        let r1 = AssessmentReport::fixed(&c, "t".into());
        let r2 = AssessmentReport::fixed(&c, "t".into());
        assert_eq!(r1, r2);
        assert_eq!(r1.overall_display(), "72 / 100");
    }

    #[test]
    fn report_round_trips_through_json() {
        let r = AssessmentReport::fixed(&cfg(None), "t".into());
        let json = serde_json::to_string(&r).unwrap();
        let back: AssessmentReport = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
