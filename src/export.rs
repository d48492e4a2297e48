//! Report export.
//!
//! Export is the only way assessment data leaves the process. There is no
//! auto-save, history, or data directory: session state does not survive a
//! restart.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::report::AssessmentReport;

/// Write the report as pretty JSON to a user-specified path.
pub fn export_json(path: &Path, report: &AssessmentReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize report")?;
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Default export filename derived from run metadata.
pub fn default_export_name(report: &AssessmentReport) -> String {
    format!(
        "ccqra-assessment-{}-{}.json",
        report.timestamp_utc.replace(':', "-").replace('T', "_"),
        &report.assessment_id[..8.min(report.assessment_id.len())]
    )
}

/// Export into the current directory and return the absolute path.
pub fn export_to_current_dir(report: &AssessmentReport) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().context("get current directory")?;
    let path = current_dir.join(default_export_name(report));
    export_json(&path, report)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RunConfig;
    use std::time::Duration;

    fn report() -> AssessmentReport {
        let cfg = RunConfig {
            assessment_id: "1234567890".into(),
            note: None,
            document: None,
            analysis_delay: Duration::from_secs(2),
        };
        AssessmentReport::fixed(&cfg, "2026-08-29T12:00:00Z".into())
    }

    #[test]
    fn export_writes_readable_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let r = report();
        export_json(&path, &r).unwrap();
        let back: AssessmentReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn default_name_truncates_the_id() {
        let name = default_export_name(&report());
        assert!(name.starts_with("ccqra-assessment-2026-08-29_12-00-00Z-12345678"));
        assert!(name.ends_with(".json"));
    }
}
