use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::report::AssessmentReport;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub assessment_id: String,
    #[serde(default)]
    pub note: Option<String>,
    /// Document selected for this run. `None` is rejected by the assessor
    /// with the missing-document error; presence is the only thing checked.
    pub document: Option<SelectedDocument>,
    #[serde(with = "humantime_serde")]
    pub analysis_delay: Duration,
}

/// A document chosen through the picker or `--file`.
///
/// Only metadata is captured. The file content is intentionally never opened
/// or read anywhere in the program; the assessment does not depend on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedDocument {
    pub file_name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
}

impl SelectedDocument {
    /// Record a selection from a path, reading metadata only.
    pub fn from_path(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path)
            .with_context(|| format!("read metadata for {}", path.display()))?;
        if !meta.is_file() {
            anyhow::bail!("{} is not a regular file", path.display());
        }
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            file_name,
            path: path.to_path_buf(),
            size_bytes: meta.len(),
        })
    }

    /// Cosmetic filter only. Non-PDF files are accepted everywhere.
    pub fn is_pdf(&self) -> bool {
        Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false)
    }
}

/// Human-readable file size for captions and summaries.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Analyzing,
    Summary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AssessmentEvent {
    PhaseStarted {
        phase: Phase,
    },
    Info(InfoEvent),
    RunCompleted {
        // Box to keep AssessmentEvent size small; the report is large.
        report: Box<AssessmentReport>,
    },
}

/// Structured info events emitted during a run and consumed by UI/CLI layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InfoEvent {
    Message(String),
    DocumentAccepted { file_name: String, size_bytes: u64 },
    AnalysisNarration,
}

impl InfoEvent {
    /// Render a human-readable message for UI/CLI layers.
    pub fn to_message(&self) -> String {
        match self {
            InfoEvent::Message(msg) => msg.clone(),
            InfoEvent::DocumentAccepted {
                file_name,
                size_bytes,
            } => {
                format!("Accepted {} ({})", file_name, format_size(*size_bytes))
            }
            InfoEvent::AnalysisNarration => {
                "Extracting project claims, checking assumptions, and evaluating risks \
                 across key quality dimensions."
                    .to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_size_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn pdf_filter_is_case_insensitive() {
        let doc = SelectedDocument {
            file_name: "project.PDF".into(),
            path: PathBuf::from("project.PDF"),
            size_bytes: 1,
        };
        assert!(doc.is_pdf());
        let doc = SelectedDocument {
            file_name: "notes.txt".into(),
            path: PathBuf::from("notes.txt"),
            size_bytes: 1,
        };
        assert!(!doc.is_pdf());
    }

    #[test]
    fn selection_records_metadata_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pdd.pdf");
        std::fs::write(&path, b"not really a pdf").unwrap();
        let doc = SelectedDocument::from_path(&path).unwrap();
        assert_eq!(doc.file_name, "pdd.pdf");
        assert_eq!(doc.size_bytes, 16);
    }

    #[test]
    fn selecting_a_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SelectedDocument::from_path(dir.path()).is_err());
    }
}
