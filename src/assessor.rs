//! Assessment run engine.
//!
//! "Engine" is generous: the run is a presence check on the selected
//! document, a named no-op latency step, and the construction of the fixed
//! report. The document's bytes are never opened. The delay exists so the
//! demo's processing state is observable; it performs no work and always
//! completes.

use anyhow::Result;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::model::{AssessmentEvent, InfoEvent, Phase, RunConfig};
use crate::render::MISSING_DOCUMENT_MSG;
use crate::report::AssessmentReport;

#[derive(Debug, Clone)]
pub enum AssessorControl {
    /// Cancel the run entirely.
    Cancel,
}

pub struct Assessor {
    cfg: RunConfig,
}

/// Simulated analysis latency. Deliberately a no-op: nothing is parsed,
/// scored, or inferred while this sleeps.
async fn simulated_analysis_delay(delay: Duration) {
    tokio::time::sleep(delay).await;
}

impl Assessor {
    pub fn new(cfg: RunConfig) -> Self {
        Self { cfg }
    }

    pub async fn run(
        self,
        event_tx: mpsc::UnboundedSender<AssessmentEvent>,
        mut control_rx: mpsc::UnboundedReceiver<AssessorControl>,
    ) -> Result<AssessmentReport> {
        let Some(document) = self.cfg.document.as_ref() else {
            anyhow::bail!("{}", MISSING_DOCUMENT_MSG);
        };

        let _ = event_tx.send(AssessmentEvent::PhaseStarted {
            phase: Phase::Analyzing,
        });
        let _ = event_tx.send(AssessmentEvent::Info(InfoEvent::DocumentAccepted {
            file_name: document.file_name.clone(),
            size_bytes: document.size_bytes,
        }));
        let _ = event_tx.send(AssessmentEvent::Info(InfoEvent::AnalysisNarration));

        tokio::select! {
            _ = simulated_analysis_delay(self.cfg.analysis_delay) => {}
            cancelled = wait_for_cancel(&mut control_rx) => {
                if cancelled {
                    anyhow::bail!("assessment cancelled");
                }
            }
        }

        let _ = event_tx.send(AssessmentEvent::PhaseStarted {
            phase: Phase::Summary,
        });

        let timestamp_utc = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "now".into());
        let report = AssessmentReport::fixed(&self.cfg, timestamp_utc);
        let _ = event_tx.send(AssessmentEvent::RunCompleted {
            report: Box::new(report.clone()),
        });
        Ok(report)
    }
}

/// Resolve once a cancel arrives; never resolves `false` unless the channel
/// closes, in which case the run simply finishes out its delay.
async fn wait_for_cancel(control_rx: &mut mpsc::UnboundedReceiver<AssessorControl>) -> bool {
    loop {
        match control_rx.recv().await {
            Some(AssessorControl::Cancel) => return true,
            None => {
                // UI side dropped its handle; let the delay branch win.
                futures::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SelectedDocument;
    use std::path::PathBuf;
    use std::time::Instant;

    fn cfg(document: Option<SelectedDocument>, delay_ms: u64) -> RunConfig {
        RunConfig {
            assessment_id: "42".into(),
            note: None,
            document,
            analysis_delay: Duration::from_millis(delay_ms),
        }
    }

    fn doc(name: &str, size: u64) -> SelectedDocument {
        SelectedDocument {
            file_name: name.into(),
            path: PathBuf::from(name),
            size_bytes: size,
        }
    }

    #[tokio::test]
    async fn missing_document_is_the_only_failure() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let (_ctl_tx, ctl_rx) = mpsc::unbounded_channel();
        let err = Assessor::new(cfg(None, 1))
            .run(tx, ctl_rx)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), MISSING_DOCUMENT_MSG);
    }

    #[tokio::test]
    async fn delay_elapses_before_the_report_is_delivered() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (_ctl_tx, ctl_rx) = mpsc::unbounded_channel();
        let start = Instant::now();
        let report = Assessor::new(cfg(Some(doc("pdd.pdf", 100)), 50))
            .run(tx, ctl_rx)
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));
        assert_eq!(report.overall_display(), "72 / 100");

        // Events arrive in lifecycle order.
        assert!(matches!(
            rx.recv().await,
            Some(AssessmentEvent::PhaseStarted {
                phase: Phase::Analyzing
            })
        ));
        assert!(matches!(
            rx.recv().await,
            Some(AssessmentEvent::Info(InfoEvent::DocumentAccepted { .. }))
        ));
        assert!(matches!(
            rx.recv().await,
            Some(AssessmentEvent::Info(InfoEvent::AnalysisNarration))
        ));
        assert!(matches!(
            rx.recv().await,
            Some(AssessmentEvent::PhaseStarted {
                phase: Phase::Summary
            })
        ));
        assert!(matches!(
            rx.recv().await,
            Some(AssessmentEvent::RunCompleted { .. })
        ));
    }

    #[tokio::test]
    async fn any_document_yields_the_identical_assessment() {
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (_c1, ctl1) = mpsc::unbounded_channel();
        let r1 = Assessor::new(cfg(Some(doc("real.pdf", 12)), 1))
            .run(tx1, ctl1)
            .await
            .unwrap();

        let (tx2, _rx2) = mpsc::unbounded_channel();
        let (_c2, ctl2) = mpsc::unbounded_channel();
        let r2 = Assessor::new(cfg(Some(doc("garbage.zip", 20_000_000)), 1))
            .run(tx2, ctl2)
            .await
            .unwrap();

        assert_eq!(r1.overall, r2.overall);
        assert_eq!(r1.dimensions, r2.dimensions);
        assert_eq!(r1.risk_flags, r2.risk_flags);
        assert_eq!(r1.checklist, r2.checklist);
        assert_eq!(r1.advisory, r2.advisory);
    }

    #[tokio::test]
    async fn cancel_aborts_the_delay() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let (ctl_tx, ctl_rx) = mpsc::unbounded_channel();
        ctl_tx.send(AssessorControl::Cancel).unwrap();
        let err = Assessor::new(cfg(Some(doc("pdd.pdf", 100)), 60_000))
            .run(tx, ctl_rx)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("cancelled"));
    }
}
