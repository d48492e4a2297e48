use crate::assessor::Assessor;
use crate::model::{AssessmentEvent, RunConfig, SelectedDocument};
use crate::render::MISSING_DOCUMENT_MSG;
use anyhow::{Context, Result};
use clap::Parser;
use rand::RngCore;
use std::io::Write;
use std::time::Duration;
use tokio::sync::mpsc;

/// Output line routing for stdout/stderr writer.
enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Spawn a blocking writer for stdout/stderr to avoid blocking async tasks.
fn spawn_output_writer() -> (
    mpsc::UnboundedSender<OutputLine>,
    tokio::task::JoinHandle<()>,
) {
    let (tx, mut rx) = mpsc::unbounded_channel::<OutputLine>();
    let handle = tokio::task::spawn_blocking(move || {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        let mut out = std::io::LineWriter::new(stdout.lock());
        let mut err = std::io::LineWriter::new(stderr.lock());

        while let Some(line) = rx.blocking_recv() {
            match line {
                OutputLine::Stdout(msg) => {
                    let _ = writeln!(out, "{}", msg);
                }
                OutputLine::Stderr(msg) => {
                    let _ = writeln!(err, "{}", msg);
                }
            }
        }

        let _ = out.flush();
        let _ = err.flush();
    });
    (tx, handle)
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "ccqra",
    version,
    about = "Carbon credit quality assessment demo with optional TUI"
)]
pub struct Cli {
    /// Carbon project document to assess (PDDs, monitoring reports; the
    /// content is never read, only its presence matters)
    #[arg(long)]
    pub file: Option<std::path::PathBuf>,

    /// Print the assessment report as JSON and exit (no TUI)
    #[arg(long)]
    pub json: bool,

    /// Print a text summary and exit (no TUI)
    #[arg(long)]
    pub text: bool,

    /// Run silently: suppress all output except errors (for cron usage)
    #[arg(long)]
    pub silent: bool,

    /// Simulated analysis delay before the report is revealed
    #[arg(long, default_value = "2s")]
    pub analysis_delay: humantime::Duration,

    /// Export the report as JSON
    #[arg(long)]
    pub export_json: Option<std::path::PathBuf>,

    /// Attach an analyst note to this assessment
    #[arg(long)]
    pub note: Option<String>,

    /// Automatically submit the --file document when the TUI launches
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub run_on_launch: bool,
}

pub async fn run(args: Cli) -> Result<()> {
    // Validate that --silent can only be used with --json
    if args.silent && !args.json {
        return Err(anyhow::anyhow!(
            "--silent can only be used with --json. Use --silent --json together."
        ));
    }

    // Silent mode takes precedence over other output modes
    if args.silent {
        return run_assessment(args, true).await;
    }

    if !args.json && !args.text {
        #[cfg(feature = "tui")]
        {
            return crate::tui::run(args).await;
        }
        #[cfg(not(feature = "tui"))]
        {
            // Fallback when built without TUI support.
            return run_text(args).await;
        }
    }

    if args.json {
        return run_assessment(args, false).await;
    }

    run_text(args).await
}

/// Generate a random id for one assessment run.
fn gen_assessment_id() -> String {
    let mut b = [0u8; 8];
    rand::thread_rng().fill_bytes(&mut b);
    u64::from_le_bytes(b).to_string()
}

/// Build a `RunConfig` from CLI arguments and the selected document.
pub fn build_config(args: &Cli, document: Option<SelectedDocument>) -> RunConfig {
    RunConfig {
        assessment_id: gen_assessment_id(),
        note: args.note.clone(),
        document,
        analysis_delay: Duration::from(args.analysis_delay),
    }
}

/// Resolve the document for non-interactive modes. Presence is the only
/// contract: type and size are never validated.
fn resolve_document(args: &Cli) -> Result<SelectedDocument> {
    let path = args
        .file
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("{}", MISSING_DOCUMENT_MSG))?;
    SelectedDocument::from_path(path)
}

/// Common function to run the assessor and print the JSON report.
/// `silent` controls whether events are consumed and output suppressed.
async fn run_assessment(args: Cli, silent: bool) -> Result<()> {
    let document = resolve_document(&args)?;
    let cfg = build_config(&args, Some(document));
    let (out_tx, out_handle) = if silent {
        (None, None)
    } else {
        let (tx, handle) = spawn_output_writer();
        (Some(tx), Some(handle))
    };
    let report = if silent {
        // In silent mode, spawn the task and consume events without output
        let (evt_tx, mut evt_rx) = mpsc::unbounded_channel::<AssessmentEvent>();
        let (_ctl_tx, ctl_rx) = mpsc::unbounded_channel();

        let assessor = Assessor::new(cfg);
        let handle = tokio::spawn(async move { assessor.run(evt_tx, ctl_rx).await });

        while let Some(_ev) = evt_rx.recv().await {
            // All events are silently consumed
        }

        handle
            .await
            .context("assessment task failed")?
            .context("assessment failed")?
    } else {
        // In JSON mode, directly await the run (no need to consume events)
        let (evt_tx, _) = mpsc::unbounded_channel::<AssessmentEvent>();
        let (_ctl_tx, ctl_rx) = mpsc::unbounded_channel();

        Assessor::new(cfg)
            .run(evt_tx, ctl_rx)
            .await
            .context("assessment failed")?
    };

    // Handle exports (errors will propagate)
    handle_exports(&args, &report)?;

    if let Some(tx) = out_tx.as_ref() {
        let out = serde_json::to_string_pretty(&report)?;
        let _ = tx.send(OutputLine::Stdout(out));
    }

    if let Some(tx) = out_tx {
        drop(tx);
    }
    if let Some(handle) = out_handle {
        let _ = handle.await;
    }

    Ok(())
}

async fn run_text(args: Cli) -> Result<()> {
    let document = resolve_document(&args)?;
    let cfg = build_config(&args, Some(document));
    let (out_tx, out_handle) = spawn_output_writer();
    let (evt_tx, mut evt_rx) = mpsc::unbounded_channel::<AssessmentEvent>();
    let (_ctl_tx, ctl_rx) = mpsc::unbounded_channel();

    let assessor = Assessor::new(cfg);
    let handle = tokio::spawn(async move { assessor.run(evt_tx, ctl_rx).await });

    while let Some(ev) = evt_rx.recv().await {
        match ev {
            AssessmentEvent::PhaseStarted { phase } => {
                let _ = out_tx.send(OutputLine::Stderr(format!("== {phase:?} ==")));
            }
            AssessmentEvent::Info(info) => {
                let _ = out_tx.send(OutputLine::Stderr(info.to_message()));
            }
            AssessmentEvent::RunCompleted { .. } => {}
        }
    }

    let report = handle.await??;

    handle_exports(&args, &report)?;
    let summary = crate::text_summary::build_text_summary(&report);
    for line in summary.lines {
        let _ = out_tx.send(OutputLine::Stdout(line));
    }
    drop(out_tx);
    let _ = out_handle.await;
    Ok(())
}

/// Handle the --export-json flag for both text and JSON modes.
fn handle_exports(args: &Cli, report: &crate::report::AssessmentReport) -> Result<()> {
    if let Some(p) = args.export_json.as_deref() {
        crate::export::export_json(p, report)?;
    }
    Ok(())
}
