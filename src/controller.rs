//! Run lifecycle controller.
//!
//! Owns submit/quit orchestration for the TUI and emits events back to the
//! presentation layer. One run at a time: the interface is blocked for the
//! duration of the simulated delay, so a submit during a run is refused
//! rather than queued.

use anyhow::Result;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::assessor::{Assessor, AssessorControl};
use crate::cli::{build_config, Cli};
use crate::model::{AssessmentEvent, InfoEvent, SelectedDocument};
use crate::report::AssessmentReport;

/// Commands emitted by UI layers to control the assessment lifecycle.
#[derive(Debug, Clone)]
pub(crate) enum UiCommand {
    Submit(SelectedDocument),
    Quit,
}

/// Internal handle for a running assessment task.
struct RunCtx {
    ctrl_tx: UnboundedSender<AssessorControl>,
    handle: Option<tokio::task::JoinHandle<Result<AssessmentReport>>>,
}

/// Spawn a new assessment run and return its control handle.
fn start_run(
    args: &Cli,
    document: SelectedDocument,
    event_tx: UnboundedSender<AssessmentEvent>,
) -> RunCtx {
    let cfg = build_config(args, Some(document));
    let (ctrl_tx, ctrl_rx) = tokio::sync::mpsc::unbounded_channel::<AssessorControl>();
    let assessor = Assessor::new(cfg);
    let handle = tokio::spawn(async move { assessor.run(event_tx, ctrl_rx).await });
    RunCtx {
        ctrl_tx,
        handle: Some(handle),
    }
}

/// Orchestrate assessment runs based on UI commands.
pub(crate) async fn run_controller(
    args: &Cli,
    event_tx: UnboundedSender<AssessmentEvent>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
) -> Result<()> {
    // With --file given, the run starts on launch; otherwise the controller
    // idles until the user submits from the form.
    let mut run_ctx: Option<RunCtx> = None;
    if args.run_on_launch {
        if let Some(path) = args.file.as_deref() {
            match SelectedDocument::from_path(path) {
                Ok(doc) => run_ctx = Some(start_run(args, doc, event_tx.clone())),
                Err(e) => {
                    let _ = event_tx.send(AssessmentEvent::Info(InfoEvent::Message(format!(
                        "Cannot select {}: {e:#}",
                        path.display()
                    ))));
                }
            }
        }
    }
    let mut quit_pending = false;

    let res = loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UiCommand::Submit(doc)) => {
                        if run_ctx.is_some() {
                            let _ = event_tx.send(AssessmentEvent::Info(InfoEvent::Message(
                                "Assessment already in progress".into(),
                            )));
                        } else {
                            run_ctx = Some(start_run(args, doc, event_tx.clone()));
                        }
                    }
                    Some(UiCommand::Quit) => {
                        // Quit waits for the active run so UI state finalizes cleanly.
                        quit_pending = true;
                        if let Some(ctx) = &run_ctx {
                            let _ = ctx.ctrl_tx.send(AssessorControl::Cancel);
                        } else {
                            break Ok(());
                        }
                    }
                    None => {
                        quit_pending = true;
                        if let Some(ctx) = &run_ctx {
                            let _ = ctx.ctrl_tx.send(AssessorControl::Cancel);
                        } else {
                            break Ok(());
                        }
                    }
                }
            }
            // Do not take the JoinHandle before this branch wins; otherwise it can be
            // dropped when another branch is chosen and completion is never observed.
            maybe_done = async {
                if let Some(ctx) = &mut run_ctx {
                    if let Some(h) = ctx.handle.as_mut() {
                        return Some(h.await);
                    }
                }
                futures::future::pending().await
            } => {
                if let Some(join_res) = maybe_done {
                    if let Some(ctx) = &mut run_ctx {
                        ctx.handle.take();
                    }
                    match join_res {
                        Ok(Ok(_report)) => {
                            // RunCompleted was already emitted by the assessor.
                        }
                        Ok(Err(e)) => {
                            let _ = event_tx.send(AssessmentEvent::Info(InfoEvent::Message(
                                format!("Run failed: {e:#}"),
                            )));
                        }
                        Err(e) => {
                            let _ = event_tx.send(AssessmentEvent::Info(InfoEvent::Message(
                                format!("Run join failed: {e}"),
                            )));
                        }
                    }
                    run_ctx = None;
                    if quit_pending {
                        break Ok(());
                    }
                }
            }
        }
    };

    res
}
