mod export;
mod help;
mod screens;

use crate::cli::Cli;
use crate::controller::{self, UiCommand};
use crate::model::{AssessmentEvent, InfoEvent, Phase, SelectedDocument};
use crate::render::{select_branch, RenderBranch};
use crate::report::AssessmentReport;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
    Terminal,
};
use std::path::{Path, PathBuf};
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Which of the three presentation branches (plus the in-flight delay) the
/// Assessment tab is showing. `Analyzing` is the blocking-delay portion of
/// the ResultsReady branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum View {
    Idle,
    MissingFile,
    Analyzing,
    Results,
}

/// One row of the document picker.
#[derive(Debug, Clone)]
pub(crate) struct FileEntry {
    pub file_name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub is_pdf: bool,
}

/// List regular files in `dir` for the picker, PDFs first.
///
/// The PDF grouping is presentation only; any entry can be selected and
/// submitted.
pub(crate) fn scan_directory(dir: &Path) -> Vec<FileEntry> {
    let mut entries: Vec<FileEntry> = std::fs::read_dir(dir)
        .into_iter()
        .flatten()
        .flatten()
        .filter_map(|e| {
            let meta = e.metadata().ok()?;
            if !meta.is_file() {
                return None;
            }
            let file_name = e.file_name().to_string_lossy().to_string();
            let is_pdf = Path::new(&file_name)
                .extension()
                .and_then(|x| x.to_str())
                .map(|x| x.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false);
            Some(FileEntry {
                file_name,
                path: e.path(),
                size_bytes: meta.len(),
                is_pdf,
            })
        })
        .collect();
    entries.sort_by(|a, b| {
        b.is_pdf
            .cmp(&a.is_pdf)
            .then_with(|| a.file_name.cmp(&b.file_name))
    });
    entries
}

pub(crate) struct UiState {
    pub tab: usize,
    pub view: View,
    pub info: String,
    pub note: Option<String>,

    pub entries: Vec<FileEntry>,
    pub picker_selected: usize,
    pub document: Option<SelectedDocument>,

    pub report: Option<AssessmentReport>,
    pub checklist_done: Vec<bool>,
    pub analysis_started: Option<Instant>,
    pub last_exported_path: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tab: 0,
            view: View::Idle,
            info: String::new(),
            note: None,
            entries: Vec::new(),
            picker_selected: 0,
            document: None,
            report: None,
            checklist_done: Vec::new(),
            analysis_started: None,
            last_exported_path: None,
        }
    }
}

impl UiState {
    /// Begin a fresh interaction cycle: the run trigger is cleared, the
    /// document selection is kept.
    fn reset_to_form(&mut self) {
        self.view = View::Idle;
        self.report = None;
        self.checklist_done.clear();
        self.analysis_started = None;
        self.last_exported_path = None;
    }

    fn rescan(&mut self) {
        let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        self.entries = scan_directory(&dir);
        if self.picker_selected >= self.entries.len() {
            self.picker_selected = self.entries.len().saturating_sub(1);
        }
    }

    fn selected_entry_document(&self) -> Option<SelectedDocument> {
        self.entries.get(self.picker_selected).map(|e| SelectedDocument {
            file_name: e.file_name.clone(),
            path: e.path.clone(),
            size_bytes: e.size_bytes,
        })
    }
}

pub async fn run(args: Cli) -> Result<()> {
    // Unbounded channels avoid backpressure between controller and UI.
    let (event_tx, event_rx) = mpsc::unbounded_channel::<AssessmentEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();

    // TUI runs in a dedicated thread to keep all blocking I/O out of the Tokio runtime.
    let ui_args = args.clone();
    let ui_handle = std::thread::spawn(move || run_threaded(ui_args, event_rx, cmd_tx));

    let res = controller::run_controller(&args, event_tx, cmd_rx).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    res
}

/// Run the TUI loop on a dedicated thread.
pub fn run_threaded(
    args: Cli,
    mut event_rx: UnboundedReceiver<AssessmentEvent>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let mut state = UiState {
        note: args.note.clone(),
        ..Default::default()
    };
    // UiState is owned by the UI thread only; no cross-thread mutation.
    state.rescan();
    if let Some(path) = args.file.as_deref() {
        match SelectedDocument::from_path(path) {
            Ok(doc) => {
                state.info = if doc.is_pdf() {
                    format!("Selected {}", doc.file_name)
                } else {
                    // The PDF filter is advisory; anything is accepted.
                    format!("Selected {} (not a PDF, accepted anyway)", doc.file_name)
                };
                state.document = Some(doc);
            }
            Err(e) => state.info = format!("Cannot select {}: {e:#}", path.display()),
        }
    }

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    let res = loop {
        // Drain events without blocking to keep the UI responsive.
        while let Ok(ev) = event_rx.try_recv() {
            apply_event(&mut state, ev);
        }

        if last_tick.elapsed() >= tick_rate {
            terminal.draw(|f| draw(f.area(), f, &state)).ok();
            last_tick = Instant::now();
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            if let Ok(Event::Key(k)) = event::read() {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                match (k.modifiers, k.code) {
                    (_, KeyCode::Char('q')) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
                        let _ = cmd_tx.send(UiCommand::Quit);
                        break Ok(());
                    }
                    (_, KeyCode::Tab) => {
                        state.tab = (state.tab + 1) % 2;
                    }
                    (_, KeyCode::Char('?')) => {
                        state.tab = 1;
                    }
                    _ if state.tab != 0 => {}
                    (_, KeyCode::Up) | (_, KeyCode::Char('k')) => {
                        if on_form(&state) && state.picker_selected > 0 {
                            state.picker_selected -= 1;
                        }
                    }
                    (_, KeyCode::Down) | (_, KeyCode::Char('j')) => {
                        if on_form(&state)
                            && state.picker_selected + 1 < state.entries.len()
                        {
                            state.picker_selected += 1;
                        }
                    }
                    (_, KeyCode::Enter) => {
                        if on_form(&state) {
                            if let Some(doc) = state.selected_entry_document() {
                                state.info = format!("Selected {}", doc.file_name);
                                state.document = Some(doc);
                                // Selecting starts a fresh interaction cycle.
                                state.view = View::Idle;
                            }
                        }
                    }
                    (_, KeyCode::Char('f')) => {
                        if on_form(&state) {
                            state.rescan();
                            state.info = format!("{} file(s) listed", state.entries.len());
                        }
                    }
                    (_, KeyCode::Char('r')) => {
                        if state.view != View::Analyzing {
                            submit(&mut state, &cmd_tx);
                        }
                    }
                    (_, KeyCode::Char('b')) => {
                        if state.view == View::Results || state.view == View::MissingFile {
                            state.reset_to_form();
                            state.info.clear();
                        }
                    }
                    (_, KeyCode::Char(c @ '1'..='4')) => {
                        if state.view == View::Results {
                            let idx = (c as usize) - ('1' as usize);
                            if let Some(done) = state.checklist_done.get_mut(idx) {
                                *done = !*done;
                            }
                        }
                    }
                    (_, KeyCode::Char('e')) => {
                        if state.view == View::Results {
                            if let Some(report) = state.report.clone() {
                                export::export_and_show_path(&report, &mut state);
                            }
                        }
                    }
                    (_, KeyCode::Char('y')) => {
                        if let Some(ref path) = state.last_exported_path {
                            match export::copy_to_clipboard(path) {
                                Ok(_) => {
                                    state.info = format!("Copied to clipboard: {}", path);
                                }
                                Err(e) => {
                                    state.info = format!("Clipboard copy failed: {e:#}");
                                }
                            }
                        } else {
                            state.info =
                                "No exported file path to copy. Export first (e)".into();
                        }
                    }
                    _ => {}
                }
            }
        }
    };

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}

fn on_form(state: &UiState) -> bool {
    matches!(state.view, View::Idle | View::MissingFile)
}

/// Activation of the run control. Re-evaluates the presentation branch from
/// the current session state; no validation beyond document presence.
fn submit(state: &mut UiState, cmd_tx: &UnboundedSender<UiCommand>) {
    match select_branch(state.document.is_some(), true) {
        RenderBranch::ResultsReady => {
            if let Some(doc) = state.document.clone() {
                state.report = None;
                state.checklist_done.clear();
                state.view = View::Analyzing;
                state.analysis_started = Some(Instant::now());
                state.info = "Analyzing Project Quality...".into();
                let _ = cmd_tx.send(UiCommand::Submit(doc));
            }
        }
        RenderBranch::MissingFile => {
            state.view = View::MissingFile;
        }
        // Unreachable: the run trigger is set on this path.
        RenderBranch::Idle => {}
    }
}

fn apply_event(state: &mut UiState, ev: AssessmentEvent) {
    match ev {
        AssessmentEvent::PhaseStarted { phase } => match phase {
            Phase::Analyzing => {
                state.view = View::Analyzing;
                if state.analysis_started.is_none() {
                    state.analysis_started = Some(Instant::now());
                }
            }
            Phase::Summary => {}
        },
        AssessmentEvent::Info(info) => {
            if !matches!(info, InfoEvent::AnalysisNarration) {
                state.info = info.to_message();
            }
            if let InfoEvent::Message(ref msg) = info {
                // A failed launch run falls back to the form.
                if msg.starts_with("Run failed") || msg.starts_with("Cannot select") {
                    if state.view == View::Analyzing {
                        state.view = View::Idle;
                        state.analysis_started = None;
                    }
                }
            }
        }
        AssessmentEvent::RunCompleted { report } => {
            state.checklist_done = vec![false; report.checklist.len()];
            state.report = Some(*report);
            state.view = View::Results;
            state.analysis_started = None;
            state.info = "Assessment complete".into();
        }
    }
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    let tabs = Tabs::new(vec![Line::from("Assessment"), Line::from("Help")])
        .select(state.tab)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("ccqra - Carbon Credit Quality Assessment"),
        )
        .highlight_style(Style::default().fg(Color::Yellow));
    f.render_widget(tabs, chunks[0]);

    match state.tab {
        0 => screens::draw_assessment(chunks[1], f, state),
        _ => help::draw_help(chunks[1], f),
    }
}
