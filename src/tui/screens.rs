//! Assessment tab rendering.
//!
//! One draw function per presentation branch: the input form (with or
//! without the missing-document error), the simulated-analysis wait screen,
//! and the fixed report.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::model::format_size;
use crate::render::MISSING_DOCUMENT_MSG;
use crate::report;

use super::{UiState, View};

pub(crate) fn draw_assessment(area: Rect, f: &mut Frame, state: &UiState) {
    match state.view {
        View::Idle => draw_form(area, f, state, false),
        View::MissingFile => draw_form(area, f, state, true),
        View::Analyzing => draw_analyzing(area, f, state),
        View::Results => draw_report(area, f, state),
    }
}

fn gray<'a, T: Into<std::borrow::Cow<'a, str>>>(text: T) -> Span<'a> {
    Span::styled(text, Style::default().fg(Color::Gray))
}

fn draw_form(area: Rect, f: &mut Frame, state: &UiState, missing_file: bool) {
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(5), // header
                Constraint::Min(6),    // picker + selection
                Constraint::Length(4), // error / caption
                Constraint::Length(3), // status
            ]
            .as_ref(),
        )
        .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "Carbon Credit Quality & Risk Assessment Assistant",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(gray(
            "AI-native decision support for voluntary carbon markets",
        )),
        Line::from(
            "Upload a carbon project document to receive a structured quality assessment, \
             risk flags, and an investor-ready recommendation.",
        ),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, main[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
        .split(main[1]);

    // Document picker. The PDF ordering is cosmetic; any file can be chosen.
    let visible = (body[0].height as usize).saturating_sub(2).max(1);
    let offset = state
        .picker_selected
        .saturating_sub(visible.saturating_sub(1));
    let mut picker_lines: Vec<Line> = Vec::new();
    for (i, entry) in state.entries.iter().enumerate().skip(offset).take(visible) {
        let marker = if i == state.picker_selected { "> " } else { "  " };
        let name_style = if entry.is_pdf {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let line_style = if i == state.picker_selected {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        picker_lines.push(
            Line::from(vec![
                Span::raw(marker),
                Span::styled(entry.file_name.clone(), name_style),
                Span::raw("  "),
                gray(format_size(entry.size_bytes)),
            ])
            .style(line_style),
        );
    }
    if picker_lines.is_empty() {
        picker_lines.push(Line::from(gray("No files in the current directory")));
    }
    let picker = Paragraph::new(picker_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Project Document Input (PDF)"),
    );
    f.render_widget(picker, body[0]);

    let mut side_lines = vec![Line::from(vec![
        gray("Selected: "),
        match state.document.as_ref() {
            Some(doc) => Span::raw(format!(
                "{} ({})",
                doc.file_name,
                format_size(doc.size_bytes)
            )),
            None => Span::raw("-"),
        },
    ])];
    if let Some(note) = state.note.as_deref() {
        side_lines.push(Line::from(vec![gray("Note: "), Span::raw(note)]));
    }
    side_lines.extend(vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("enter", Style::default().fg(Color::Magenta)),
            Span::raw("  Select document"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("r", Style::default().fg(Color::Magenta)),
            Span::raw("      Run Quality Assessment"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("f", Style::default().fg(Color::Magenta)),
            Span::raw("      Refresh file list"),
        ]),
    ]);
    let side = Paragraph::new(side_lines)
        .block(Block::default().borders(Borders::ALL).title("Selection"));
    f.render_widget(side, body[1]);

    let caption_lines = if missing_file {
        vec![
            Line::from(Span::styled(
                MISSING_DOCUMENT_MSG,
                Style::default().fg(Color::Red),
            )),
            Line::from(gray(
                "Accepted files: Project Design Documents (PDDs), Monitoring Reports. \
                 Max file size: 20 MB.",
            )),
        ]
    } else {
        vec![
            Line::from(gray(
                "Accepted files: Project Design Documents (PDDs), Monitoring Reports. \
                 Max file size: 20 MB.",
            )),
            Line::from(gray(
                "We analyze unstructured documents - no templates or formatting required.",
            )),
        ]
    };
    let caption = Paragraph::new(caption_lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(caption, main[2]);

    draw_status(main[3], f, state);
}

fn draw_analyzing(area: Rect, f: &mut Frame, state: &UiState) {
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(3)].as_ref())
        .split(area);

    let elapsed = state
        .analysis_started
        .map(|t| t.elapsed().as_secs_f64())
        .unwrap_or(0.0);
    // Poor man's spinner, advanced by the render tick.
    const FRAMES: [&str; 4] = ["|", "/", "-", "\\"];
    let frame = FRAMES[((elapsed * 4.0) as usize) % FRAMES.len()];

    let doc_line = match state.document.as_ref() {
        Some(doc) => format!("{} ({})", doc.file_name, format_size(doc.size_bytes)),
        None => "-".into(),
    };
    let p = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::raw(format!(" {} ", frame)),
            Span::styled(
                "Analyzing Project Quality...",
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(
            "  Extracting project claims, checking assumptions, and evaluating risks \
             across key quality dimensions.",
        ),
        Line::from(""),
        Line::from(vec![gray("  Document: "), Span::raw(doc_line)]),
        Line::from(vec![
            gray("  Elapsed: "),
            Span::raw(format!("{:.1}s", elapsed)),
        ]),
    ])
    .wrap(Wrap { trim: false })
    .block(Block::default().borders(Borders::ALL).title("Processing"));
    f.render_widget(p, main[0]);

    draw_status(main[1], f, state);
}

fn draw_report(area: Rect, f: &mut Frame, state: &UiState) {
    let Some(report) = state.report.as_ref() else {
        return;
    };

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(6), // summary cards
                Constraint::Length(7), // dimension scores
                Constraint::Length(9), // risk flags
                Constraint::Length(8), // checklist
                Constraint::Min(5),    // advisory
                Constraint::Length(4), // disclaimer + status
            ]
            .as_ref(),
        )
        .split(area);

    // Top summary cards: overall score and recommended action.
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(main[0]);

    let score = Paragraph::new(vec![
        Line::from(Span::styled(
            report.overall_display(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(gray(report.overall.summary.as_str())),
        Line::from(gray(report::RESULTS_CAPTION)),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Overall Project Quality Score"),
    );
    f.render_widget(score, cards[0]);

    let action = Paragraph::new(vec![
        Line::from(Span::styled(
            report.overall.recommended_action.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(gray(report.overall.action_rationale.as_str())),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Recommended Action"),
    );
    f.render_widget(action, cards[1]);

    // One column per quality dimension.
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
            ]
            .as_ref(),
        )
        .split(main[1]);
    for (dim, column) in report.dimensions.iter().zip(columns.iter()) {
        let p = Paragraph::new(vec![
            Line::from(Span::styled(
                format!("{} / {}", dim.score, dim.max_score),
                Style::default().fg(Color::Cyan),
            )),
            Line::from(gray(dim.caption.as_str())),
        ])
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(dim.label.clone()),
        );
        f.render_widget(p, *column);
    }

    let mut flag_lines: Vec<Line> = Vec::new();
    for flag in &report.risk_flags {
        flag_lines.push(Line::from(Span::styled(
            flag.title.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        flag_lines.push(Line::from(format!("  {}", flag.detail)));
    }
    flag_lines.push(Line::from(gray(report::RISK_FLAGS_CAPTION)));
    let flags = Paragraph::new(flag_lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Key Risk Flags Identified"),
    );
    f.render_widget(flags, main[2]);

    let mut check_lines: Vec<Line> = Vec::new();
    for (i, item) in report.checklist.iter().enumerate() {
        let done = state.checklist_done.get(i).copied().unwrap_or(false);
        let mark = if done { "[x]" } else { "[ ]" };
        let style = if done {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        check_lines.push(Line::from(vec![
            Span::styled(format!("{} ", mark), style),
            Span::raw(item.clone()),
            gray(format!("  ({})", i + 1)),
        ]));
    }
    check_lines.push(Line::from(gray(report::CHECKLIST_CAPTION)));
    let checklist = Paragraph::new(check_lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Targeted Due Diligence Checklist (1-4 to toggle)"),
    );
    f.render_widget(checklist, main[3]);

    let advisory = Paragraph::new(vec![
        Line::from(report.advisory.clone()),
        Line::from(""),
        Line::from(gray(report::ADVISORY_AUDIENCE)),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Executive Advisory Summary"),
    );
    f.render_widget(advisory, main[4]);

    let footer = Paragraph::new(vec![
        Line::from(gray(report.disclaimer.as_str())),
        Line::from(vec![
            gray("Keys: "),
            Span::raw("e export | y copy path | b new assessment | r rerun | q quit"),
            Span::raw("   "),
            gray("Info: "),
            Span::raw(state.info.clone()),
        ]),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, main[5]);
}

fn draw_status(area: Rect, f: &mut Frame, state: &UiState) {
    let status = Paragraph::new(vec![Line::from(vec![
        gray("Info: "),
        Span::raw(state.info.clone()),
        Span::raw("   "),
        gray("Keys: "),
        Span::raw("enter select | r run | tab switch | ? help | q quit"),
    ])])
    .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, area);
}
