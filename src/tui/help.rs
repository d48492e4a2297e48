use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_help(area: Rect, f: &mut Frame) {
    let p = Paragraph::new(vec![
        Line::from("Keybinds:"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("q", Style::default().fg(Color::Magenta)),
            Span::raw(" / "),
            Span::styled("Ctrl-C", Style::default().fg(Color::Magenta)),
            Span::raw("  Quit"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("tab", Style::default().fg(Color::Magenta)),
            Span::raw("         Switch tabs"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("?", Style::default().fg(Color::Magenta)),
            Span::raw("           Show this help"),
        ]),
        Line::from(""),
        Line::from("Input form:"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("↑/↓", Style::default().fg(Color::Magenta)),
            Span::raw(" or "),
            Span::styled("j/k", Style::default().fg(Color::Magenta)),
            Span::raw("  Navigate the document picker"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("enter", Style::default().fg(Color::Magenta)),
            Span::raw("       Select document"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("f", Style::default().fg(Color::Magenta)),
            Span::raw("           Refresh file list"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("r", Style::default().fg(Color::Magenta)),
            Span::raw("           Run Quality Assessment"),
        ]),
        Line::from(""),
        Line::from("Report:"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("1-4", Style::default().fg(Color::Magenta)),
            Span::raw("         Toggle due diligence checklist items"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("e", Style::default().fg(Color::Magenta)),
            Span::raw("           Export report as JSON"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("y", Style::default().fg(Color::Magenta)),
            Span::raw("           Copy exported path to clipboard"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("b", Style::default().fg(Color::Magenta)),
            Span::raw("           Back to the input form"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("r", Style::default().fg(Color::Magenta)),
            Span::raw("           Rerun the assessment"),
        ]),
        Line::from(""),
        Line::from(vec![Span::raw(
            "The selected document is never parsed: the report content is a fixed \
             mock-up and the run delay is simulated.",
        )]),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(p, area);
}
