//! Dashboard view: Main overview screen.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{NUM_FEATURES, FEATURE_NAMES};
use crate::tui::styles::NightTheme;

/// Dashboard state for rendering.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub model_loaded: bool,
    pub tree_count: usize,
    pub session_predictions: usize,
}

/// Render the main dashboard view.
pub fn render_dashboard(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
        ])
        .split(area);

    render_header(f, chunks[0]);
    render_main_content(f, chunks[1], state);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", NightTheme::text()),
        Span::styled("Somnoscan", NightTheme::title()),
        Span::styled(" │ ", NightTheme::text_muted()),
        Span::styled("Sleep Disorder Screening", NightTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(NightTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_main_content(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45), // Status panel
            Constraint::Percentage(55), // Welcome / actions
        ])
        .split(area);

    render_status_panel(f, chunks[0], state);
    render_welcome_panel(f, chunks[1]);
}

fn render_status_panel(f: &mut Frame, area: Rect, state: &DashboardState) {
    let status_lines = vec![
        format_status_item("Model Loaded", state.model_loaded),
        Line::from(vec![
            Span::styled("  Trees: ", NightTheme::text_secondary()),
            Span::styled(state.tree_count.to_string(), NightTheme::text()),
        ]),
        Line::from(vec![
            Span::styled("  Features: ", NightTheme::text_secondary()),
            Span::styled(NUM_FEATURES.to_string(), NightTheme::text()),
            Span::styled(
                format!(" ({} … {})", FEATURE_NAMES[0], FEATURE_NAMES[NUM_FEATURES - 1]),
                NightTheme::text_muted(),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Screenings this session: ", NightTheme::text_secondary()),
            Span::styled(state.session_predictions.to_string(), NightTheme::text()),
        ]),
    ];

    let panel = Paragraph::new(status_lines).block(
        Block::default()
            .title(Span::styled(" System Status ", NightTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(NightTheme::border()),
    );

    f.render_widget(panel, area);
}

fn format_status_item(label: &str, ok: bool) -> Line<'_> {
    let (marker, style) = if ok {
        ("OK", NightTheme::success())
    } else {
        ("--", NightTheme::danger())
    };
    Line::from(vec![
        Span::styled(format!("  {label}: "), NightTheme::text_secondary()),
        Span::styled(marker, style),
    ])
}

fn render_welcome_panel(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Enter your health and lifestyle details to find out if you",
            NightTheme::text_secondary(),
        )),
        Line::from(Span::styled(
            "are at risk of sleep disorders such as Insomnia or Sleep Apnea.",
            NightTheme::text_secondary(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[N] ", NightTheme::key_hint()),
            Span::styled("New Screening  ", NightTheme::key_desc()),
            Span::styled("[Q] ", NightTheme::key_hint()),
            Span::styled("Quit", NightTheme::key_desc()),
        ]),
    ];

    let panel = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(" Welcome ", NightTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(NightTheme::border()),
    );

    f.render_widget(panel, area);
}
