//! Prediction result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{Prediction, SleepDisorder};
use crate::tui::styles::NightTheme;

/// Prediction screen state
#[derive(Debug, Clone, Default)]
pub enum PredictionState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// Completed with result
    Complete { prediction: Prediction },
    /// Pipeline failure; message is already user-safe
    Failed { message: String },
}

/// Render the prediction result screen
pub fn render_prediction(f: &mut Frame, area: Rect, state: &PredictionState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_prediction_header(f, chunks[0]);
    match state {
        PredictionState::Idle => render_idle(f, chunks[1]),
        PredictionState::Complete { prediction } => render_result(f, chunks[1], prediction),
        PredictionState::Failed { message } => render_error(f, chunks[1], message),
    }
    render_prediction_footer(f, chunks[2], state);
}

fn render_prediction_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", NightTheme::text()),
        Span::styled("Screening Result", NightTheme::title()),
        Span::styled(" │ Pre-trained Model", NightTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(NightTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_idle(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "No screening submitted yet",
            NightTheme::text_secondary(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter your details to begin",
            NightTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(NightTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_result(f: &mut Frame, area: Rect, prediction: &Prediction) {
    let block = Block::default()
        .title(Span::styled(" Prediction ", NightTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(NightTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Label
            Constraint::Min(0),    // Explanation
        ])
        .margin(1)
        .split(inner);

    let disorder = prediction.disorder;
    let label_display = Paragraph::new(vec![
        Line::from(Span::styled(
            disorder.label(),
            NightTheme::disorder(disorder).add_modifier(ratatui::style::Modifier::BOLD),
        )),
        Line::from(Span::styled(
            disorder.description(),
            NightTheme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(label_display, chunks[0]);

    render_explanations(f, chunks[1]);
}

/// Static "what this means" block listing every possible label.
fn render_explanations(f: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled("What this means:", NightTheme::text())),
        Line::from(""),
    ];
    for disorder in SleepDisorder::ALL {
        lines.push(Line::from(vec![
            Span::styled("  • ", NightTheme::text_muted()),
            Span::styled(disorder.label(), NightTheme::disorder(disorder)),
            Span::styled(": ", NightTheme::text_muted()),
            Span::styled(disorder.description(), NightTheme::text_secondary()),
        ]));
    }

    let explanations = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(NightTheme::border()),
    );
    f.render_widget(explanations, area);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Screening failed", NightTheme::danger())),
        Line::from(""),
        Line::from(Span::styled(message, NightTheme::text())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(NightTheme::danger()),
    );

    f.render_widget(content, area);
}

fn render_prediction_footer(f: &mut Frame, area: Rect, state: &PredictionState) {
    let content = match state {
        PredictionState::Failed { .. } => Line::from(vec![
            Span::styled("[Enter] ", NightTheme::key_hint()),
            Span::styled("Back to Form ", NightTheme::key_desc()),
            Span::styled("[Esc] ", NightTheme::key_hint()),
            Span::styled("Dashboard", NightTheme::key_desc()),
        ]),
        _ => Line::from(vec![
            Span::styled("[N] ", NightTheme::key_hint()),
            Span::styled("New Screening ", NightTheme::key_desc()),
            Span::styled("[Enter/Esc] ", NightTheme::key_hint()),
            Span::styled("Dashboard", NightTheme::key_desc()),
        ]),
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(NightTheme::border()),
    );

    f.render_widget(footer, area);
}
