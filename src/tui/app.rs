//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Running the prediction pipeline on form submit

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::ForestClassifier;
use crate::application::PredictionService;
use crate::SomnoscanError;

use super::ui::{
    dashboard::{render_dashboard, DashboardState},
    form::{render_profile_form, ProfileFormState},
    prediction::{render_prediction, PredictionState},
    render_disclaimer,
};

/// Current screen/view in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    ProfileForm,
    Prediction,
}

/// Main application state
pub struct App {
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Prediction service over the pre-loaded classifier
    service: PredictionService<ForestClassifier>,

    /// Dashboard state
    dashboard_state: DashboardState,

    /// Profile form state
    form_state: ProfileFormState,

    /// Prediction screen state
    prediction_state: PredictionState,
}

impl App {
    /// Create a new application instance, loading the model artifact.
    ///
    /// The artifact is a hard startup dependency: if it cannot be loaded
    /// and verified, this fails and the process serves nothing.
    ///
    /// # Errors
    /// Returns error if the artifact is missing or invalid.
    pub fn new() -> Result<Self> {
        let model_path = std::env::var("SOMNOSCAN_MODEL_PATH")
            .unwrap_or_else(|_| "models".to_string());
        let model_path = std::path::Path::new(&model_path);

        if !model_path.exists() {
            return Err(anyhow!(
                "Model path not found at {:?}. Set SOMNOSCAN_MODEL_PATH to a directory containing sleep_model.json.",
                model_path
            ));
        }

        let classifier = ForestClassifier::load(model_path)
            .map_err(|e| anyhow!("Failed to load model from {:?}: {}", model_path, e))?;

        Ok(Self::with_classifier(Arc::new(classifier)))
    }

    /// Create the application around an already-loaded classifier
    /// (Composition Root pattern). Used by `new()` and by tests.
    #[must_use]
    pub fn with_classifier(classifier: Arc<ForestClassifier>) -> Self {
        let dashboard_state = DashboardState {
            model_loaded: true,
            tree_count: classifier.num_trees(),
            session_predictions: 0,
        };

        Self {
            screen: Screen::Dashboard,
            should_quit: false,
            service: PredictionService::new(classifier),
            dashboard_state,
            form_state: ProfileFormState::default(),
            prediction_state: PredictionState::default(),
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(2)])
                    .split(area);

                let content_area = chunks[0];
                let disclaimer_area = chunks[1];

                match self.screen {
                    Screen::Dashboard => render_dashboard(f, content_area, &self.dashboard_state),
                    Screen::ProfileForm => render_profile_form(f, content_area, &self.form_state),
                    Screen::Prediction => {
                        render_prediction(f, content_area, &self.prediction_state)
                    }
                }

                render_disclaimer(f, disclaimer_area);
            })?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Dashboard => self.handle_dashboard_key(key),
            Screen::ProfileForm => self.handle_form_key(key),
            Screen::Prediction => self.handle_prediction_key(key),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.form_state = ProfileFormState::default();
                self.screen = Screen::ProfileForm;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.screen = Screen::Dashboard;
            }
            KeyCode::Up => {
                self.form_state.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.form_state.next_field();
            }
            KeyCode::Left => {
                self.form_state.cycle_prev();
            }
            KeyCode::Right => {
                self.form_state.cycle_next();
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.form_state.load_sample_data();
            }
            KeyCode::Char(c) => {
                self.form_state.input_char(c);
            }
            KeyCode::Backspace => {
                self.form_state.delete_char();
            }
            KeyCode::Delete => {
                self.form_state.clear_field();
            }
            KeyCode::Enter => {
                self.submit_profile_form();
            }
            _ => {}
        }
    }

    fn handle_prediction_key(&mut self, key: KeyCode) {
        match &self.prediction_state {
            PredictionState::Failed { .. } => match key {
                KeyCode::Enter => {
                    // Inputs are still in the form; let the user fix them.
                    self.screen = Screen::ProfileForm;
                }
                KeyCode::Esc => {
                    self.screen = Screen::Dashboard;
                }
                _ => {}
            },
            _ => match key {
                KeyCode::Enter | KeyCode::Esc => {
                    self.screen = Screen::Dashboard;
                }
                KeyCode::Char('n') | KeyCode::Char('N') => {
                    self.form_state = ProfileFormState::default();
                    self.screen = Screen::ProfileForm;
                }
                _ => {}
            },
        }
    }

    fn submit_profile_form(&mut self) {
        let profile = match self.form_state.to_profile() {
            Ok(profile) => profile,
            Err(e) => {
                self.form_state.error_message = Some(e);
                return;
            }
        };

        match self.service.predict(&profile) {
            Ok(prediction) => {
                self.dashboard_state.session_predictions += 1;
                self.prediction_state = PredictionState::Complete { prediction };

                // Drop the raw inputs now that a result exists.
                self.form_state.clear_sensitive();
                self.screen = Screen::Prediction;
            }
            Err(SomnoscanError::Validation(message)) => {
                self.form_state.error_message = Some(message);
            }
            Err(e) => {
                // Encoding/model contract failures are operator problems;
                // the user gets a generic message, the log gets the cause.
                tracing::error!("Screening pipeline failed: {}", e);
                self.prediction_state = PredictionState::Failed {
                    message: "The screening could not be completed. Check the log for details."
                        .to_string(),
                };
                self.screen = Screen::Prediction;
            }
        }
    }
}
