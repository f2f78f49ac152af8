//! Profile data input form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::{BmiCategory, Gender, Occupation, UserProfile};
use crate::tui::styles::NightTheme;

/// Input widget kind behind a form field.
#[derive(Debug, Clone)]
pub enum FieldInput {
    /// Free numeric entry with a declared range. Out-of-range values are
    /// rejected at submit, never clamped.
    Numeric {
        value: String,
        min: f64,
        max: f64,
        integer: bool,
    },
    /// Closed categorical choice cycled with left/right. No free text.
    Choice {
        options: &'static [&'static str],
        selected: usize,
    },
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub hint: &'static str,
    pub input: FieldInput,
}

/// Parsed value of one field.
enum FieldValue {
    Number(f64),
    Selection(usize),
}

impl FormField {
    fn numeric(label: &'static str, hint: &'static str, min: f64, max: f64) -> Self {
        Self {
            label,
            hint,
            input: FieldInput::Numeric {
                value: String::new(),
                min,
                max,
                integer: true,
            },
        }
    }

    fn decimal(label: &'static str, hint: &'static str, min: f64, max: f64) -> Self {
        Self {
            label,
            hint,
            input: FieldInput::Numeric {
                value: String::new(),
                min,
                max,
                integer: false,
            },
        }
    }

    fn choice(label: &'static str, hint: &'static str, options: &'static [&'static str]) -> Self {
        Self {
            label,
            hint,
            input: FieldInput::Choice {
                options,
                selected: 0,
            },
        }
    }

    fn parse_value(&self) -> Result<FieldValue, String> {
        match &self.input {
            FieldInput::Choice { selected, .. } => Ok(FieldValue::Selection(*selected)),
            FieldInput::Numeric {
                value,
                min,
                max,
                integer,
            } => {
                let parsed: f64 = value
                    .parse()
                    .map_err(|_| format!("{}: Invalid number", self.label))?;

                if *integer && parsed.fract() != 0.0 {
                    return Err(format!("{}: Must be a whole number", self.label));
                }
                if parsed < *min || parsed > *max {
                    return Err(format!(
                        "{}: Value must be between {} and {}",
                        self.label, min, max
                    ));
                }

                Ok(FieldValue::Number(parsed))
            }
        }
    }
}

/// Static option lists for the categorical fields, in encoding-table order.
const GENDER_OPTIONS: [&str; 2] = ["Male", "Female"];
const OCCUPATION_OPTIONS: [&str; 11] = [
    "Software Engineer",
    "Doctor",
    "Sales Representative",
    "Teacher",
    "Nurse",
    "Engineer",
    "Accountant",
    "Scientist",
    "Lawyer",
    "Salesperson",
    "Manager",
];
const BMI_OPTIONS: [&str; 4] = ["Underweight", "Normal", "Overweight", "Obese"];

/// Profile form state
pub struct ProfileFormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl Default for ProfileFormState {
    fn default() -> Self {
        // Field order matches the encoding contract (FEATURE_NAMES).
        Self {
            fields: vec![
                FormField::choice("Gender", "select with left/right", &GENDER_OPTIONS),
                FormField::numeric("Age", "years (1-120)", 1.0, 120.0),
                FormField::choice("Occupation", "select with left/right", &OCCUPATION_OPTIONS),
                FormField::decimal("Sleep Duration", "hours (0-24)", 0.0, 24.0),
                FormField::numeric("Quality of Sleep", "1=poor, 10=excellent", 1.0, 10.0),
                FormField::numeric("Physical Activity", "1=low, 100=high", 1.0, 100.0),
                FormField::numeric("Stress Level", "1=low, 10=high", 1.0, 10.0),
                FormField::choice("BMI Category", "select with left/right", &BMI_OPTIONS),
                FormField::numeric("Heart Rate", "bpm (30-200)", 30.0, 200.0),
                FormField::numeric("Daily Steps", "steps (0-50000)", 0.0, 50_000.0),
                FormField::numeric("Systolic BP", "mmHg (50-250)", 50.0, 250.0),
                FormField::numeric("Diastolic BP", "mmHg (30-150)", 30.0, 150.0),
            ],
            selected_field: 0,
            error_message: None,
        }
    }
}

impl ProfileFormState {
    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current field (numeric fields only)
    pub fn input_char(&mut self, c: char) {
        if let FieldInput::Numeric { value, .. } = &mut self.fields[self.selected_field].input {
            if c.is_ascii_digit() || c == '.' {
                value.push(c);
                self.error_message = None;
            }
        }
    }

    /// Delete the last character (numeric fields only)
    pub fn delete_char(&mut self) {
        if let FieldInput::Numeric { value, .. } = &mut self.fields[self.selected_field].input {
            value.pop();
        }
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        match &mut self.fields[self.selected_field].input {
            FieldInput::Numeric { value, .. } => value.clear(),
            FieldInput::Choice { selected, .. } => *selected = 0,
        }
    }

    /// Cycle the current choice field backwards
    pub fn cycle_prev(&mut self) {
        if let FieldInput::Choice { options, selected } =
            &mut self.fields[self.selected_field].input
        {
            *selected = (*selected + options.len() - 1) % options.len();
            self.error_message = None;
        }
    }

    /// Cycle the current choice field forwards
    pub fn cycle_next(&mut self) {
        if let FieldInput::Choice { options, selected } =
            &mut self.fields[self.selected_field].input
        {
            *selected = (*selected + 1) % options.len();
            self.error_message = None;
        }
    }

    /// Wipe all input buffers and reset the form.
    ///
    /// Called immediately after a submission is accepted so raw health
    /// inputs do not persist in UI state.
    pub fn clear_sensitive(&mut self) {
        for field in self.fields.iter_mut() {
            match &mut field.input {
                FieldInput::Numeric { value, .. } => value.zeroize(),
                FieldInput::Choice { selected, .. } => *selected = 0,
            }
        }
        self.error_message = None;
        self.selected_field = 0;
    }

    /// Validate and convert to a UserProfile.
    ///
    /// Rejects with a per-field message on the first violation; nothing
    /// is clamped and no partial profile is produced.
    pub fn to_profile(&self) -> Result<UserProfile, String> {
        let mut values = Vec::with_capacity(self.fields.len());
        for field in self.fields.iter() {
            values.push(field.parse_value()?);
        }

        use FieldValue::{Number, Selection};
        match values.as_slice() {
            [Selection(gender), Number(age), Selection(occupation), Number(sleep_duration), Number(quality), Number(activity), Number(stress), Selection(bmi), Number(heart_rate), Number(daily_steps), Number(systolic), Number(diastolic)] => {
                Ok(UserProfile {
                    gender: Gender::ALL[*gender],
                    age: *age as u32,
                    occupation: Occupation::ALL[*occupation],
                    sleep_duration: *sleep_duration,
                    quality_of_sleep: *quality as u8,
                    physical_activity_level: *activity as u8,
                    stress_level: *stress as u8,
                    bmi_category: BmiCategory::ALL[*bmi],
                    heart_rate: *heart_rate as u32,
                    daily_steps: *daily_steps as u32,
                    systolic_bp: *systolic as u32,
                    diastolic_bp: *diastolic as u32,
                })
            }
            _ => Err("Form schema mismatch".to_string()),
        }
    }

    /// Load sample data (the documentation's example profile)
    pub fn load_sample_data(&mut self) {
        let numeric_samples = [
            (1, "29"),    // age (years)
            (3, "6.5"),   // sleep duration (hours)
            (4, "5"),     // quality of sleep
            (5, "40"),    // physical activity
            (6, "7"),     // stress level
            (8, "78"),    // heart rate (bpm)
            (9, "4000"),  // daily steps
            (10, "130"),  // systolic BP (mmHg)
            (11, "85"),   // diastolic BP (mmHg)
        ];
        for (index, sample) in numeric_samples {
            if let FieldInput::Numeric { value, .. } = &mut self.fields[index].input {
                *value = sample.to_string();
            }
        }

        let choice_samples = [
            (0, Gender::Male.code()),
            (2, Occupation::Doctor.code()),
            (7, BmiCategory::Overweight.code()),
        ];
        for (index, code) in choice_samples {
            if let FieldInput::Choice { selected, .. } = &mut self.fields[index].input {
                *selected = usize::from(code);
            }
        }
    }
}

/// Render the profile data input form
pub fn render_profile_form(f: &mut Frame, area: Rect, state: &ProfileFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", NightTheme::text()),
        Span::styled("Health & Lifestyle Details", NightTheme::title()),
        Span::styled(
            " │ Sleep Disorder Screening",
            NightTheme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(NightTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &ProfileFormState) {
    // Two-column layout
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = (state.fields.len() + 1) / 2;

    render_field_column(f, columns[0], &state.fields[..mid], 0, state.selected_field);
    render_field_column(
        f,
        columns[1],
        &state.fields[mid..],
        mid,
        state.selected_field,
    );
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let field_height = 3;
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let border_style = if is_selected {
            NightTheme::border_focused()
        } else {
            NightTheme::border()
        };

        let title_style = if is_selected {
            NightTheme::focused()
        } else {
            NightTheme::text_secondary()
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let content = Paragraph::new(field_line(field, is_selected)).block(block);
        f.render_widget(content, chunks[i]);
    }
}

fn field_line(field: &FormField, is_selected: bool) -> Line<'_> {
    match &field.input {
        FieldInput::Numeric { value, .. } => {
            let value_display = if value.is_empty() {
                Span::styled(field.hint, NightTheme::text_muted())
            } else {
                Span::styled(value.as_str(), NightTheme::text())
            };
            Line::from(vec![
                Span::raw(" "),
                value_display,
                if is_selected {
                    Span::styled("▌", NightTheme::focused())
                } else {
                    Span::raw("")
                },
            ])
        }
        FieldInput::Choice { options, selected } => {
            let arrow_style = if is_selected {
                NightTheme::focused()
            } else {
                NightTheme::text_muted()
            };
            Line::from(vec![
                Span::raw(" "),
                Span::styled("‹ ", arrow_style),
                Span::styled(options[*selected], NightTheme::text()),
                Span::styled(" ›", arrow_style),
            ])
        }
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &ProfileFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", NightTheme::danger()),
            Span::styled(err.clone(), NightTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", NightTheme::key_hint()),
            Span::styled("Navigate ", NightTheme::key_desc()),
            Span::styled("[←→] ", NightTheme::key_hint()),
            Span::styled("Choose ", NightTheme::key_desc()),
            Span::styled("[Enter] ", NightTheme::key_hint()),
            Span::styled("Predict ", NightTheme::key_desc()),
            Span::styled("[S] ", NightTheme::key_hint()),
            Span::styled("Sample Data ", NightTheme::key_desc()),
            Span::styled("[Esc] ", NightTheme::key_hint()),
            Span::styled("Cancel", NightTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(NightTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_data_produces_example_profile() {
        let mut state = ProfileFormState::default();
        state.load_sample_data();

        let profile = state.to_profile().expect("Should parse");
        assert_eq!(profile.gender, Gender::Male);
        assert_eq!(profile.age, 29);
        assert_eq!(profile.occupation, Occupation::Doctor);
        assert_eq!(profile.bmi_category, BmiCategory::Overweight);
        assert_eq!(
            profile.encode(),
            [0.0, 29.0, 1.0, 6.5, 5.0, 40.0, 7.0, 2.0, 78.0, 4000.0, 130.0, 85.0]
        );
    }

    #[test]
    fn test_empty_form_rejected() {
        let state = ProfileFormState::default();
        let err = state.to_profile().expect_err("must fail");
        assert!(err.contains("Age"));
    }

    #[test]
    fn test_out_of_range_value_rejected_not_clamped() {
        let mut state = ProfileFormState::default();
        state.load_sample_data();
        if let FieldInput::Numeric { value, .. } = &mut state.fields[1].input {
            *value = "121".to_string();
        }

        let err = state.to_profile().expect_err("must fail");
        assert!(err.contains("between 1 and 120"));
    }

    #[test]
    fn test_fractional_integer_field_rejected() {
        let mut state = ProfileFormState::default();
        state.load_sample_data();
        if let FieldInput::Numeric { value, .. } = &mut state.fields[1].input {
            *value = "29.5".to_string();
        }

        let err = state.to_profile().expect_err("must fail");
        assert!(err.contains("whole number"));
    }

    #[test]
    fn test_choice_cycling_wraps() {
        let mut state = ProfileFormState::default();
        state.selected_field = 0; // gender

        state.cycle_next();
        state.cycle_next();
        let profile_field = &state.fields[0].input;
        if let FieldInput::Choice { selected, .. } = profile_field {
            assert_eq!(*selected, 0);
        } else {
            panic!("gender must be a choice field");
        }

        state.cycle_prev();
        if let FieldInput::Choice { selected, .. } = &state.fields[0].input {
            assert_eq!(*selected, 1);
        }
    }

    #[test]
    fn test_input_char_ignored_on_choice_fields() {
        let mut state = ProfileFormState::default();
        state.selected_field = 0; // gender
        state.input_char('5');
        assert!(matches!(
            state.fields[0].input,
            FieldInput::Choice { selected: 0, .. }
        ));
    }

    #[test]
    fn test_clear_sensitive_wipes_buffers() {
        let mut state = ProfileFormState::default();
        state.load_sample_data();
        state.selected_field = 3;
        state.error_message = Some("stale".to_string());

        state.clear_sensitive();

        assert_eq!(state.selected_field, 0);
        assert!(state.error_message.is_none());
        for field in &state.fields {
            match &field.input {
                FieldInput::Numeric { value, .. } => assert!(value.is_empty()),
                FieldInput::Choice { selected, .. } => assert_eq!(*selected, 0),
            }
        }
    }
}
