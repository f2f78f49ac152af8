//! User profile types for sleep disorder screening.
//!
//! Field schema matches the dataset the deployed classifier was trained on
//! (Sleep Health and Lifestyle survey attributes).

use serde::{Deserialize, Serialize};

/// Gender of the screened user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// All declared values, in encoding-table order.
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];
}

/// Occupation, restricted to the categories present in the training data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Occupation {
    SoftwareEngineer,
    Doctor,
    SalesRepresentative,
    Teacher,
    Nurse,
    Engineer,
    Accountant,
    Scientist,
    Lawyer,
    Salesperson,
    Manager,
}

impl Occupation {
    /// All declared values, in encoding-table order.
    pub const ALL: [Occupation; 11] = [
        Occupation::SoftwareEngineer,
        Occupation::Doctor,
        Occupation::SalesRepresentative,
        Occupation::Teacher,
        Occupation::Nurse,
        Occupation::Engineer,
        Occupation::Accountant,
        Occupation::Scientist,
        Occupation::Lawyer,
        Occupation::Salesperson,
        Occupation::Manager,
    ];
}

/// BMI category. The training data uses the category, not the raw index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// All declared values, in encoding-table order.
    pub const ALL: [BmiCategory; 4] = [
        BmiCategory::Underweight,
        BmiCategory::Normal,
        BmiCategory::Overweight,
        BmiCategory::Obese,
    ];
}

/// Raw screening input from the TUI. One per form submission, dropped
/// as soon as a prediction has been produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub gender: Gender,

    /// Age in years (1-120)
    pub age: u32,

    pub occupation: Occupation,

    /// Average daily sleep duration in hours (0.0-24.0)
    pub sleep_duration: f64,

    /// Self-rated sleep quality (1 = poor, 10 = excellent)
    pub quality_of_sleep: u8,

    /// Self-rated daily physical activity (1 = low, 100 = high)
    pub physical_activity_level: u8,

    /// Self-rated stress (1 = low, 10 = high)
    pub stress_level: u8,

    pub bmi_category: BmiCategory,

    /// Resting heart rate in bpm (30-200)
    pub heart_rate: u32,

    /// Average daily step count (0-50000)
    pub daily_steps: u32,

    /// Systolic blood pressure in mmHg (50-250)
    pub systolic_bp: u32,

    /// Diastolic blood pressure in mmHg (30-150)
    pub diastolic_bp: u32,
}

impl UserProfile {
    /// Validate that all numeric fields are within their declared ranges.
    ///
    /// Categorical fields are closed enums and need no check here; the
    /// form layer already rejects out-of-range input, so this is the
    /// defensive boundary in front of the encoder.
    ///
    /// # Errors
    /// Returns all violations as a vector of strings.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !(1..=120).contains(&self.age) {
            errors.push(format!("Age {} out of range [1, 120]", self.age));
        }
        if !(0.0..=24.0).contains(&self.sleep_duration) {
            errors.push(format!(
                "Sleep duration {} out of range [0, 24]",
                self.sleep_duration
            ));
        }
        if !(1..=10).contains(&self.quality_of_sleep) {
            errors.push(format!(
                "Quality of sleep {} out of range [1, 10]",
                self.quality_of_sleep
            ));
        }
        if !(1..=100).contains(&self.physical_activity_level) {
            errors.push(format!(
                "Physical activity level {} out of range [1, 100]",
                self.physical_activity_level
            ));
        }
        if !(1..=10).contains(&self.stress_level) {
            errors.push(format!(
                "Stress level {} out of range [1, 10]",
                self.stress_level
            ));
        }
        if !(30..=200).contains(&self.heart_rate) {
            errors.push(format!(
                "Heart rate {} out of range [30, 200]",
                self.heart_rate
            ));
        }
        if self.daily_steps > 50_000 {
            errors.push(format!(
                "Daily steps {} out of range [0, 50000]",
                self.daily_steps
            ));
        }
        if !(50..=250).contains(&self.systolic_bp) {
            errors.push(format!(
                "Systolic BP {} out of range [50, 250]",
                self.systolic_bp
            ));
        }
        if !(30..=150).contains(&self.diastolic_bp) {
            errors.push(format!(
                "Diastolic BP {} out of range [30, 150]",
                self.diastolic_bp
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_profile() -> UserProfile {
        UserProfile {
            gender: Gender::Male,
            age: 29,
            occupation: Occupation::Doctor,
            sleep_duration: 6.5,
            quality_of_sleep: 5,
            physical_activity_level: 40,
            stress_level: 7,
            bmi_category: BmiCategory::Overweight,
            heart_rate: 78,
            daily_steps: 4000,
            systolic_bp: 130,
            diastolic_bp: 85,
        }
    }

    #[test]
    fn test_valid_profile_passes() {
        assert!(valid_profile().validate().is_ok());
    }

    #[test]
    fn test_age_boundaries() {
        let mut profile = valid_profile();

        profile.age = 1;
        assert!(profile.validate().is_ok());
        profile.age = 120;
        assert!(profile.validate().is_ok());

        profile.age = 0;
        assert!(profile.validate().is_err());
        profile.age = 121;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_all_violations_reported() {
        let mut profile = valid_profile();
        profile.age = 0;
        profile.heart_rate = 10;
        profile.daily_steps = 60_000;

        let errors = profile.validate().expect_err("Should fail");
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_sleep_duration_bounds() {
        let mut profile = valid_profile();
        profile.sleep_duration = 0.0;
        assert!(profile.validate().is_ok());
        profile.sleep_duration = 24.0;
        assert!(profile.validate().is_ok());
        profile.sleep_duration = 24.1;
        assert!(profile.validate().is_err());
        profile.sleep_duration = -0.5;
        assert!(profile.validate().is_err());
    }
}
