//! Feature-encoding contract between the form schema and the classifier.
//!
//! The integer codes and the feature order below are exactly what the
//! deployed model was trained on. They are part of the deployment
//! contract, not an implementation detail: a model artifact trained
//! against a different order or code table must be refused at load time
//! (see `adapters::forest`), never reinterpreted.

use std::str::FromStr;

use crate::domain::profile::{BmiCategory, Gender, Occupation, UserProfile};

/// Version of the encoding tables. Bump when any code table or the
/// feature order changes, and retrain/re-export the model against it.
pub const ENCODING_VERSION: u32 = 1;

/// Number of features the classifier consumes.
pub const NUM_FEATURES: usize = 12;

/// Feature order the classifier was trained on. Load-bearing.
pub const FEATURE_NAMES: [&str; NUM_FEATURES] = [
    "gender",
    "age",
    "occupation",
    "sleep_duration",
    "quality_of_sleep",
    "physical_activity_level",
    "stress_level",
    "bmi_category",
    "heart_rate",
    "daily_steps",
    "systolic_bp",
    "diastolic_bp",
];

/// Ordered numeric input to the classifier, in `FEATURE_NAMES` order.
pub type FeatureVector = [f64; NUM_FEATURES];

/// Error for categorical text outside a declared encoding table.
///
/// Unreachable once a value has been parsed into its enum; the form layer
/// only offers declared values, so these fire on the text boundary only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("unknown gender: {0:?}")]
    UnknownGender(String),

    #[error("unknown occupation: {0:?}")]
    UnknownOccupation(String),

    #[error("unknown BMI category: {0:?}")]
    UnknownBmiCategory(String),
}

impl Gender {
    /// Integer code used by the classifier.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Gender::Male => 0,
            Gender::Female => 1,
        }
    }

    /// Inverse of [`Gender::code`].
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Gender::Male),
            1 => Some(Gender::Female),
            _ => None,
        }
    }

    /// Display label, as shown in the form and the training data.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl FromStr for Gender {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.label() == s)
            .ok_or_else(|| EncodingError::UnknownGender(s.to_string()))
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Occupation {
    /// Integer code used by the classifier.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Occupation::SoftwareEngineer => 0,
            Occupation::Doctor => 1,
            Occupation::SalesRepresentative => 2,
            Occupation::Teacher => 3,
            Occupation::Nurse => 4,
            Occupation::Engineer => 5,
            Occupation::Accountant => 6,
            Occupation::Scientist => 7,
            Occupation::Lawyer => 8,
            Occupation::Salesperson => 9,
            Occupation::Manager => 10,
        }
    }

    /// Inverse of [`Occupation::code`].
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.code() == code)
    }

    /// Display label, as shown in the form and the training data.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Occupation::SoftwareEngineer => "Software Engineer",
            Occupation::Doctor => "Doctor",
            Occupation::SalesRepresentative => "Sales Representative",
            Occupation::Teacher => "Teacher",
            Occupation::Nurse => "Nurse",
            Occupation::Engineer => "Engineer",
            Occupation::Accountant => "Accountant",
            Occupation::Scientist => "Scientist",
            Occupation::Lawyer => "Lawyer",
            Occupation::Salesperson => "Salesperson",
            Occupation::Manager => "Manager",
        }
    }
}

impl FromStr for Occupation {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.label() == s)
            .ok_or_else(|| EncodingError::UnknownOccupation(s.to_string()))
    }
}

impl std::fmt::Display for Occupation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl BmiCategory {
    /// Integer code used by the classifier.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            BmiCategory::Underweight => 0,
            BmiCategory::Normal => 1,
            BmiCategory::Overweight => 2,
            BmiCategory::Obese => 3,
        }
    }

    /// Inverse of [`BmiCategory::code`].
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(BmiCategory::Underweight),
            1 => Some(BmiCategory::Normal),
            2 => Some(BmiCategory::Overweight),
            3 => Some(BmiCategory::Obese),
            _ => None,
        }
    }

    /// Display label, as shown in the form and the training data.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl FromStr for BmiCategory {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.label() == s)
            .ok_or_else(|| EncodingError::UnknownBmiCategory(s.to_string()))
    }
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl UserProfile {
    /// Encode the profile into the classifier's feature vector.
    ///
    /// Categorical fields are replaced by their table codes, numeric
    /// fields pass through unchanged, in `FEATURE_NAMES` order.
    /// Deterministic and side-effect-free.
    #[must_use]
    pub fn encode(&self) -> FeatureVector {
        [
            f64::from(self.gender.code()),
            f64::from(self.age),
            f64::from(self.occupation.code()),
            self.sleep_duration,
            f64::from(self.quality_of_sleep),
            f64::from(self.physical_activity_level),
            f64::from(self.stress_level),
            f64::from(self.bmi_category.code()),
            f64::from(self.heart_rate),
            f64::from(self.daily_steps),
            f64::from(self.systolic_bp),
            f64::from(self.diastolic_bp),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_profile() -> UserProfile {
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
    fn test_encode_example_profile() {
        let vector = example_profile().encode();
        assert_eq!(
            vector,
            [0.0, 29.0, 1.0, 6.5, 5.0, 40.0, 7.0, 2.0, 78.0, 4000.0, 130.0, 85.0]
        );
    }

    #[test]
    fn test_encode_is_deterministic() {
        let profile = example_profile();
        assert_eq!(profile.encode(), profile.encode());
    }

    #[test]
    fn test_feature_order_contract() {
        assert_eq!(FEATURE_NAMES.len(), NUM_FEATURES);
        assert_eq!(FEATURE_NAMES[0], "gender");
        assert_eq!(FEATURE_NAMES[7], "bmi_category");
        assert_eq!(FEATURE_NAMES[11], "diastolic_bp");
    }

    #[test]
    fn test_gender_codes() {
        assert_eq!(Gender::Male.code(), 0);
        assert_eq!(Gender::Female.code(), 1);
    }

    #[test]
    fn test_bmi_codes() {
        assert_eq!(BmiCategory::Underweight.code(), 0);
        assert_eq!(BmiCategory::Normal.code(), 1);
        assert_eq!(BmiCategory::Overweight.code(), 2);
        assert_eq!(BmiCategory::Obese.code(), 3);
    }

    #[test]
    fn test_occupation_codes_are_dense() {
        for (expected, occupation) in Occupation::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(occupation.code()), expected);
        }
    }

    #[test]
    fn test_code_tables_are_bijective() {
        for gender in Gender::ALL {
            assert_eq!(Gender::from_code(gender.code()), Some(gender));
        }
        for occupation in Occupation::ALL {
            assert_eq!(Occupation::from_code(occupation.code()), Some(occupation));
        }
        for bmi in BmiCategory::ALL {
            assert_eq!(BmiCategory::from_code(bmi.code()), Some(bmi));
        }
        assert_eq!(Gender::from_code(2), None);
        assert_eq!(Occupation::from_code(11), None);
        assert_eq!(BmiCategory::from_code(4), None);
    }

    #[test]
    fn test_label_round_trips() {
        for gender in Gender::ALL {
            assert_eq!(gender.label().parse::<Gender>(), Ok(gender));
        }
        for occupation in Occupation::ALL {
            assert_eq!(occupation.label().parse::<Occupation>(), Ok(occupation));
        }
        for bmi in BmiCategory::ALL {
            assert_eq!(bmi.label().parse::<BmiCategory>(), Ok(bmi));
        }
    }

    #[test]
    fn test_unknown_labels_rejected() {
        assert_eq!(
            "Other".parse::<Gender>(),
            Err(EncodingError::UnknownGender("Other".to_string()))
        );
        assert_eq!(
            "Pilot".parse::<Occupation>(),
            Err(EncodingError::UnknownOccupation("Pilot".to_string()))
        );
        assert_eq!(
            "Athletic".parse::<BmiCategory>(),
            Err(EncodingError::UnknownBmiCategory("Athletic".to_string()))
        );
    }
}
