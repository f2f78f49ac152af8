//! Prediction result types.
//!
//! Maps the classifier's class index to a human-readable label.

use serde::{Deserialize, Serialize};

/// Sleep disorder label produced by the classifier.
///
/// The discriminants follow the class indices the model was trained
/// with; like the feature order, this mapping is part of the
/// deployment contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SleepDisorder {
    /// Class 0
    Insomnia,
    /// Class 1
    SleepApnea,
    /// Class 2: no significant disorder detected
    None,
}

impl SleepDisorder {
    /// All labels, in class-index order.
    pub const ALL: [SleepDisorder; 3] = [
        SleepDisorder::Insomnia,
        SleepDisorder::SleepApnea,
        SleepDisorder::None,
    ];

    /// Decode a classifier output. Returns `None` for any index outside
    /// the deployed label set; callers must treat that as a deployment
    /// mismatch, never as a default diagnosis.
    #[must_use]
    pub const fn from_class_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(SleepDisorder::Insomnia),
            1 => Some(SleepDisorder::SleepApnea),
            2 => Some(SleepDisorder::None),
            _ => None,
        }
    }

    /// Inverse of [`SleepDisorder::from_class_index`].
    #[must_use]
    pub const fn class_index(self) -> usize {
        match self {
            SleepDisorder::Insomnia => 0,
            SleepDisorder::SleepApnea => 1,
            SleepDisorder::None => 2,
        }
    }

    /// Display label matching the training data.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            SleepDisorder::Insomnia => "Insomnia",
            SleepDisorder::SleepApnea => "Sleep Apnea",
            SleepDisorder::None => "None",
        }
    }

    /// Fixed one-line explanation shown with the result.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            SleepDisorder::Insomnia => "Difficulty falling or staying asleep",
            SleepDisorder::SleepApnea => "Breathing interruptions during sleep",
            SleepDisorder::None => "No significant sleep disorder detected",
        }
    }

    /// Associated color for TUI display (RGB).
    #[must_use]
    pub const fn color(self) -> (u8, u8, u8) {
        match self {
            SleepDisorder::Insomnia => (251, 191, 36), // Amber (#FBBF24)
            SleepDisorder::SleepApnea => (244, 63, 94), // Rose (#F43F5E)
            SleepDisorder::None => (16, 185, 129),     // Emerald (#10B981)
        }
    }
}

impl std::fmt::Display for SleepDisorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A completed screening result. Ephemeral: rendered once, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// The decoded label
    pub disorder: SleepDisorder,

    /// Timestamp of the screening
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Prediction {
    /// Create a new prediction stamped with the current time.
    #[must_use]
    pub fn new(disorder: SleepDisorder) -> Self {
        Self {
            disorder,
            created_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_is_total_on_deployed_classes() {
        assert_eq!(
            SleepDisorder::from_class_index(0),
            Some(SleepDisorder::Insomnia)
        );
        assert_eq!(
            SleepDisorder::from_class_index(1),
            Some(SleepDisorder::SleepApnea)
        );
        assert_eq!(SleepDisorder::from_class_index(2), Some(SleepDisorder::None));
    }

    #[test]
    fn test_decode_rejects_out_of_range_indices() {
        assert_eq!(SleepDisorder::from_class_index(3), None);
        assert_eq!(SleepDisorder::from_class_index(7), None);
        assert_eq!(SleepDisorder::from_class_index(usize::MAX), None);
    }

    #[test]
    fn test_class_index_round_trip() {
        for disorder in SleepDisorder::ALL {
            assert_eq!(
                SleepDisorder::from_class_index(disorder.class_index()),
                Some(disorder)
            );
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(SleepDisorder::Insomnia.label(), "Insomnia");
        assert_eq!(SleepDisorder::SleepApnea.label(), "Sleep Apnea");
        assert_eq!(SleepDisorder::None.label(), "None");
    }

    #[test]
    fn test_prediction_creation() {
        let prediction = Prediction::new(SleepDisorder::SleepApnea);
        assert_eq!(prediction.disorder, SleepDisorder::SleepApnea);
    }
}
