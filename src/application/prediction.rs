//! Prediction service: the screening pipeline.
//!
//! One synchronous pass per submission:
//! validate -> encode -> predict -> decode.
//! No retries, no partial state, no memory across requests.

use std::sync::Arc;

use crate::domain::{Prediction, SleepDisorder, UserProfile};
use crate::ports::Classifier;
use crate::{Result, SomnoscanError};

/// Service for running one screening prediction.
///
/// Holds an immutable handle to the pre-loaded classifier; the handle
/// is created once at startup (composition root) and injected here so
/// the pipeline stays pure and testable.
pub struct PredictionService<C>
where
    C: Classifier,
{
    classifier: Arc<C>,
}

impl<C> PredictionService<C>
where
    C: Classifier,
{
    /// Create a new prediction service.
    pub fn new(classifier: Arc<C>) -> Self {
        Self { classifier }
    }

    /// Run the full pipeline on one profile.
    ///
    /// # Errors
    /// - `SomnoscanError::Validation` if a field is out of range
    /// - `SomnoscanError::Classifier` if the artifact cannot serve
    /// - `SomnoscanError::UnknownClass` if the model emits an index
    ///   outside the deployed label set
    pub fn predict(&self, profile: &UserProfile) -> Result<Prediction> {
        profile
            .validate()
            .map_err(|errors| SomnoscanError::Validation(errors.join(", ")))?;

        let features = profile.encode();
        tracing::debug!("Encoded profile into {} features", features.len());

        let class_index = self.classifier.predict(&features)?;

        let disorder = match SleepDisorder::from_class_index(class_index) {
            Some(disorder) => disorder,
            None => {
                // Deployment mismatch between the encoding contract and
                // the model artifact. Never rendered as a diagnosis.
                tracing::error!(
                    "Classifier returned class index {} outside the deployed label set",
                    class_index
                );
                return Err(SomnoscanError::UnknownClass(class_index));
            }
        };

        tracing::info!("Screening complete: {}", disorder);

        Ok(Prediction::new(disorder))
    }
}
