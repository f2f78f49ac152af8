//! Classifier port: Trait for the pre-trained prediction model.
//!
//! The classifier is an opaque collaborator: any (feature vector ->
//! class index) function satisfying the trained decision boundary. The
//! application never sees model internals, only this trait.

use crate::domain::FeatureVector;

/// Errors from the classifier artifact.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// The artifact is missing at startup. Fatal: the process must not
    /// accept requests without a model.
    #[error("classifier artifact unavailable: {0}")]
    Unavailable(String),

    /// The artifact exists but is malformed or violates the encoding
    /// contract (wrong feature order, wrong labels, broken tree layout).
    #[error("invalid classifier artifact: {0}")]
    Artifact(String),

    /// The artifact's bytes do not match its integrity sidecar.
    #[error("classifier artifact checksum mismatch for {0}")]
    ChecksumMismatch(String),

    #[error("failed to read classifier artifact: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for the pre-fit classifier.
///
/// Implementations are immutable after construction and safe to share
/// across threads; inference has no mutable state.
pub trait Classifier: Send + Sync {
    /// Predict a class index for one encoded profile.
    ///
    /// The returned index is raw model output; decoding it against the
    /// label table (and rejecting unknown indices) is the caller's job.
    ///
    /// # Errors
    /// Returns `ClassifierError` if the artifact cannot serve the request.
    fn predict(&self, features: &FeatureVector) -> Result<usize, ClassifierError>;
}
