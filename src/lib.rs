//! # Somnoscan
//!
//! Terminal screening tool for sleep disorders backed by a pre-trained
//! classifier.
//!
//! This crate provides:
//! - A typed 12-field health/lifestyle profile with range validation
//! - A fixed feature-encoding contract matching the deployed model
//! - Single-call inference against a forest artifact loaded at startup
//! - Terminal UI for local-only use
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (UserProfile, encoding tables, SleepDisorder)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (forest artifact loader)
//! - `application`: The prediction pipeline orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{Prediction, SleepDisorder, UserProfile};

/// Result type for Somnoscan operations
pub type Result<T> = std::result::Result<T, SomnoscanError>;

/// Main error type for Somnoscan
#[derive(Debug, thiserror::Error)]
pub enum SomnoscanError {
    #[error("Invalid profile data: {0}")]
    Validation(String),

    #[error("Feature encoding failed: {0}")]
    Encoding(#[from] domain::EncodingError),

    #[error("Classifier error: {0}")]
    Classifier(#[from] ports::ClassifierError),

    #[error("Classifier returned class index {0} outside the deployed label set")]
    UnknownClass(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
