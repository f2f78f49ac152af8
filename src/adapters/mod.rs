//! Adapters layer: Concrete implementations of ports.
//!
//! - `forest`: random-forest artifact loader and inference

pub mod forest;

pub use forest::ForestClassifier;
