//! Application layer: Use cases orchestrating domain and ports.

mod prediction;

pub use prediction::PredictionService;
