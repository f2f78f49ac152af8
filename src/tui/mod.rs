//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides a night-themed interface for:
//! - Dashboard with model status
//! - Profile data input
//! - Screening result display

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::NightTheme;
