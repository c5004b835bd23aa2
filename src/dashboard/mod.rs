//! Dashboard UI Module
//!
//! Vault browser, OCR commands, the result panel and the settings form.

pub mod app;
pub mod clipboard;
pub mod components;
pub mod state;
pub mod theme;
pub mod views;

pub use app::run_dashboard;
