//! Launch records dashboard.
//!
//! The interesting part is small and pure: [`engine::compute`] maps a loaded
//! [`data::model::Dataset`] and a [`data::selection::Selection`] to an outcome
//! distribution and a payload/outcome correlation. Everything else loads the
//! table, collects the selection from egui widgets and draws the results.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod state;
pub mod ui;
