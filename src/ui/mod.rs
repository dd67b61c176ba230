//! Rendering only: widgets read and write [`AppState`](crate::state::AppState)
//! and never touch the engine directly.

pub mod charts;
pub mod panels;
