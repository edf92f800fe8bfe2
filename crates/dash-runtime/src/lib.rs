//! Runtime layer for the booking dashboard.
//!
//! Owns the loaded dataset handle and the viewer's current selection, and
//! rebuilds the dashboard snapshot whenever the selection changes.

pub mod session;

pub use dash_core as core;
pub use dash_data as data;
