//! Terminal UI layer for the booking dashboard.
//!
//! Provides themes, chart presentation presets, bar/scatter chart and
//! selector components, the paged dashboard view, and the application event
//! loop built on top of [`ratatui`].

pub mod app;
pub mod components;
pub mod dashboard_view;
pub mod presentation;
pub mod themes;

pub use dash_core as core;
