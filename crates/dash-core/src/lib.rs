//! Core domain types for the hotel booking dashboard.
//!
//! Holds the booking record and loyalty bucket definitions, the shared error
//! type, CLI settings, and number formatting helpers used by the data and UI
//! layers.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
