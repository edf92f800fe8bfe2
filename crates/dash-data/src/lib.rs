//! Data layer for the booking dashboard.
//!
//! Loads the processed booking CSV into an immutable [`dataset::Dataset`],
//! runs the filter/aggregate/bin pipeline over it, and assembles the chart
//! specifications a renderer needs for one selection.

pub mod dashboard;
pub mod dataset;
pub mod pipeline;
pub mod reader;

pub use dash_core as core;
