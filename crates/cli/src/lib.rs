//! Driver for the feature-graph linkers.
//! Loads compilation units, runs the configured passes and reports what
//! was linked.

pub mod args;
pub mod bundle;
pub mod config;
pub mod link;
pub mod output;
pub mod ui;
