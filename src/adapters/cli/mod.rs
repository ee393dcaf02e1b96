//! CLI Adapter
//!
//! Command-line surface for driving the analysis pipeline.

pub mod commands;

pub use commands::{AnalyzeCmd, CliApp, Command, WatchCmd};
