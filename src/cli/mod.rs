//! CLI module for rendering pose-sequence artifacts.
//!
//! This module contains the command-line interface logic, including argument
//! parsing and the `render` command implementation.

// Modules
/// CLI arguments.
pub mod args;

/// Terminal logging macros and verbosity flag.
pub mod logging;

/// Render command logic.
pub mod render;
