//! Rusty Reclaim - find reclaimable disk space on a Linux workstation
//!
//! This crate provides functionality for:
//! - Measuring directory sizes with timeouts and exclusion rules
//! - Classifying caches, logs, VM images and toolchain leftovers
//! - Background scans with progress reporting
//! - Filtering, sorting and safely trashing the results
//! - Interactive TUI over all of the above

pub mod actions;
pub mod classifier;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod paths;
pub mod scanner;
pub mod tui;
pub mod view;

// Re-export commonly used types
pub use config::Config;
pub use error::{ReclaimError, Result};
