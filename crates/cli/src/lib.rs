//! CLI utilities for the Chrome Web Store tools
//!
//! Provides shared CLI functionality:
//! - Status messages and labelled fields
//! - Error rendering with recovery suggestions
//! - Spinners for long-running requests

#![warn(missing_docs)]

pub mod output;
pub mod progress;
