//! Core utilities for the Chrome Web Store tools
//!
//! - **Error handling**: coded errors with context, recovery suggestions and
//!   exit statuses
//! - **Configuration**: TOML configuration file discovery and parsing
//!
//! # Example
//!
//! ```rust,no_run
//! use cws_core::config::Config;
//!
//! let config = Config::load(None)?;
//! if let Some(item_id) = config.schema.item.item_id {
//!     println!("Default item: {item_id}");
//! }
//! # Ok::<(), cws_core::Error>(())
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
}
