//! Configuration loading and schema definitions
//!
//! The `cws` configuration file is TOML with `[credentials]`, `[item]` and
//! `[api]` tables.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
