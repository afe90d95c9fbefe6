//! Configuration module for favpack
//!
//! Provides types, discovery and loading for `favpack.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
