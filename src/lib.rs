//! favpack - Library for generating favicon packages
//!
//! This library provides functionality to:
//! - Render a raster or SVG source image to every favicon size a site needs
//! - Pack the baseline sizes into a multi-resolution `favicon.ico`
//! - Write `manifest.json`, `browserconfig.xml` and an example HTML head
//! - Bundle everything into a single zip archive
//!
//! The pipeline entry point is [`archive::generate`].

pub mod archive;
pub mod catalog;
pub mod cli;
pub mod color;
pub mod config;
pub mod descriptors;
pub mod ico;
pub mod logging;
pub mod models;
pub mod output;
pub mod renderer;
pub mod svg;
pub mod validate;
