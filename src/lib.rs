//! Chathead - player head avatars as colored chat lines
//!
//! Fetches square avatar rasters from a remote provider, caches them on
//! disk and renders them as sequences of colored block glyphs with optional
//! overlay message text.

pub mod cache;
pub mod cli;
pub mod config;
pub mod delivery;
pub mod error;
pub mod pipeline;
pub mod provider;
pub mod raster;
pub mod style;

pub use error::{ChatheadError, ChatheadResult};
