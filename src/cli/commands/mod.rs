//! CLI command implementations

pub mod config;
pub mod render;

pub use config::execute as config;
pub use render::execute as render;
