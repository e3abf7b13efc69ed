//! Error types.
//!
//! Only recoverable input errors live here. Broken wiring (a cycle between
//! slots) is a programming error and is never reported through this type.

use thiserror::Error;

/// Errors produced while parsing configuration or building view content.
#[derive(Debug, Error)]
pub enum Error {
    /// An alignment name that is not one of the four defined for its axis.
    #[error("unknown {axis} alignment `{value}`")]
    UnknownAlign { axis: &'static str, value: String },

    /// An alignment code outside 1..=4.
    #[error("alignment code {code} is out of range for {axis} alignment (expected 1..=4)")]
    AlignOutOfRange { axis: &'static str, code: u8 },

    /// A color string that is not `#rgb`, `#rrggbb` or `#rrggbbaa`.
    #[error("invalid color `{0}`")]
    InvalidColor(String),

    /// An image buffer whose pixel count does not match its dimensions.
    #[error("image is {width}x{height} but carries {actual} pixels")]
    ImageSize { width: u32, height: u32, actual: usize },

    /// A style document that could not be parsed.
    #[error("invalid view style: {0}")]
    Style(#[from] toml::de::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
