//! Error types for morphfield.
//!
//! Ticking the field never fails. The only fallible surfaces are loading
//! configuration and strict parsing of shape, scheme and color identifiers.

use std::io;
use thiserror::Error;

/// Errors that can occur while loading or validating a [`Config`](crate::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("Failed to read config file: {0}")]
    Io(#[from] io::Error),

    /// The config file is not valid JSON for this schema.
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A particle field with no particles cannot morph.
    #[error("particle_count must be at least 1")]
    NoParticles,

    /// The configured base color could not be parsed.
    #[error("Invalid base color: {0}")]
    Color(#[from] ColorError),
}

/// Returned by the strict `FromStr` impl of [`Shape`](crate::Shape).
///
/// The field itself never surfaces this: [`Shape::from_id`](crate::Shape::from_id)
/// falls back to the cube distribution instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("Unknown shape id '{0}'")]
    Unknown(String),
}

/// Errors from parsing color schemes and hex colors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Scheme id is not one of `single`, `rainbow`, `gradient-y`, `tornado-special`.
    #[error("Unknown color scheme '{0}'")]
    UnknownScheme(String),

    /// Not a `#rrggbb` hex color.
    #[error("Expected a #rrggbb color, got '{0}'")]
    InvalidHex(String),
}
