//! Error types for the formatting pipeline and its collaborators.
//!
//! Config, provider and history code report through `anyhow` with context,
//! the same way the CLI does; everything the formatter can raise is typed.

use thiserror::Error;

use crate::drawable::ItemKind;

/// A raw value could not be turned into a drawable item.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("{kind} expects a numeric value, got '{got}'")]
    NotNumeric { kind: ItemKind, got: String },

    #[error("{kind} expects a text value, got {got}")]
    NotLiteral { kind: ItemKind, got: f64 },

    #[error("{kind} cannot hold a non-finite value ({got})")]
    NonFinite { kind: ItemKind, got: f64 },

    #[error("Unknown weather icon '{0}'")]
    UnknownIcon(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    #[error("No color defined for icon '{0}'")]
    UnknownIcon(String),

    #[error("Cannot pick a color for non-finite temperature {0}")]
    NonFinite(f64),

    #[error("Palette does not handle {0} items")]
    Unsupported(ItemKind),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error(
        "No colorizer subscribed for {0}.\n\
         Hint: the startup wiring must subscribe a colorizer for every drawable item kind."
    )]
    Unregistered(ItemKind),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Failed to colorize weather item: {0}")]
    Palette(#[from] PaletteError),
}

#[derive(Debug, Error)]
pub enum CoordinatesError {
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}")]
    ExitStatus { command: String, status: std::process::ExitStatus },

    #[error("Location output is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("No {0} found in location output")]
    Missing(&'static str),

    #[error("Invalid {axis} value '{value}'")]
    Invalid { axis: &'static str, value: String },

    #[error("Invalid {axis} pattern: {source}")]
    Pattern {
        axis: &'static str,
        #[source]
        source: regex::Error,
    },
}
