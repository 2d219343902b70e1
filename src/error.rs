//! Error types for Toolhub
//!
//! This module defines the error types shared by the registry, the dispatcher
//! and the builtin tools. Uses `thiserror` for ergonomic error handling with
//! automatic `Display` and `Error` trait implementations.
//!
//! Conflict messages are stored already wrapped to the display width so they
//! can be printed as-is by whoever catches them.

use thiserror::Error;

use crate::plugins::EntryError;
use crate::utils::text::fill;

/// The primary error type for Toolhub operations.
#[derive(Error, Debug)]
pub enum HubError {
    /// No subcommand was given on the command line.
    #[error("No subcommand provided.")]
    NoSubcommand,

    /// A subcommand that no registered tool answers to.
    #[error("{0}")]
    UnknownSubcommand(String),

    /// One of the subcommands of a tool being registered is already taken.
    #[error("{message}")]
    SubcommandConflict {
        subcommand: String,
        plugin: String,
        message: String,
    },

    /// A tool with the same name is already registered.
    #[error("{message}")]
    NameConflict {
        name: String,
        subcommand: String,
        message: String,
    },

    /// A tool declaration the registry cannot accept.
    #[error("{0}")]
    InvalidEntry(#[from] EntryError),

    /// A tool failed while running. `prewrapped` messages are printed verbatim.
    #[error("{message}")]
    Tool { message: String, prewrapped: bool },

    /// An unrecognized global option.
    #[error("{0}")]
    InvalidOption(String),

    /// Configuration-related errors (unreadable config, invalid manifest, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Standard I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HubError {
    /// Subcommand conflict raised while registering `plugin`.
    pub fn subcommand_conflict(subcommand: &str, plugin: &str) -> Self {
        Self::SubcommandConflict {
            subcommand: subcommand.to_string(),
            plugin: plugin.to_string(),
            message: fill(&format!(
                "WARNING: subcommand conflict with command '{}'; not loading {} plugin.",
                subcommand, plugin
            )),
        }
    }

    /// Name conflict raised while registering the tool `name`, whose first
    /// subcommand is `subcommand`.
    pub fn name_conflict(name: &str, subcommand: &str) -> Self {
        Self::NameConflict {
            name: name.to_string(),
            subcommand: subcommand.to_string(),
            message: fill(&format!(
                "WARNING: name conflict with tool '{}' (subcommand '{}'); not loading {} plugin.",
                name, subcommand, name
            )),
        }
    }

    /// A tool error whose message still needs wrapping before display.
    pub fn tool(message: impl Into<String>) -> Self {
        Self::Tool {
            message: message.into(),
            prewrapped: false,
        }
    }

    /// A tool error whose message is already fully formatted.
    pub fn tool_prewrapped(message: impl Into<String>) -> Self {
        Self::Tool {
            message: message.into(),
            prewrapped: true,
        }
    }

    /// Whether this error came out of registry conflict detection.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::SubcommandConflict { .. } | Self::NameConflict { .. }
        )
    }
}

/// A specialized `Result` type for Toolhub operations.
pub type Result<T> = std::result::Result<T, HubError>;
