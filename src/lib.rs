//! Toolhub - a command-line dispatcher for plug-in tools

pub mod config;
pub mod dispatch;
pub mod error;
pub mod plugins;
pub mod tools;
pub mod utils;

pub use config::{Config, ProgramInfo};
pub use dispatch::Hub;
pub use error::{HubError, Result};
