//! Entry declaration parsing.
//!
//! An entry declaration is the left-hand side of an entry point: the tool
//! name followed by its subcommands, separated by whitespace. The first
//! subcommand is the primary one, the rest are aliases.

use thiserror::Error;

/// Why an entry declaration cannot be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// The declaration is blank.
    #[error("unnamed plug-in, cannot load")]
    Unnamed,

    /// The declaration names a tool but gives it no subcommand.
    #[error("'{0}' plug-in, no subcommands, cannot load")]
    NoSubcommands(String),
}

/// A well-formed entry declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    /// Tool name.
    pub name: String,
    /// Primary subcommand followed by aliases; never empty.
    pub subcommands: Vec<String>,
}

/// Parse an entry declaration such as `"Help help h ?"`.
pub fn parse_entry(declaration: &str) -> Result<ParsedEntry, EntryError> {
    let mut tokens = declaration.split_whitespace();
    let name = tokens.next().ok_or(EntryError::Unnamed)?;
    let subcommands: Vec<String> = tokens.map(str::to_string).collect();
    if subcommands.is_empty() {
        return Err(EntryError::NoSubcommands(name.to_string()));
    }
    Ok(ParsedEntry {
        name: name.to_string(),
        subcommands,
    })
}
