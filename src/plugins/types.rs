//! Plugin types for Toolhub
//!
//! This module defines the types used by the plugin system: manifest
//! structures for parsing `package.json` files, the runtime package
//! representation handed out by a package environment, and the immutable
//! tool descriptor stored in the registry.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::tools::{Tool, ToolFactory};

use super::entry::ParsedEntry;

/// Entry-point namespace holding tool plug-ins.
pub const PLUGIN_NAMESPACE: &str = "toolhub.plugins";

/// The manifest loaded from a package's `package.json` file.
///
/// # Example
///
/// ```json
/// {
///   "name": "Blank",
///   "version": "0.1",
///   "description": "A tool that does nothing",
///   "requires": ["toolhub>=0.5"],
///   "entry_points": {
///     "toolhub.plugins": [
///       { "entry": "Blank blank bl", "target": "blank:Blank" }
///     ]
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageManifest {
    /// Package name, unique within an environment.
    pub name: String,

    /// Version string (e.g., "0.1", "1.2.0").
    pub version: String,

    /// Human-readable description of the package.
    #[serde(default)]
    pub description: Option<String>,

    /// Requirement specifiers (`name` or `name>=version`) that must be
    /// satisfied before any of the package's entries can be resolved.
    #[serde(default)]
    pub requires: Vec<String>,

    /// Entry points grouped by namespace.
    #[serde(default)]
    pub entry_points: BTreeMap<String, Vec<EntryPoint>>,
}

/// A declared entry point: a whitespace-separated declaration
/// (`<tool name> <subcommand> [alias...]`) and the target implementing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPoint {
    /// Left-hand side: tool name followed by its subcommands.
    pub entry: String,

    /// Target string looked up in the factory table.
    pub target: String,
}

impl EntryPoint {
    pub fn new(entry: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            entry: entry.into(),
            target: target.into(),
        }
    }
}

/// Identity and install location of a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    /// Directory the package is installed in.
    pub location: PathBuf,
}

/// An installed package, as listed by a package environment.
#[derive(Debug, Clone)]
pub struct Package {
    /// The parsed package manifest.
    pub manifest: PackageManifest,

    /// The directory the package was found in.
    pub location: PathBuf,
}

impl Package {
    /// Create a package from a manifest and its directory.
    pub fn new(manifest: PackageManifest, location: PathBuf) -> Self {
        Self { manifest, location }
    }

    /// Get the package name from its manifest.
    pub fn name(&self) -> &str {
        &self.manifest.name
    }

    /// Get the package version from its manifest.
    pub fn version(&self) -> &str {
        &self.manifest.version
    }

    /// Entry points declared in `namespace`, in declaration order.
    pub fn entry_map(&self, namespace: &str) -> &[EntryPoint] {
        self.manifest
            .entry_points
            .get(namespace)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Snapshot of the package's identity for descriptors.
    pub fn info(&self) -> PackageInfo {
        PackageInfo {
            name: self.manifest.name.clone(),
            version: self.manifest.version.clone(),
            location: self.location.clone(),
        }
    }
}

/// The registry's immutable record of a tool.
///
/// The primary subcommand comes first and aliases follow in declaration
/// order. The registry only accepts descriptors with at least one
/// subcommand.
#[derive(Clone)]
pub struct ToolDescriptor {
    name: String,
    subcommands: Vec<String>,
    is_builtin: bool,
    factory: ToolFactory,
    package: Option<PackageInfo>,
}

impl ToolDescriptor {
    /// Build a descriptor from a parsed entry declaration.
    pub fn from_entry(
        entry: ParsedEntry,
        is_builtin: bool,
        factory: ToolFactory,
        package: Option<PackageInfo>,
    ) -> Self {
        let ParsedEntry { name, subcommands } = entry;
        Self {
            name,
            subcommands,
            is_builtin,
            factory,
            package,
        }
    }

    /// Tool name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The subcommand the tool is listed under. Empty only for descriptors
    /// the registry refuses.
    pub fn primary_subcommand(&self) -> &str {
        self.subcommands.first().map_or("", String::as_str)
    }

    /// Aliases of the primary subcommand.
    pub fn alt_subcommands(&self) -> &[String] {
        self.subcommands.get(1..).unwrap_or(&[])
    }

    /// Primary subcommand followed by the aliases.
    pub fn subcommands(&self) -> &[String] {
        &self.subcommands
    }

    /// Whether the tool ships with the core program.
    pub fn is_builtin(&self) -> bool {
        self.is_builtin
    }

    /// The package providing the tool, if known.
    pub fn package(&self) -> Option<&PackageInfo> {
        self.package.as_ref()
    }

    /// `primary` or `primary (alt1, alt2, ...)`.
    pub fn full_command(&self) -> String {
        format_full_command(&self.subcommands)
    }

    /// Create a fresh tool instance.
    pub fn instantiate(&self) -> Box<dyn Tool> {
        (self.factory)()
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("subcommands", &self.subcommands)
            .field("is_builtin", &self.is_builtin)
            .field("package", &self.package)
            .finish_non_exhaustive()
    }
}

/// Format a subcommand tuple as `primary` or `primary (alt1, alt2, ...)`.
pub fn format_full_command(subcommands: &[String]) -> String {
    match subcommands.split_first() {
        Some((primary, [])) => primary.clone(),
        Some((primary, alts)) => format!("{} ({})", primary, alts.join(", ")),
        None => String::new(),
    }
}
