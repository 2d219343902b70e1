//! Plugin system for Toolhub
//!
//! Tools reach the command line through packages. Each package declares
//! entry points in the `toolhub.plugins` namespace of its `package.json`
//! manifest; an entry point pairs a declaration (`<Tool> <subcommand>
//! [alias...]`) with the target of a linked-in tool. Discovery walks a
//! package environment, resolves every entry and registers the resulting
//! tools under their subcommands.
//!
//! # Architecture
//!
//! - **entry**: Entry declaration parsing (`ParsedEntry`, `EntryError`)
//! - **types**: Manifest and package types, the `ToolDescriptor`
//! - **environment**: Package environments and requirement checks
//! - **loader**: Discovery of tools across an environment (`discover`)
//! - **registry**: Tool registration with conflict detection
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use toolhub::config::ProgramInfo;
//! use toolhub::plugins::{discover, DirectoryEnvironment, DiscoveryOptions};
//! use toolhub::tools::FactoryTable;
//!
//! let dirs = vec![PathBuf::from("/home/user/.toolhub/packages")];
//! let mut env = DirectoryEnvironment::new(&ProgramInfo::default(), &dirs, FactoryTable::with_builtins());
//! let discovery = discover(&mut env, &DiscoveryOptions::default());
//!
//! print!("{}", discovery.registry.format_subcommand_listing());
//! ```

pub mod entry;
pub mod environment;
mod loader;
pub mod registry;
pub mod types;

pub use entry::{parse_entry, EntryError, ParsedEntry};
pub use environment::{
    compare_versions, core_package, load_package, scan_packages, DirectoryEnvironment,
    PackageEnvironment, Requirement, ResolveError, MANIFEST_FILE,
};
pub use loader::{discover, Discovery, DiscoveryOptions, LoadEvent, LoadReport, PackageLoad};
pub use registry::{Registry, RegistryBuilder};
pub use types::{
    format_full_command, EntryPoint, Package, PackageInfo, PackageManifest, ToolDescriptor,
    PLUGIN_NAMESPACE,
};
