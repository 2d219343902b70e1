//! Tool registry for Toolhub
//!
//! This module provides [`RegistryBuilder`], which accepts tool descriptors
//! one at a time while applying the conflict policy, and the immutable
//! [`Registry`] it produces. The registry maps every subcommand and every
//! tool name to the tool's descriptor and keeps a sorted list of subcommand
//! tuples for listing.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::error::{HubError, Result};

use super::entry::EntryError;
use super::types::{format_full_command, ToolDescriptor};

/// Accumulates descriptors for a [`Registry`].
///
/// Each [`add`](RegistryBuilder::add) either registers the tool under its
/// name and all of its subcommands, or fails and leaves the builder
/// untouched.
///
/// # Example
///
/// ```rust
/// use toolhub::plugins::{parse_entry, RegistryBuilder, ToolDescriptor};
/// use toolhub::tools::{FactoryTable, HELP_TARGET};
///
/// let factory = FactoryTable::with_builtins().get(HELP_TARGET).unwrap();
/// let entry = parse_entry("Help help h ?").unwrap();
///
/// let mut builder = RegistryBuilder::new();
/// builder.add(ToolDescriptor::from_entry(entry, true, factory, None)).unwrap();
/// let registry = builder.build();
///
/// assert!(registry.has_tool_by_subcommand("h"));
/// assert_eq!(registry.format_subcommand_listing(), "   help (h, ?)\n");
/// ```
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    /// Map from subcommand (primary or alias) to descriptor.
    by_subcommand: HashMap<String, Arc<ToolDescriptor>>,

    /// Map from tool name to descriptor.
    by_name: HashMap<String, Arc<ToolDescriptor>>,

    /// Subcommand tuples in registration order.
    tuples: Vec<Vec<String>>,
}

impl RegistryBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool.
    ///
    /// # Errors
    /// - `HubError::InvalidEntry` if the tool has no subcommand.
    /// - `HubError::SubcommandConflict` if any of the tool's subcommands is
    ///   already registered. The error names the first colliding subcommand.
    /// - `HubError::NameConflict` if a tool with the same name is already
    ///   registered.
    ///
    /// In every case nothing is registered.
    pub fn add(&mut self, descriptor: ToolDescriptor) -> Result<()> {
        if descriptor.subcommands().is_empty() {
            return Err(EntryError::NoSubcommands(descriptor.name().to_string()).into());
        }

        if let Some(taken) = descriptor
            .subcommands()
            .iter()
            .find(|sc| self.has_subcommand(sc))
        {
            return Err(HubError::subcommand_conflict(taken, descriptor.name()));
        }

        if self.by_name.contains_key(descriptor.name()) {
            return Err(HubError::name_conflict(
                descriptor.name(),
                descriptor.primary_subcommand(),
            ));
        }

        let descriptor = Arc::new(descriptor);
        self.tuples.push(descriptor.subcommands().to_vec());
        self.by_name
            .insert(descriptor.name().to_string(), Arc::clone(&descriptor));
        for sc in descriptor.subcommands() {
            self.by_subcommand.insert(sc.clone(), Arc::clone(&descriptor));
        }

        info!(
            tool = %descriptor.name(),
            primary = %descriptor.primary_subcommand(),
            aliases = ?descriptor.alt_subcommands(),
            builtin = descriptor.is_builtin(),
            "Registered tool"
        );

        Ok(())
    }

    /// Whether `subcommand` is already taken.
    pub fn has_subcommand(&self, subcommand: &str) -> bool {
        self.by_subcommand.contains_key(subcommand)
    }

    /// Number of tools registered so far.
    pub fn tool_count(&self) -> usize {
        self.by_name.len()
    }

    /// Finish registration, sorting the subcommand tuples for listing.
    pub fn build(self) -> Registry {
        let RegistryBuilder {
            by_subcommand,
            by_name,
            mut tuples,
        } = self;
        tuples.sort();
        Registry {
            by_subcommand,
            by_name,
            tuples,
        }
    }
}

/// The tools available to this process run.
///
/// Every subcommand in the registry belongs to exactly one registered tool,
/// and every registered tool is reachable through each of its subcommands.
/// All queries are pure lookups.
#[derive(Debug, Default)]
pub struct Registry {
    by_subcommand: HashMap<String, Arc<ToolDescriptor>>,
    by_name: HashMap<String, Arc<ToolDescriptor>>,
    tuples: Vec<Vec<String>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a tool named `name` is registered.
    pub fn has_tool_by_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Whether a tool answers to `subcommand`.
    pub fn has_tool_by_subcommand(&self, subcommand: &str) -> bool {
        self.by_subcommand.contains_key(subcommand)
    }

    /// Get a tool by name.
    pub fn get_tool_by_name(&self, name: &str) -> Option<Arc<ToolDescriptor>> {
        self.by_name.get(name).cloned()
    }

    /// Get the tool answering to `subcommand`.
    pub fn get_tool_by_subcommand(&self, subcommand: &str) -> Option<Arc<ToolDescriptor>> {
        self.by_subcommand.get(subcommand).cloned()
    }

    /// Whether the tool named `name` is builtin, or `None` if there is no
    /// such tool.
    pub fn is_builtin_by_name(&self, name: &str) -> Option<bool> {
        self.by_name.get(name).map(|d| d.is_builtin())
    }

    /// Whether the tool answering to `subcommand` is builtin, or `None` if
    /// there is no such tool.
    pub fn is_builtin_by_subcommand(&self, subcommand: &str) -> Option<bool> {
        self.by_subcommand.get(subcommand).map(|d| d.is_builtin())
    }

    /// Names of all registered tools, sorted.
    pub fn list_tool_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Every registered subcommand, primaries and aliases, sorted.
    pub fn list_subcommands(&self) -> Vec<&str> {
        let mut subcommands: Vec<&str> = self.by_subcommand.keys().map(String::as_str).collect();
        subcommands.sort_unstable();
        subcommands
    }

    /// Subcommand tuples (`primary`, aliases...) sorted by primary subcommand.
    pub fn subcommand_tuples(&self) -> &[Vec<String>] {
        &self.tuples
    }

    /// Number of registered tools.
    pub fn tool_count(&self) -> usize {
        self.by_name.len()
    }

    /// The available-subcommands listing: one line per tool, indented by
    /// three spaces, each line newline-terminated.
    pub fn format_subcommand_listing(&self) -> String {
        self.tuples
            .iter()
            .map(|tuple| format!("   {}\n", format_full_command(tuple)))
            .collect()
    }
}
