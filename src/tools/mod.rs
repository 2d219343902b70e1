//! Tool abstraction and compiled-in tool table.
//!
//! A tool is what a subcommand runs. Tools are not loaded at runtime: every
//! tool the binary can run is linked in and listed in a [`FactoryTable`] under
//! a target string such as `toolhub.builtins:Help`. Package manifests refer to
//! tools by target, and discovery turns a resolved target into a
//! [`ToolDescriptor`](crate::plugins::ToolDescriptor) holding the factory.
//!
//! All three tool capabilities are optional. A tool that does not provide
//! one returns `None`, and the caller reports "not available" instead of
//! failing.

pub mod about;
pub mod file;
pub mod help;

use std::collections::HashMap;
use std::fmt;
use std::io::Write;

use clap::error::{ContextKind, ContextValue};

use crate::config::ProgramInfo;
use crate::error::{HubError, Result};
use crate::plugins::{Registry, ToolDescriptor};
use crate::utils::text::fill;

pub use about::About;
pub use file::File;
pub use help::Help;

/// Constructor for a fresh tool instance.
pub type ToolFactory = fn() -> Box<dyn Tool>;

/// Target string of the builtin `about` tool.
pub const ABOUT_TARGET: &str = "toolhub.builtins:About";
/// Target string of the builtin `file` tool.
pub const FILE_TARGET: &str = "toolhub.builtins:File";
/// Target string of the builtin `help` tool.
pub const HELP_TARGET: &str = "toolhub.builtins:Help";

/// Entry declarations of the builtin tools, paired with their targets.
pub const BUILTIN_ENTRIES: &[(&str, &str)] = &[
    ("About about", ABOUT_TARGET),
    ("File file", FILE_TARGET),
    ("Help help h ?", HELP_TARGET),
];

/// Everything a tool can see while it runs.
pub struct ToolContext<'a> {
    /// The registry built for this process run.
    pub registry: &'a Registry,
    /// The program the tool runs under.
    pub program: &'a ProgramInfo,
    /// The descriptor this tool instance was created from.
    pub descriptor: &'a ToolDescriptor,
}

impl<'a> ToolContext<'a> {
    pub fn new(
        registry: &'a Registry,
        program: &'a ProgramInfo,
        descriptor: &'a ToolDescriptor,
    ) -> Self {
        Self {
            registry,
            program,
            descriptor,
        }
    }

    /// The context a tool looked up by `descriptor` runs in, sharing the
    /// registry and program of this one.
    pub fn for_descriptor<'b>(&'b self, descriptor: &'b ToolDescriptor) -> ToolContext<'b> {
        ToolContext::new(self.registry, self.program, descriptor)
    }

    /// The standard pointer to this tool's help.
    pub fn usage_command(&self) -> String {
        fill(&format!(
            "Type '{} help {}' for usage.",
            self.program.name,
            self.descriptor.primary_subcommand()
        ))
    }

    /// A pre-wrapped tool error: `message` followed by the usage pointer.
    pub fn usage_error(&self, message: &str) -> HubError {
        HubError::tool_prewrapped(format!("{}\n{}", fill(message), self.usage_command()))
    }

    /// A pre-wrapped error for arguments the tool's parser rejected.
    pub fn argument_error(&self, err: &clap::Error) -> HubError {
        let detail = match err.get(ContextKind::InvalidArg) {
            Some(ContextValue::String(arg)) if arg.starts_with('-') => {
                format!("no such option: {}", arg)
            }
            Some(ContextValue::String(arg)) => format!("unexpected argument: {}", arg),
            _ => "invalid arguments".to_string(),
        };
        HubError::tool_prewrapped(format!(
            "Subcommand '{}': {}\n{}",
            self.descriptor.primary_subcommand(),
            detail,
            self.usage_command()
        ))
    }

    /// The tool's `--version` line: tool name and providing package version.
    pub fn version_line(&self) -> String {
        let version = self
            .descriptor
            .package()
            .map(|p| p.version.as_str())
            .unwrap_or(self.program.version.as_str());
        format!("{} {}", self.descriptor.name(), version)
    }
}

/// A unit of work selected by a subcommand.
///
/// Every method has a default returning `None`, meaning the capability is not
/// implemented by this tool.
pub trait Tool {
    /// Usage text shown by `help <subcommand>`.
    fn usage(&self, _ctx: &ToolContext<'_>) -> Option<String> {
        None
    }

    /// About text shown by `about <subcommand>`.
    fn about(&self) -> Option<String> {
        None
    }

    /// Run the tool with the arguments that followed its subcommand.
    fn run(
        &self,
        _ctx: &ToolContext<'_>,
        _args: &[String],
        _out: &mut dyn Write,
    ) -> Option<Result<()>> {
        None
    }
}

/// Usage line and description of a tool, rendered the way every builtin
/// presents itself.
#[derive(Debug, Clone)]
pub struct ToolUsage {
    /// Usage line without the leading `Usage: `, e.g. `file SUBCOMMAND`.
    pub usage: String,
    /// One-sentence description.
    pub description: String,
}

impl ToolUsage {
    pub fn new(usage: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            usage: usage.into(),
            description: description.into(),
        }
    }

    /// Render as `Usage: ...`, a blank line and the described full command.
    pub fn render(&self, ctx: &ToolContext<'_>) -> String {
        let full_command = ctx.descriptor.full_command();
        format!(
            "Usage: {}\n\n{}\n",
            self.usage,
            fill(&format!("{}: {}", full_command, self.description))
        )
    }
}

/// Compiled-in map from target strings to tool factories.
#[derive(Clone, Default)]
pub struct FactoryTable {
    factories: HashMap<String, ToolFactory>,
}

impl FactoryTable {
    /// An empty table.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// A table holding the builtin tools.
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        table.register(ABOUT_TARGET, about::factory);
        table.register(FILE_TARGET, file::factory);
        table.register(HELP_TARGET, help::factory);
        table
    }

    /// Add or replace the factory for `target`.
    pub fn register(&mut self, target: impl Into<String>, factory: ToolFactory) {
        self.factories.insert(target.into(), factory);
    }

    /// Look up the factory for `target`.
    pub fn get(&self, target: &str) -> Option<ToolFactory> {
        self.factories.get(target).copied()
    }

    /// Number of registered targets.
    pub(crate) fn len(&self) -> usize {
        self.factories.len()
    }
}

impl fmt::Debug for FactoryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut targets: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        targets.sort_unstable();
        f.debug_struct("FactoryTable")
            .field("targets", &targets)
            .finish()
    }
}

/// Flags every builtin tool accepts.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CommonFlags {
    /// Show this tool's usage and exit.
    #[arg(long)]
    pub help: bool,

    /// Show this tool's name and version and exit.
    #[arg(long)]
    pub version: bool,
}

impl CommonFlags {
    /// Handle `--help`/`--version`. Returns `true` if one of them was given.
    pub fn handle(
        &self,
        tool: &dyn Tool,
        ctx: &ToolContext<'_>,
        out: &mut dyn Write,
    ) -> Result<bool> {
        if self.help {
            match tool.usage(ctx) {
                Some(usage) => write!(out, "{}", usage)?,
                None => writeln!(out, "No help available on {} tool.", ctx.descriptor.name())?,
            }
            return Ok(true);
        }
        if self.version {
            writeln!(out, "{}", ctx.version_line())?;
            return Ok(true);
        }
        Ok(false)
    }
}

/// Parse `args` for the tool in `ctx` with the clap parser `P`.
///
/// The primary subcommand stands in for the binary name, help and version
/// flags are handled by [`CommonFlags`] instead of clap.
pub fn parse_tool_args<P: clap::Parser>(ctx: &ToolContext<'_>, args: &[String]) -> Result<P> {
    let argv = std::iter::once(ctx.descriptor.primary_subcommand().to_string())
        .chain(args.iter().cloned());
    P::try_parse_from(argv).map_err(|e| ctx.argument_error(&e))
}
