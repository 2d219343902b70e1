//! Tool discovery for Toolhub
//!
//! This module walks a package environment, parses and resolves every
//! plug-in entry point, and registers the resulting tools. Failures are
//! local: a malformed entry, an unresolvable entry or a conflicting tool is
//! skipped and recorded, and discovery moves on to the next entry.

use std::fmt::Write as _;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::error::HubError;

use super::entry::{parse_entry, EntryError};
use super::environment::{PackageEnvironment, ResolveError};
use super::registry::{Registry, RegistryBuilder};
use super::types::{Package, ToolDescriptor, PLUGIN_NAMESPACE};

/// Knobs for a discovery pass.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
    /// Skip every non-builtin package of the environment.
    pub builtin_only: bool,

    /// Additional package directories, searched after the environment.
    /// Packages found there are never builtin.
    pub extra_locations: Vec<PathBuf>,

    /// Record a per-package trail in the [`LoadReport`].
    pub verbose: bool,
}

/// What happened to one entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadEvent {
    /// The entry declaration is malformed.
    Malformed(EntryError),
    /// The entry could not be resolved to a tool.
    Unresolved { tool: String, error: ResolveError },
    /// The tool was registered.
    Loaded { tool: String },
    /// The tool resolved but conflicts with an already registered tool.
    Conflict { tool: String },
}

impl LoadEvent {
    fn render(&self) -> String {
        match self {
            LoadEvent::Malformed(EntryError::Unnamed) => {
                "Un-named plug-in...cannot load...".to_string()
            }
            LoadEvent::Malformed(EntryError::NoSubcommands(tool)) => {
                format!("'{}' plug-in...no subcommands...cannot load...", tool)
            }
            LoadEvent::Unresolved { tool, error } => format!("'{}' plug-in...{}...", tool, error),
            LoadEvent::Loaded { tool } => format!("'{}' plug-in...loaded...", tool),
            LoadEvent::Conflict { tool } => {
                format!("'{}' plug-in...loaded...not registered...", tool)
            }
        }
    }
}

/// The trail of one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageLoad {
    /// Package name.
    pub package: String,
    /// Activation failure, if the package was skipped as a whole.
    pub activation_error: Option<String>,
    /// One event per entry point, in declaration order.
    pub events: Vec<LoadEvent>,
}

impl PackageLoad {
    fn new(package: &Package) -> Self {
        Self {
            package: package.name().to_string(),
            activation_error: None,
            events: Vec::new(),
        }
    }

    /// `Found '<pkg>' package...` followed by the events.
    pub fn render(&self) -> String {
        let mut line = format!("Found '{}' package...", self.package);
        if let Some(error) = &self.activation_error {
            let _ = write!(line, "cannot activate: {}...", error);
        }
        for event in &self.events {
            line.push_str(&event.render());
        }
        line
    }
}

/// Diagnostics collected by a discovery pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Per-package trail; only recorded for verbose passes.
    pub packages: Vec<PackageLoad>,
    /// Registration conflict warnings, already wrapped. Always recorded.
    pub warnings: Vec<String>,
}

impl LoadReport {
    /// The per-package trail, one line per package, followed by the
    /// warnings.
    pub fn render_verbose(&self) -> String {
        let mut text = String::new();
        for package in &self.packages {
            text.push_str(&package.render());
            text.push('\n');
        }
        for warning in &self.warnings {
            text.push_str(warning);
            text.push('\n');
        }
        text
    }

    /// The warnings alone, one per line.
    pub fn render_warnings(&self) -> String {
        self.warnings.iter().map(|w| format!("{}\n", w)).collect()
    }
}

/// Result of a discovery pass.
#[derive(Debug)]
pub struct Discovery {
    pub registry: Registry,
    pub report: LoadReport,
}

/// Build a registry from every package of `env`, then from the packages at
/// each of `options.extra_locations`. Each extra location is added to `env`
/// before its packages load, so they can satisfy each other's requirements.
///
/// Never fails: per-package and per-entry problems are recorded in the
/// report and logged.
///
/// # Example
///
/// ```rust
/// use toolhub::config::ProgramInfo;
/// use toolhub::plugins::{discover, DirectoryEnvironment, DiscoveryOptions};
/// use toolhub::tools::FactoryTable;
///
/// let mut env = DirectoryEnvironment::new(&ProgramInfo::default(), &[], FactoryTable::with_builtins());
/// let discovery = discover(&mut env, &DiscoveryOptions::default());
/// assert_eq!(
///     discovery.registry.format_subcommand_listing(),
///     "   about\n   file\n   help (h, ?)\n"
/// );
/// ```
pub fn discover(env: &mut dyn PackageEnvironment, options: &DiscoveryOptions) -> Discovery {
    let core = env.core_package();
    let installed = env.list_packages();
    let mut loader = Loader {
        env,
        verbose: options.verbose,
        builder: RegistryBuilder::new(),
        report: LoadReport::default(),
    };

    for package in installed {
        let is_builtin = package.name() == core;
        if options.builtin_only && !is_builtin {
            debug!(package = %package.name(), "Skipping non-builtin package");
            continue;
        }
        loader.load_package(&package, is_builtin);
    }

    let mut extra = Vec::new();
    for location in &options.extra_locations {
        match loader.env.add_location(location) {
            Ok(packages) => extra.extend(packages),
            Err(e) => {
                warn!(
                    dir = %location.display(),
                    error = %e,
                    "Failed to scan extra package location, skipping"
                );
            }
        }
    }
    for package in extra {
        loader.load_package(&package, false);
    }

    let Loader {
        builder, report, ..
    } = loader;
    let registry = builder.build();

    info!(
        tools = registry.tool_count(),
        warnings = report.warnings.len(),
        "Tool discovery complete"
    );

    Discovery { registry, report }
}

struct Loader<'a> {
    env: &'a mut dyn PackageEnvironment,
    verbose: bool,
    builder: RegistryBuilder,
    report: LoadReport,
}

impl Loader<'_> {
    fn load_package(&mut self, package: &Package, is_builtin: bool) {
        let mut trail = PackageLoad::new(package);

        if let Err(e) = self.env.activate(package) {
            warn!(package = %package.name(), error = %e, "Failed to activate package, skipping");
            trail.activation_error = Some(e.to_string());
            self.record(trail);
            return;
        }

        for entry in package.entry_map(PLUGIN_NAMESPACE) {
            let parsed = match parse_entry(&entry.entry) {
                Ok(parsed) => parsed,
                Err(e) => {
                    debug!(package = %package.name(), error = %e, "Skipping malformed entry");
                    trail.events.push(LoadEvent::Malformed(e));
                    continue;
                }
            };
            let tool = parsed.name.clone();

            let factory = match self.env.resolve_entry(package, entry) {
                Ok(factory) => factory,
                Err(error) => {
                    debug!(
                        package = %package.name(),
                        tool = %tool,
                        error = %error,
                        "Skipping unresolved entry"
                    );
                    trail.events.push(LoadEvent::Unresolved { tool, error });
                    continue;
                }
            };

            let descriptor =
                ToolDescriptor::from_entry(parsed, is_builtin, factory, Some(package.info()));
            match self.builder.add(descriptor) {
                Ok(()) => trail.events.push(LoadEvent::Loaded { tool }),
                Err(HubError::InvalidEntry(e)) => {
                    debug!(package = %package.name(), error = %e, "Skipping malformed entry");
                    trail.events.push(LoadEvent::Malformed(e));
                }
                Err(e) => {
                    warn!(package = %package.name(), tool = %tool, "{}", e);
                    if e.is_conflict() {
                        self.report.warnings.push(e.to_string());
                    }
                    trail.events.push(LoadEvent::Conflict { tool });
                }
            }
        }

        self.record(trail);
    }

    fn record(&mut self, trail: PackageLoad) {
        if self.verbose {
            self.report.packages.push(trail);
        }
    }
}
