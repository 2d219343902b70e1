//! Command dispatch for Toolhub
//!
//! [`Hub`] owns one process run: it builds the registry from the configured
//! package environment, selects the subcommand from the command line, runs
//! the tool behind it and turns the outcome into an exit code. It is the one
//! place that prints errors.

mod options;
mod usage;

use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use crate::config::{Config, ProgramInfo};
use crate::error::{HubError, Result};
use crate::plugins::{discover, DirectoryEnvironment, DiscoveryOptions, Registry};
use crate::tools::{FactoryTable, ToolContext};
use crate::utils::text::fill;

pub use options::{parse_command_line, select_subcommand, Selection};
pub use usage::{run_not_implemented_message, top_level_usage, unknown_command_message};

/// Exit code of a successful run.
pub const EXIT_SUCCESS: u8 = 0;
/// Exit code of an unknown subcommand or a failed tool.
pub const EXIT_FAILURE: u8 = 1;
/// Exit code of an invalid global option.
pub const EXIT_USAGE: u8 = 2;

/// The dispatcher.
#[derive(Debug)]
pub struct Hub {
    program: ProgramInfo,
    config: Config,
    factories: FactoryTable,
    extra_locations: Vec<PathBuf>,
}

impl Hub {
    /// A hub running the builtin tools plus whatever `config` points at.
    pub fn new(program: ProgramInfo, config: Config) -> Self {
        Self {
            program,
            config,
            factories: FactoryTable::with_builtins(),
            extra_locations: Vec::new(),
        }
    }

    /// Replace the table of linked-in tools.
    pub fn with_factories(mut self, factories: FactoryTable) -> Self {
        self.factories = factories;
        self
    }

    /// Also load packages from `locations`, after the configured ones.
    pub fn with_extra_locations(mut self, locations: Vec<PathBuf>) -> Self {
        self.extra_locations = locations;
        self
    }

    /// Discover tools and build the registry.
    ///
    /// Conflict warnings are written to `out`; with `verbose` the whole load
    /// report is.
    pub fn load(&self, verbose: bool, out: &mut dyn Write) -> Result<Registry> {
        let mut env = DirectoryEnvironment::new(
            &self.program,
            &self.config.package_dirs,
            self.factories.clone(),
        );
        let options = DiscoveryOptions {
            builtin_only: self.config.builtin_only,
            extra_locations: self.extra_locations.clone(),
            verbose,
        };
        let discovery = discover(&mut env, &options);

        if verbose {
            write!(out, "{}", discovery.report.render_verbose())?;
        } else {
            write!(out, "{}", discovery.report.render_warnings())?;
        }
        Ok(discovery.registry)
    }

    /// Run the command line `args` (program name excluded) and return the
    /// exit code.
    ///
    /// Tool output and user-facing errors go to `out`; invalid global
    /// options are reported on `err`. Only I/O and configuration failures
    /// are returned as errors.
    pub fn run(&self, args: &[String], out: &mut dyn Write, err: &mut dyn Write) -> Result<u8> {
        let selection = match parse_command_line(args) {
            Ok(selection) => selection,
            Err(HubError::NoSubcommand) => Selection::Help,
            Err(e) => return self.report(e, out, err),
        };
        debug!(?selection, "Parsed command line");

        match selection {
            Selection::Version => {
                writeln!(out, "{}", self.program.version_line())?;
                return Ok(EXIT_SUCCESS);
            }
            Selection::VerboseLoad => {
                self.load(true, out)?;
                return Ok(EXIT_SUCCESS);
            }
            Selection::Help | Selection::Subcommand { .. } => {}
        }

        let registry = self.load(false, out)?;
        match select_subcommand(&registry, args) {
            Ok(Selection::Subcommand { subcommand, args }) => {
                match self.dispatch(&registry, &subcommand, &args, out) {
                    Ok(code) => Ok(code),
                    Err(e) => self.report(e, out, err),
                }
            }
            Ok(_) | Err(HubError::NoSubcommand) => {
                writeln!(out, "{}", top_level_usage(&self.program, &registry))?;
                Ok(EXIT_SUCCESS)
            }
            Err(e) => self.report(e, out, err),
        }
    }

    /// Run the tool registered for `subcommand` with `args`.
    ///
    /// # Errors
    /// - `HubError::UnknownSubcommand` if no tool answers to `subcommand`,
    ///   or if the tool itself failed to resolve one
    /// - `HubError::Tool` if the tool failed
    pub fn dispatch(
        &self,
        registry: &Registry,
        subcommand: &str,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<u8> {
        let descriptor = registry
            .get_tool_by_subcommand(subcommand)
            .ok_or_else(|| HubError::UnknownSubcommand(subcommand.to_string()))?;
        debug!(tool = %descriptor.name(), subcommand, "Dispatching");

        let ctx = ToolContext::new(registry, &self.program, &descriptor);
        let tool = descriptor.instantiate();
        match tool.run(&ctx, args, out) {
            Some(result) => result.map(|()| EXIT_SUCCESS),
            None => {
                writeln!(out, "{}", run_not_implemented_message(subcommand))?;
                Ok(EXIT_SUCCESS)
            }
        }
    }

    fn report(&self, error: HubError, out: &mut dyn Write, err: &mut dyn Write) -> Result<u8> {
        match error {
            HubError::UnknownSubcommand(token) => {
                writeln!(out, "{}", unknown_command_message(&self.program, &token))?;
                Ok(EXIT_FAILURE)
            }
            HubError::Tool {
                message,
                prewrapped,
            } => {
                if prewrapped {
                    writeln!(out, "{}", message)?;
                } else {
                    writeln!(out, "{}", fill(&message))?;
                }
                Ok(EXIT_FAILURE)
            }
            HubError::InvalidOption(message) => {
                writeln!(err, "{}: error: {}", self.program.name, message)?;
                writeln!(
                    err,
                    "{}",
                    fill(&format!("Type '{} help' for usage information.", self.program.name))
                )?;
                Ok(EXIT_USAGE)
            }
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::MANIFEST_FILE;
    use crate::tools::testing::factory_table;
    use serde_json::json;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_package(root: &Path, name: &str, entries: &[(&str, &str)]) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        let entries: Vec<serde_json::Value> = entries
            .iter()
            .map(|(entry, target)| json!({ "entry": entry, "target": target }))
            .collect();
        let manifest = json!({
            "name": name,
            "version": "0.1",
            "requires": ["toolhub>=0.1"],
            "entry_points": { "toolhub.plugins": entries }
        });
        fs::write(dir.join(MANIFEST_FILE), manifest.to_string()).unwrap();
    }

    fn installed() -> TempDir {
        let tmp = TempDir::new().unwrap();
        write_package(
            tmp.path(),
            "Blank",
            &[
                ("Blank blank bl", "blank:Blank"),
                ("Hollow hollow", "hollow:Hollow"),
                ("Failing fail", "failing:Failing"),
            ],
        );
        tmp
    }

    fn hub(dirs: &[&Path]) -> Hub {
        let config = Config {
            package_dirs: dirs.iter().map(|d| d.to_path_buf()).collect(),
            builtin_only: false,
        };
        Hub::new(ProgramInfo::default(), config).with_factories(factory_table())
    }

    fn run(hub: &Hub, args: &[&str]) -> (u8, String, String) {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = hub.run(&args, &mut out, &mut err).unwrap();
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_help_lists_installed_tools() {
        let installed = installed();
        let hub = hub(&[installed.path()]);

        let (code, out, _) = run(&hub, &["help"]);
        assert_eq!(code, EXIT_SUCCESS);
        assert!(out.starts_with("Usage: toolhub <subcommand> [options] [args]\n"));
        assert!(out.ends_with(
            "Available subcommands:\n   about\n   blank (bl)\n   fail\n   file\n   help (h, ?)\n   hollow\n\n"
        ));
    }

    #[test]
    fn test_no_subcommand_prints_usage() {
        let installed = installed();
        let hub = hub(&[installed.path()]);

        let (code, out, _) = run(&hub, &[]);
        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(out, run(&hub, &["--help"]).1);
        assert_eq!(out, run(&hub, &["help"]).1);
    }

    #[test]
    fn test_version() {
        let hub = hub(&[]);
        let (code, out, _) = run(&hub, &["--version"]);
        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(out, format!("toolhub {}\n", env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_file_without_argument() {
        let hub = hub(&[]);
        let (code, out, _) = run(&hub, &["file"]);
        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(
            out,
            "Missing subcommand argument.\nType 'toolhub help file' for usage.\n"
        );
    }

    #[test]
    fn test_unknown_subcommand() {
        let hub = hub(&[]);
        let (code, out, _) = run(&hub, &["blah"]);
        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(
            out,
            "Unknown command: 'blah'.\nType 'toolhub help' for usage information.\n"
        );
    }

    #[test]
    fn test_unknown_subcommand_is_selected_against_registry() {
        let installed = installed();
        write_package(installed.path(), "Clash", &[("Clash h", "blank:Blank")]);
        let hub = hub(&[installed.path()]);

        let (code, out, err) = run(&hub, &["-v", "blah", "bl"]);
        assert_eq!(code, EXIT_FAILURE);
        assert!(err.is_empty());
        assert_eq!(
            out,
            "WARNING: subcommand conflict with command 'h'; not loading Clash plugin.\n\
             Unknown command: 'blah'.\nType 'toolhub help' for usage information.\n"
        );
    }

    #[test]
    fn test_tool_without_run() {
        let installed = installed();
        let hub = hub(&[installed.path()]);
        let (code, out, _) = run(&hub, &["hollow", "x"]);
        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(
            out,
            "WARNING: 'hollow' subcommand does not implement run; not running tool.\n"
        );
    }

    #[test]
    fn test_tool_receives_remaining_args() {
        let installed = installed();
        let hub = hub(&[installed.path()]);
        let (code, out, _) = run(&hub, &["-v", "bl", "x"]);
        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(out, "blank ran with [\"-v\", \"x\"]\n");
    }

    #[test]
    fn test_tool_errors() {
        let installed = installed();
        let hub = hub(&[installed.path()]);

        let (code, out, _) = run(&hub, &["fail"]);
        assert_eq!(code, EXIT_FAILURE);
        let message = "something went wrong ".repeat(6);
        assert_eq!(out, format!("{}\n", fill(message.trim_end())));
        assert!(out.lines().count() > 1);

        let (code, out, _) = run(&hub, &["fail", "wrapped"]);
        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(out, "Already\nformatted.\n");

        let (code, out, _) = run(&hub, &["fail", "nested"]);
        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(
            out,
            "Unknown command: 'nested-sc'.\nType 'toolhub help' for usage information.\n"
        );
    }

    #[test]
    fn test_invalid_global_option() {
        let hub = hub(&[]);
        let (code, out, err) = run(&hub, &["--bogus"]);
        assert_eq!(code, EXIT_USAGE);
        assert!(out.is_empty());
        assert_eq!(
            err,
            "toolhub: error: no such option: --bogus\nType 'toolhub help' for usage information.\n"
        );
    }

    #[test]
    fn test_verbose_load() {
        let installed = installed();
        let hub = hub(&[installed.path()]);
        let (code, out, _) = run(&hub, &["--verbose-load"]);
        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(
            out,
            "Found 'toolhub' package...'About' plug-in...loaded...'File' plug-in...loaded...'Help' plug-in...loaded...\n\
             Found 'Blank' package...'Blank' plug-in...loaded...'Hollow' plug-in...loaded...'Failing' plug-in...loaded...\n"
        );
    }

    #[test]
    fn test_conflict_warning_printed_before_output() {
        let installed = installed();
        write_package(installed.path(), "Clash", &[("Clash h", "blank:Blank")]);
        let hub = hub(&[installed.path()]);

        let (code, out, _) = run(&hub, &["file", "h"]);
        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(
            out,
            "WARNING: subcommand conflict with command 'h'; not loading Clash plugin.\n\
             Help is a builtin tool.\n"
        );
    }

    #[test]
    fn test_builtin_only_with_extra_location() {
        let installed = installed();
        let config = Config {
            package_dirs: Vec::new(),
            builtin_only: true,
        };
        let hub = Hub::new(ProgramInfo::default(), config)
            .with_factories(factory_table())
            .with_extra_locations(vec![installed.path().to_path_buf()]);

        let (code, out, _) = run(&hub, &["file", "blank"]);
        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(out, format!("{}\n", installed.path().join("Blank").display()));
    }
}
