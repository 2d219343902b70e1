//! Global option parsing and subcommand selection.

use clap::error::{ContextKind, ContextValue};
use clap::Parser;

use crate::error::{HubError, Result};
use crate::plugins::Registry;

/// Options accepted before any subcommand.
#[derive(Debug, Parser)]
#[command(
    no_binary_name = true,
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
struct GlobalOptions {
    /// Print the program version.
    #[arg(long)]
    version: bool,

    /// Print the packages and plug-ins detected while loading.
    #[arg(long = "verbose-load")]
    verbose_load: bool,

    /// Print the full usage.
    #[arg(short = 'h', long)]
    help: bool,
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Run the tool behind `subcommand` with `args`.
    Subcommand { subcommand: String, args: Vec<String> },
    /// `--help`
    Help,
    /// `--version`
    Version,
    /// `--verbose-load`
    VerboseLoad,
}

fn is_positional(arg: &str) -> bool {
    arg == "-" || !arg.starts_with('-')
}

/// Interpret the command line without consulting a registry.
///
/// The first positional token is the subcommand and every other argument is
/// left for the tool, options included. Without a positional token the
/// arguments must be global options; when several are given the first one
/// wins.
///
/// # Errors
/// - `HubError::InvalidOption` for an unrecognized global option
/// - `HubError::NoSubcommand` when neither a subcommand nor an option is given
pub fn parse_command_line(args: &[String]) -> Result<Selection> {
    if let Some(position) = args.iter().position(|arg| is_positional(arg)) {
        let mut args = args.to_vec();
        let subcommand = args.remove(position);
        return Ok(Selection::Subcommand { subcommand, args });
    }

    GlobalOptions::try_parse_from(args).map_err(|e| option_error(&e))?;

    args.iter()
        .find_map(|arg| match arg.as_str() {
            "--version" => Some(Selection::Version),
            "--verbose-load" => Some(Selection::VerboseLoad),
            "--help" | "-h" => Some(Selection::Help),
            _ => None,
        })
        .ok_or(HubError::NoSubcommand)
}

/// Interpret the command line against `registry`.
///
/// # Errors
/// As [`parse_command_line`], plus `HubError::UnknownSubcommand` when the
/// subcommand is not registered.
pub fn select_subcommand(registry: &Registry, args: &[String]) -> Result<Selection> {
    let selection = parse_command_line(args)?;
    if let Selection::Subcommand { subcommand, .. } = &selection {
        if !registry.has_tool_by_subcommand(subcommand) {
            return Err(HubError::UnknownSubcommand(subcommand.clone()));
        }
    }
    Ok(selection)
}

fn option_error(err: &clap::Error) -> HubError {
    match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) => HubError::InvalidOption(format!("no such option: {}", arg)),
        _ => HubError::InvalidOption(
            err.kind()
                .as_str()
                .unwrap_or("invalid arguments")
                .to_string(),
        ),
    }
}
