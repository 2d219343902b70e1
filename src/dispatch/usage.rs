//! Top-level messages printed by the dispatcher and the `help` tool.

use crate::config::ProgramInfo;
use crate::plugins::Registry;
use crate::utils::text::fill;

/// The full program usage, ending with the subcommand listing.
pub fn top_level_usage(program: &ProgramInfo, registry: &Registry) -> String {
    let prog = &program.name;
    let pointers = [
        format!("Type '{} help <subcommand>' for help on a specific subcommand.", prog),
        format!("Type '{} --version' to see the program version.", prog),
        format!(
            "Type '{} --verbose-load' to see the packages and plug-ins detected, and if \
             plug-ins are successfully loaded.",
            prog
        ),
    ];
    let pointers: Vec<String> = pointers.iter().map(|p| fill(p)).collect();

    format!(
        "Usage: {} <subcommand> [options] [args]\n\n{}\n\n{}\n\nAvailable subcommands:\n{}",
        prog,
        pointers.join("\n"),
        fill(
            "Subcommands consist of built-in subcommands and subcommands provided by \
             installed plug-ins."
        ),
        registry.format_subcommand_listing()
    )
}

/// Printed when a subcommand is not registered.
pub fn unknown_command_message(program: &ProgramInfo, token: &str) -> String {
    format!(
        "{}\n{}",
        fill(&format!("Unknown command: '{}'.", token)),
        fill(&format!("Type '{} help' for usage information.", program.name))
    )
}

/// Printed when a tool does not implement `run`.
pub fn run_not_implemented_message(subcommand: &str) -> String {
    fill(&format!(
        "WARNING: '{}' subcommand does not implement run; not running tool.",
        subcommand
    ))
}
