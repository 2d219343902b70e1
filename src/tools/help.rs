//! The `help` builtin.

use std::io::Write;

use clap::Parser;

use crate::dispatch::top_level_usage;
use crate::error::{HubError, Result};

use super::{parse_tool_args, CommonFlags, Tool, ToolContext, ToolUsage};

#[derive(Debug, Parser)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct HelpArgs {
    #[command(flatten)]
    flags: CommonFlags,

    /// Subcommand to describe.
    subcommand: Option<String>,
}

/// Prints the top-level usage, or the usage of one tool.
#[derive(Debug, Default)]
pub struct Help;

pub fn factory() -> Box<dyn Tool> {
    Box::new(Help)
}

impl Help {
    fn execute(&self, ctx: &ToolContext<'_>, args: &[String], out: &mut dyn Write) -> Result<()> {
        let args: HelpArgs = parse_tool_args(ctx, args)?;
        if args.flags.handle(self, ctx, out)? {
            return Ok(());
        }

        let Some(subcommand) = args.subcommand else {
            writeln!(out, "{}", top_level_usage(ctx.program, ctx.registry))?;
            return Ok(());
        };

        let descriptor = ctx
            .registry
            .get_tool_by_subcommand(&subcommand)
            .ok_or(HubError::UnknownSubcommand(subcommand))?;
        let tool = descriptor.instantiate();
        match tool.usage(&ctx.for_descriptor(&descriptor)) {
            Some(usage) => write!(out, "{}", usage)?,
            None => writeln!(out, "No help available on {} tool.", descriptor.name())?,
        }
        Ok(())
    }
}

impl Tool for Help {
    fn usage(&self, ctx: &ToolContext<'_>) -> Option<String> {
        Some(
            ToolUsage::new(
                "help [subcommand]",
                format!(
                    "Provide usage information on the {} core package or a plug-in \
                     when a subcommand is provided.",
                    ctx.program.name
                ),
            )
            .render(ctx),
        )
    }

    fn about(&self) -> Option<String> {
        Some("The Help tool is a core component of the toolhub package.".to_string())
    }

    fn run(&self, ctx: &ToolContext<'_>, args: &[String], out: &mut dyn Write) -> Option<Result<()>> {
        Some(self.execute(ctx, args, out))
    }
}
