//! The `about` builtin.

use std::io::Write;

use clap::Parser;

use crate::error::{HubError, Result};
use crate::utils::text::fill_lines;

use super::{parse_tool_args, CommonFlags, Tool, ToolContext, ToolUsage};

#[derive(Debug, Parser)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct AboutArgs {
    #[command(flatten)]
    flags: CommonFlags,

    /// Subcommand to describe.
    subcommand: Option<String>,
}

/// Prints 'about' information on the program or on one tool.
#[derive(Debug, Default)]
pub struct About;

pub fn factory() -> Box<dyn Tool> {
    Box::new(About)
}

impl About {
    fn execute(&self, ctx: &ToolContext<'_>, args: &[String], out: &mut dyn Write) -> Result<()> {
        let args: AboutArgs = parse_tool_args(ctx, args)?;
        if args.flags.handle(self, ctx, out)? {
            return Ok(());
        }

        let Some(subcommand) = args.subcommand else {
            writeln!(out, "{}", fill_lines(&ctx.program.about))?;
            return Ok(());
        };

        let descriptor = ctx
            .registry
            .get_tool_by_subcommand(&subcommand)
            .ok_or(HubError::UnknownSubcommand(subcommand))?;
        match descriptor.instantiate().about() {
            Some(about) => writeln!(out, "{}", fill_lines(&about))?,
            None => writeln!(out, "No 'about' information available.")?,
        }
        Ok(())
    }
}

impl Tool for About {
    fn usage(&self, ctx: &ToolContext<'_>) -> Option<String> {
        Some(
            ToolUsage::new(
                "about [subcommand]",
                format!(
                    "Provide 'about' information on the {} core package or a plugin \
                     when a subcommand is provided.",
                    ctx.program.name
                ),
            )
            .render(ctx),
        )
    }

    fn about(&self) -> Option<String> {
        Some("The About tool is a core component of the toolhub package.".to_string())
    }

    fn run(&self, ctx: &ToolContext<'_>, args: &[String], out: &mut dyn Write) -> Option<Result<()>> {
        Some(self.execute(ctx, args, out))
    }
}
