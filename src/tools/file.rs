//! The `file` builtin.

use std::io::Write;

use clap::Parser;

use crate::error::{HubError, Result};

use super::{parse_tool_args, CommonFlags, Tool, ToolContext, ToolUsage};

#[derive(Debug, Parser)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct FileArgs {
    #[command(flatten)]
    flags: CommonFlags,

    /// Subcommand to locate. Exactly one is expected.
    subcommands: Vec<String>,
}

/// Prints where the tool behind a subcommand is installed.
#[derive(Debug, Default)]
pub struct File;

pub fn factory() -> Box<dyn Tool> {
    Box::new(File)
}

impl File {
    fn execute(&self, ctx: &ToolContext<'_>, args: &[String], out: &mut dyn Write) -> Result<()> {
        let args: FileArgs = parse_tool_args(ctx, args)?;
        if args.flags.handle(self, ctx, out)? {
            return Ok(());
        }

        let [subcommand] = <[String; 1]>::try_from(args.subcommands)
            .map_err(|_| ctx.usage_error("Missing subcommand argument."))?;

        let descriptor = ctx
            .registry
            .get_tool_by_subcommand(&subcommand)
            .ok_or(HubError::UnknownSubcommand(subcommand))?;

        if descriptor.is_builtin() {
            writeln!(out, "{} is a builtin tool.", descriptor.name())?;
            return Ok(());
        }
        match descriptor.package() {
            Some(package) => writeln!(out, "{}", package.location.display())?,
            None => writeln!(out, "{} has no recorded location.", descriptor.name())?,
        }
        Ok(())
    }
}

impl Tool for File {
    fn usage(&self, ctx: &ToolContext<'_>) -> Option<String> {
        Some(
            ToolUsage::new(
                "file SUBCOMMAND",
                "Print the path and filename of the specified subcommand's plugin.",
            )
            .render(ctx),
        )
    }

    fn about(&self) -> Option<String> {
        Some("The File tool is a core component of the toolhub package.".to_string())
    }

    fn run(&self, ctx: &ToolContext<'_>, args: &[String], out: &mut dyn Write) -> Option<Result<()>> {
        Some(self.execute(ctx, args, out))
    }
}
