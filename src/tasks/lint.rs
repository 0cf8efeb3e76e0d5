use crate::config::split_command;
use crate::error::Result;
use crate::tasks::{Context, Task, expect_no_args};

/// Run the configured linter (shellcheck) over the project script.
#[derive(Debug, Clone, Copy, Default)]
pub struct LintTask;

impl LintTask {
    pub fn from_args(args: &[String]) -> Result<Self> {
        expect_no_args("lint", args)?;
        Ok(Self)
    }
}

impl Task for LintTask {
    fn name(&self) -> &'static str {
        "lint"
    }

    fn run(&self, ctx: &mut Context<'_>) -> Result<()> {
        let mut argv = split_command(&ctx.config.lint.command)?;
        ctx.check_program(&argv[0])?;
        argv.push(ctx.config.project.script.clone());
        ctx.run(&argv)
    }
}
