use crate::config::split_command;
use crate::error::{Error, Result};
use crate::tasks::{Context, ExtractTask, Task};

/// Run the bats suite (optionally under kcov), then the install script under
/// the default shell and every configured shell found on the search path.
///
/// The bats run and the extra shells are skipped on Windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TestTask {
    /// Pass the runner's trace flag.
    pub verbose: bool,
    /// Wrap the runner in the coverage tool.
    pub coverage: bool,
}

impl TestTask {
    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut task = Self::default();
        for arg in args {
            match arg.as_str() {
                "-v" | "--verbose" => task.verbose = true,
                "--coverage" => task.coverage = true,
                other => return Err(Error::Usage(format!("test: unexpected argument: {other}"))),
            }
        }
        Ok(task)
    }

    /// Runner command line, wrapped in the coverage tool when requested.
    fn suite_command(&self, ctx: &Context<'_>) -> Result<Vec<String>> {
        let test = &ctx.config.test;

        let mut runner = split_command(&test.runner)?;
        ctx.check_program(&runner[0])?;
        if self.verbose && !test.trace_flag.is_empty() {
            runner.push(test.trace_flag.clone());
        }
        runner.push(test.suite.clone());

        if !self.coverage {
            return Ok(runner);
        }

        let mut argv = split_command(&test.coverage_tool)?;
        ctx.check_program(&argv[0])?;
        argv.push(ctx.expand_home(&test.coverage_dir));
        argv.extend(runner);
        Ok(argv)
    }
}

impl Task for TestTask {
    fn name(&self) -> &'static str {
        "test"
    }

    fn run(&self, ctx: &mut Context<'_>) -> Result<()> {
        let config = ctx.config;
        let test = &config.test;
        let windows = ctx.platform().is_windows();

        ExtractTask::for_names(test.extract_check.clone()).run(ctx)?;

        if windows {
            log::info!("skipping {} on Windows", test.runner);
        } else {
            let argv = self.suite_command(ctx)?;
            ctx.run(&argv)?;
        }

        let install = test.install_script.clone();
        ctx.run(&[test.default_shell.clone(), install.clone()])?;

        if windows {
            return Ok(());
        }
        for shell in &test.shells {
            if ctx.host.which(shell).is_none() {
                log::debug!("{shell} not found, skipping");
                continue;
            }
            ctx.run(&[shell.clone(), install.clone()])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_flags() {
        let task = TestTask::from_args(&args(&["--coverage", "-v"])).unwrap();
        assert!(task.verbose);
        assert!(task.coverage);
        assert_eq!(TestTask::from_args(&[]).unwrap(), TestTask::default());
    }

    #[test]
    fn rejects_unknown_flag() {
        assert!(matches!(
            TestTask::from_args(&args(&["--fast"])),
            Err(Error::Usage(_))
        ));
    }
}
