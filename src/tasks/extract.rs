use std::io::Write;

use crate::error::{Error, Result};
use crate::extract::{self, Extraction, Strategy};
use crate::tasks::{Context, Task};

/// Print the boilerplate block followed by each requested function body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractTask {
    /// Functions to print, in order.
    pub names: Vec<String>,
    /// Emit `{"boilerplate": ..., "functions": {...}}` instead of text.
    pub json: bool,
    /// Print function names only.
    pub list: bool,
    /// Overrides `extract.strategy` from config.
    pub strategy: Option<Strategy>,
    /// Overrides `project.script` from config.
    pub file: Option<String>,
}

impl ExtractTask {
    /// Extract just the given functions with configured defaults.
    pub fn for_names(names: Vec<String>) -> Self {
        Self {
            names,
            ..Self::default()
        }
    }

    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut task = Self::default();
        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--json" => task.json = true,
                "--list" => task.list = true,
                "--balanced" => task.strategy = Some(Strategy::Balanced),
                "--strategy" => {
                    i += 1;
                    task.strategy = Some(parse_strategy(args.get(i).map(String::as_str))?);
                }
                arg if arg.starts_with("--strategy=") => {
                    task.strategy = Some(parse_strategy(Some(&arg["--strategy=".len()..]))?);
                }
                "--file" => {
                    i += 1;
                    let Some(path) = args.get(i) else {
                        return Err(Error::Usage("extract: --file needs a path".into()));
                    };
                    task.file = Some(path.clone());
                }
                arg if arg.starts_with("--file=") => {
                    task.file = Some(arg["--file=".len()..].to_string());
                }
                arg if arg.starts_with('-') => {
                    return Err(Error::Usage(format!("extract: unknown option: {arg}")));
                }
                name => task.names.push(name.to_string()),
            }
            i += 1;
        }
        Ok(task)
    }

    fn load(&self, ctx: &Context<'_>) -> Result<Extraction> {
        let script = self.file.as_deref().unwrap_or(&ctx.config.project.script);
        let source = ctx.read_to_string(script)?;
        let strategy = self.strategy.unwrap_or(ctx.config.extract.strategy);
        log::debug!("extracting from {script}");
        extract::extract(&source, strategy)
    }
}

fn parse_strategy(value: Option<&str>) -> Result<Strategy> {
    let value = value.ok_or_else(|| Error::Usage("extract: --strategy needs a value".into()))?;
    Strategy::from_name(value)
        .ok_or_else(|| Error::Usage(format!("extract: unknown strategy: {value}")))
}

impl Task for ExtractTask {
    fn name(&self) -> &'static str {
        "extract"
    }

    fn run(&self, ctx: &mut Context<'_>) -> Result<()> {
        let extraction = self.load(ctx)?;

        if self.list {
            for name in extraction.functions.names() {
                writeln!(ctx.out, "{name}")?;
            }
            return Ok(());
        }

        if self.json {
            let document = serde_json::json!({
                "boilerplate": extraction.boilerplate,
                "functions": extraction.select(&self.names)?,
            });
            serde_json::to_writer_pretty(&mut *ctx.out, &document)?;
            writeln!(ctx.out)?;
            return Ok(());
        }

        // Resolve every name before printing anything.
        let bodies = self
            .names
            .iter()
            .map(|name| extraction.function(name))
            .collect::<Result<Vec<_>>>()?;

        if let Some(boilerplate) = &extraction.boilerplate {
            writeln!(ctx.out, "{boilerplate}")?;
        }
        for body in bodies {
            writeln!(ctx.out, "{body}")?;
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
    fn parses_names_and_flags() {
        let task = ExtractTask::from_args(&args(&["assert", "--json", "run", "--balanced"])).unwrap();
        assert_eq!(task.names, vec!["assert", "run"]);
        assert!(task.json);
        assert!(!task.list);
        assert_eq!(task.strategy, Some(Strategy::Balanced));
    }

    #[test]
    fn parses_file_and_strategy_forms() {
        let task = ExtractTask::from_args(&args(&["--file", "lib.sh", "--strategy=pattern"])).unwrap();
        assert_eq!(task.file.as_deref(), Some("lib.sh"));
        assert_eq!(task.strategy, Some(Strategy::Pattern));

        let task = ExtractTask::from_args(&args(&["--file=x.sh", "--strategy", "balanced"])).unwrap();
        assert_eq!(task.file.as_deref(), Some("x.sh"));
        assert_eq!(task.strategy, Some(Strategy::Balanced));
    }

    #[test]
    fn rejects_bad_options() {
        assert!(matches!(
            ExtractTask::from_args(&args(&["--verbose"])),
            Err(Error::Usage(_))
        ));
        assert!(matches!(
            ExtractTask::from_args(&args(&["--strategy", "greedy"])),
            Err(Error::Usage(_))
        ));
        assert!(matches!(
            ExtractTask::from_args(&args(&["--file"])),
            Err(Error::Usage(_))
        ));
    }
}
