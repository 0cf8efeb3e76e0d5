//! Developer tasks: test, lint, clean and extract.
//!
//! Each task implements [`Task`] and runs against a [`Context`]. Tasks run
//! their external commands one at a time and stop at the first failure.

/// Remove build output and cache directories.
pub mod clean;
/// Shared task context: config, host, project root, output.
pub mod context;
/// Print the boilerplate block and selected function bodies.
pub mod extract;
/// Run shellcheck over the library.
pub mod lint;
/// Run the bats suite and the cross-shell install smoke test.
pub mod test;

pub use clean::CleanTask;
pub use context::Context;
pub use extract::ExtractTask;
pub use lint::LintTask;
pub use test::TestTask;

use crate::error::{Error, Result};

/// Trait for developer tasks.
pub trait Task {
    /// Name the task is invoked by on the command line.
    fn name(&self) -> &'static str;

    /// Run the task to completion, or stop at the first failure.
    fn run(&self, ctx: &mut Context<'_>) -> Result<()>;
}

/// Task names with one-line descriptions, in help order.
pub const CATALOG: &[(&str, &str)] = &[
    ("test", "Run the bats suite and install the library under each shell"),
    ("lint", "Use shellcheck to scan for problems"),
    ("clean", "Remove build output and cache directories"),
    ("extract", "Print the boilerplate block and named function bodies"),
];

/// Build a task from its name and the arguments that follow it.
pub fn from_args(name: &str, args: &[String]) -> Result<Box<dyn Task>> {
    let task: Box<dyn Task> = match name {
        "test" => Box::new(TestTask::from_args(args)?),
        "lint" => Box::new(LintTask::from_args(args)?),
        "clean" => Box::new(CleanTask::from_args(args)?),
        "extract" => Box::new(ExtractTask::from_args(args)?),
        other => return Err(Error::Usage(format!("unknown task: {other}"))),
    };
    Ok(task)
}

/// Reject any argument for tasks that take none.
fn expect_no_args(task: &str, args: &[String]) -> Result<()> {
    match args.first() {
        Some(arg) => Err(Error::Usage(format!("{task}: unexpected argument: {arg}"))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn every_catalog_entry_builds() {
        for (name, _) in CATALOG {
            let task = from_args(name, &[]).unwrap();
            assert_eq!(task.name(), *name);
        }
    }

    #[test]
    fn unknown_task_is_usage_error() {
        assert!(matches!(from_args("deploy", &[]), Err(Error::Usage(_))));
    }

    #[test]
    fn argument_free_tasks_reject_arguments() {
        assert!(matches!(
            from_args("lint", &args(&["--fix"])),
            Err(Error::Usage(_))
        ));
        assert!(matches!(
            from_args("clean", &args(&["build"])),
            Err(Error::Usage(_))
        ));
    }
}
