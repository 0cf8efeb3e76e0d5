//! burly-dev: developer task runner for the burly shell library.
//!
//! Runs the bats suite (optionally under kcov), installs the library under a
//! list of shells, lints it with shellcheck, cleans build output, and pulls
//! the boilerplate block and named functions out of the library source.
//!
//! # Architecture
//!
//! - **[`extract`]** — Shell-source extraction: boilerplate block, function table.
//! - **[`tasks`]** — The `test`, `lint`, `clean` and `extract` tasks and their shared context.
//! - **[`host`]** — Injected environment: platform, search path, home dir, subprocesses.
//! - **[`config`]** — Configuration loading: embedded defaults + project overlay merge.
//! - **[`logging`]** — Terminal logger setup.
//! - **[`error`]** — Crate error type.

/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Crate-wide error type and result alias.
pub mod error;
/// Boilerplate and function extraction from shell source.
pub mod extract;
/// Platform, program lookup and subprocess execution.
pub mod host;
/// stderr logger setup.
pub mod logging;
/// Developer tasks.
pub mod tasks;

pub use error::{Error, Result};
use extract::{Extraction, Strategy};

/// Extract the boilerplate block and function table from shell source with
/// the default pattern scan.
///
/// This is the main entry point for tests and simple usage.
pub fn scan(source: &str) -> Extraction {
    Extraction {
        boilerplate: extract::extract_boilerplate(source),
        functions: extract::pattern::functions(source),
    }
}

/// Same as [`scan()`] with an explicit strategy.
pub fn scan_with(source: &str, strategy: Strategy) -> Result<Extraction> {
    extract::extract(source, strategy)
}
