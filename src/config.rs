use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::extract::Strategy;

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

/// Project-local overlay, looked up in the project root.
pub const PROJECT_CONFIG: &str = "burly-dev.toml";

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub test: TestConfig,
    #[serde(default)]
    pub lint: LintConfig,
    #[serde(default)]
    pub clean: CleanConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ProjectConfig {
    /// Shell library the extract and lint tasks read, relative to the root.
    #[serde(default)]
    pub script: String,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct TestConfig {
    /// Functions that must extract cleanly before the suite runs.
    #[serde(default)]
    pub extract_check: Vec<String>,
    /// Test harness command (split with shell quoting rules).
    #[serde(default)]
    pub runner: String,
    /// Extra argument given to the runner in verbose mode.
    #[serde(default)]
    pub trace_flag: String,
    #[serde(default)]
    pub suite: String,
    /// Coverage wrapper command, prefixed to the runner with `--coverage`.
    #[serde(default)]
    pub coverage_tool: String,
    /// Coverage output directory. `~` expands to the home directory.
    #[serde(default)]
    pub coverage_dir: String,
    #[serde(default)]
    pub install_script: String,
    /// Shell the install script always runs under.
    #[serde(default)]
    pub default_shell: String,
    /// Additional shells the install script runs under when present.
    #[serde(default)]
    pub shells: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct LintConfig {
    /// Linter command; the project script is appended.
    #[serde(default)]
    pub command: String,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct CleanConfig {
    /// Paths removed relative to the project root.
    #[serde(default)]
    pub paths: Vec<String>,
    /// Directory names removed wherever they appear under the root.
    #[serde(default)]
    pub find: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ExtractConfig {
    #[serde(default)]
    pub strategy: Strategy,
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    project: ProjectOverlay,
    #[serde(default)]
    test: TestOverlay,
    #[serde(default)]
    lint: LintOverlay,
    #[serde(default)]
    clean: CleanOverlay,
    #[serde(default)]
    extract: ExtractOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct ProjectOverlay {
    script: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct TestOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    extract_check: Vec<String>,
    #[serde(default)]
    remove_extract_check: Vec<String>,
    runner: Option<String>,
    trace_flag: Option<String>,
    suite: Option<String>,
    coverage_tool: Option<String>,
    coverage_dir: Option<String>,
    install_script: Option<String>,
    default_shell: Option<String>,
    #[serde(default)]
    shells: Vec<String>,
    #[serde(default)]
    remove_shells: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
struct LintOverlay {
    command: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct CleanOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    paths: Vec<String>,
    #[serde(default)]
    remove_paths: Vec<String>,
    #[serde(default)]
    find: Vec<String>,
    #[serde(default)]
    remove_find: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
struct ExtractOverlay {
    strategy: Option<Strategy>,
}

// ── Merge logic ──

/// Merge a user list into a default list.
/// In replace mode: user list replaces default entirely.
/// In merge mode: remove items first, then extend with additions (deduped).
fn merge_list(base: &mut Vec<String>, add: Vec<String>, remove: &[String], replace: bool) {
    if replace {
        *base = add;
    } else {
        base.retain(|item| !remove.contains(item));
        for item in add {
            if !base.contains(&item) {
                base.push(item);
            }
        }
    }
}

fn override_scalar<T>(base: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *base = v;
    }
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge `explicit` if given (it must exist and parse), otherwise
    ///    `<root>/burly-dev.toml` if present
    ///
    /// A broken project file is reported and skipped; a broken explicit
    /// file is an error.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::default_config();
        if let Some(path) = explicit {
            config.apply_overlay(Self::read_overlay(path)?);
            log::debug!("merged config overlay {}", path.display());
            return Ok(config);
        }

        let path = root.join(PROJECT_CONFIG);
        if path.is_file() {
            match Self::read_overlay(&path) {
                Ok(overlay) => {
                    config.apply_overlay(overlay);
                    log::debug!("merged config overlay {}", path.display());
                }
                Err(e) => log::warn!("ignoring {}: {e}", path.display()),
            }
        }
        Ok(config)
    }

    fn read_overlay(path: &Path) -> Result<ConfigOverlay> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Apply an overlay on top of this config (merge semantics).
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        override_scalar(&mut self.project.script, overlay.project.script);

        // Test
        let t = overlay.test;
        merge_list(
            &mut self.test.extract_check,
            t.extract_check,
            &t.remove_extract_check,
            t.replace,
        );
        merge_list(&mut self.test.shells, t.shells, &t.remove_shells, t.replace);
        override_scalar(&mut self.test.runner, t.runner);
        override_scalar(&mut self.test.trace_flag, t.trace_flag);
        override_scalar(&mut self.test.suite, t.suite);
        override_scalar(&mut self.test.coverage_tool, t.coverage_tool);
        override_scalar(&mut self.test.coverage_dir, t.coverage_dir);
        override_scalar(&mut self.test.install_script, t.install_script);
        override_scalar(&mut self.test.default_shell, t.default_shell);

        override_scalar(&mut self.lint.command, overlay.lint.command);

        // Clean
        let c = overlay.clean;
        merge_list(&mut self.clean.paths, c.paths, &c.remove_paths, c.replace);
        merge_list(&mut self.clean.find, c.find, &c.remove_find, c.replace);

        override_scalar(&mut self.extract.strategy, overlay.extract.strategy);
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}

/// Split a configured command template into argv using shell quoting rules.
pub fn split_command(template: &str) -> Result<Vec<String>> {
    match shlex::split(template) {
        Some(words) if !words.is_empty() => Ok(words),
        Some(_) => Err(Error::Config("empty command".into())),
        None => Err(Error::Config(format!("unbalanced quoting in `{template}`"))),
    }
}

/// Expand a leading `~` using the given home directory. Without a home
/// directory the value is returned unchanged.
pub fn expand_home(value: &str, home: Option<String>) -> String {
    shellexpand::tilde_with_context(value, || home).into_owned()
}
