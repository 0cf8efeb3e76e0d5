//! The environment tasks run in: platform, search path, home directory and
//! subprocess execution.
//!
//! Tasks never consult `cfg!(windows)`, `PATH` or `HOME` themselves; they ask
//! a [`Host`]. Tests drive the tasks with a recording fake.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Unix,
    Windows,
}

impl Platform {
    pub fn is_windows(self) -> bool {
        self == Platform::Windows
    }
}

/// Trait for the process environment a task runs against.
pub trait Host {
    fn platform(&self) -> Platform;

    /// Locate an executable on the search path.
    fn which(&self, program: &str) -> Option<PathBuf>;

    /// Home directory used for `~` expansion.
    fn home_dir(&self) -> Option<String>;

    /// Run `argv` in `cwd` with inherited stdio and wait for it.
    /// Returns the exit code, or `None` if the process was killed by a signal.
    fn run(&self, argv: &[String], cwd: &Path) -> std::io::Result<Option<i32>>;
}

/// The real environment of the current process.
#[derive(Debug, Clone, Default)]
pub struct SystemHost;

impl Host for SystemHost {
    fn platform(&self) -> Platform {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    fn which(&self, program: &str) -> Option<PathBuf> {
        let path = std::env::var_os("PATH")?;
        let extensions = if self.platform().is_windows() {
            windows_extensions(std::env::var_os("PATHEXT"))
        } else {
            Vec::new()
        };
        search_path(program, &path, &extensions)
    }

    fn home_dir(&self) -> Option<String> {
        let var = if self.platform().is_windows() {
            "USERPROFILE"
        } else {
            "HOME"
        };
        std::env::var(var).ok().filter(|h| !h.is_empty())
    }

    fn run(&self, argv: &[String], cwd: &Path) -> std::io::Result<Option<i32>> {
        let Some((program, args)) = argv.split_first() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "empty command line",
            ));
        };
        let status = Command::new(program).args(args).current_dir(cwd).status()?;
        Ok(status.code())
    }
}

fn windows_extensions(pathext: Option<OsString>) -> Vec<String> {
    let pathext = pathext
        .and_then(|v| v.into_string().ok())
        .unwrap_or_else(|| ".COM;.EXE;.BAT;.CMD".to_string());
    pathext
        .split(';')
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .collect()
}

/// Search each directory of `path` for `program`, trying the bare name first
/// and then each extension in order.
fn search_path(program: &str, path: &OsString, extensions: &[String]) -> Option<PathBuf> {
    // Names with a directory component are not looked up on the search path.
    if program.contains('/') || program.contains('\\') {
        let candidate = PathBuf::from(program);
        return is_executable(&candidate).then_some(candidate);
    }

    for dir in std::env::split_paths(path) {
        let candidate = dir.join(program);
        if is_executable(&candidate) {
            return Some(candidate);
        }
        for ext in extensions {
            let candidate = dir.join(format!("{program}{ext}"));
            if is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
