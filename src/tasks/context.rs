use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::{self, Config};
use crate::error::{Error, Result};
use crate::host::{Host, Platform};

/// Everything a task needs: merged config, the host, the project root and
/// where to print results.
pub struct Context<'a> {
    pub config: &'a Config,
    pub host: &'a dyn Host,
    /// Project root. Relative paths and subprocess working directories
    /// resolve against it.
    pub root: &'a Path,
    pub out: &'a mut dyn Write,
}

impl<'a> Context<'a> {
    pub fn new(
        config: &'a Config,
        host: &'a dyn Host,
        root: &'a Path,
        out: &'a mut dyn Write,
    ) -> Self {
        Self {
            config,
            host,
            root,
            out,
        }
    }

    pub fn platform(&self) -> Platform {
        self.host.platform()
    }

    /// Fail with [`Error::MissingProgram`] unless `program` is on the search path.
    /// Relative names with a directory part are looked up under the project root.
    pub fn check_program(&self, program: &str) -> Result<PathBuf> {
        match self.host.which(&self.program_path(program)) {
            Some(path) => {
                log::debug!("found {program} at {}", path.display());
                Ok(path)
            }
            None => Err(Error::MissingProgram {
                program: program.to_string(),
            }),
        }
    }

    /// Run a command in the project root. Any non-zero exit is fatal.
    pub fn run(&self, argv: &[String]) -> Result<()> {
        let mut argv = argv.to_vec();
        if let Some(program) = argv.first_mut() {
            *program = self.program_path(program);
        }
        let command = display_command(&argv);
        log::info!("running: {command}");
        match self.host.run(&argv, self.root) {
            Ok(Some(0)) => Ok(()),
            Ok(code) => Err(Error::CommandFailed { command, code }),
            Err(source) => Err(Error::Spawn { command, source }),
        }
    }

    /// `./tools/x` and `tools/x` name files in the project root; bare names
    /// and absolute paths are left for the search path.
    fn program_path(&self, program: &str) -> String {
        let path = Path::new(program);
        if path.is_relative() && path.components().count() > 1 {
            self.root.join(path).to_string_lossy().into_owned()
        } else {
            program.to_string()
        }
    }

    /// Read a file relative to the project root.
    pub fn read_to_string(&self, path: &str) -> Result<String> {
        let path = self.resolve(path);
        std::fs::read_to_string(&path).map_err(|e| Error::io(path, e))
    }

    /// Resolve a configured path against the project root.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    /// Expand a leading `~` with the host's home directory.
    pub fn expand_home(&self, value: &str) -> String {
        config::expand_home(value, self.host.home_dir())
    }
}

/// Shell-quoted command line for logs and error messages.
pub fn display_command(argv: &[String]) -> String {
    shlex::try_join(argv.iter().map(String::as_str)).unwrap_or_else(|_| argv.join(" "))
}
