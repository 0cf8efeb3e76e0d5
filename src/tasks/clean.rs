use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::tasks::{Context, Task, expect_no_args};

/// Delete configured build paths, then every directory with a configured
/// name anywhere under the project root. Missing paths are not an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanTask;

impl CleanTask {
    pub fn from_args(args: &[String]) -> Result<Self> {
        expect_no_args("clean", args)?;
        Ok(Self)
    }
}

impl Task for CleanTask {
    fn name(&self) -> &'static str {
        "clean"
    }

    fn run(&self, ctx: &mut Context<'_>) -> Result<()> {
        let clean = &ctx.config.clean;
        for path in &clean.paths {
            remove(&ctx.resolve(path))?;
        }
        for name in &clean.find {
            for path in find_named(ctx.root, name)? {
                remove(&path)?;
            }
        }
        Ok(())
    }
}

/// All paths named `name` at any depth under `root`, parents before children.
/// Matches that sit below a symlinked directory are skipped, so nothing
/// outside the project tree is touched.
fn find_named(root: &Path, name: &str) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/**/{}",
        glob::Pattern::escape(&root.to_string_lossy()),
        glob::Pattern::escape(name)
    );
    let paths = glob::glob(&pattern).map_err(|e| Error::Config(format!("{pattern}: {e}")))?;

    let mut found = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) if under_symlink(root, &path) => {
                log::debug!("skipping {} (reached through a symlink)", path.display());
            }
            Ok(path) => found.push(path),
            Err(e) => log::warn!("cannot search {}: {}", e.path().display(), e.error()),
        }
    }
    Ok(found)
}

/// True when any directory between `root` and `path` is a symlink, or when
/// `path` is not below `root` at all.
fn under_symlink(root: &Path, path: &Path) -> bool {
    let Ok(relative) = path.strip_prefix(root) else {
        return true;
    };
    let mut current = root.to_path_buf();
    for component in relative.parent().into_iter().flat_map(Path::components) {
        current.push(component);
        match current.symlink_metadata() {
            Ok(meta) if !meta.file_type().is_symlink() => {}
            _ => return true,
        }
    }
    false
}

fn remove(path: &Path) -> Result<()> {
    let Ok(meta) = path.symlink_metadata() else {
        return Ok(());
    };
    log::info!("removing {}", path.display());
    let result = if meta.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io(path, e)),
    }
}
