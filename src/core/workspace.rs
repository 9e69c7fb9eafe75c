use anyhow::{Context, Result};
use git2::Repository;
use log::debug;
use std::path::{Path, PathBuf};

/// Resolves the directory that relative paths in the file list are joined to.
///
/// An explicit root wins. Otherwise the work tree of the enclosing Git
/// repository is used, and outside of one the current directory.
pub fn resolve_root(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(root) = explicit {
        if !root.is_dir() {
            anyhow::bail!("Root is not a directory: {}", root.display());
        }
        return Ok(root.to_path_buf());
    }

    let current_dir = std::env::current_dir().context("Failed to read current directory")?;
    match Repository::discover(&current_dir) {
        Ok(repo) => match repo.workdir() {
            Some(workdir) => Ok(workdir.to_path_buf()),
            // Bare repository: there is no work tree to resolve against.
            None => Ok(current_dir),
        },
        Err(e) => {
            debug!("not inside a git work tree ({e}), using current directory");
            Ok(current_dir)
        }
    }
}
