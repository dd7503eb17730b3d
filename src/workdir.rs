// src/workdir.rs

//! Working-directory resolution.
//!
//! Relative task paths and the config path are resolved against the process
//! CWD, so this runs before config loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

/// Pick the directory to switch to, if any.
///
/// `workdir` wins; otherwise `exe_dir` selects the directory holding the
/// running executable.
pub fn resolve(workdir: Option<&Path>, exe_dir: bool) -> Result<Option<PathBuf>> {
    if let Some(dir) = workdir {
        return Ok(Some(dir.to_path_buf()));
    }
    if !exe_dir {
        return Ok(None);
    }

    let exe = std::env::current_exe().context("locating the running executable")?;
    let dir = exe
        .parent()
        .with_context(|| format!("executable path {:?} has no parent directory", exe))?;
    Ok(Some(dir.to_path_buf()))
}

/// Resolve and switch the process CWD, logging the result.
pub fn apply(workdir: Option<&Path>, exe_dir: bool) -> Result<()> {
    if let Some(dir) = resolve(workdir, exe_dir)? {
        std::env::set_current_dir(&dir)
            .with_context(|| format!("changing working directory to {:?}", dir))?;
    }

    let cwd = std::env::current_dir().context("reading current working directory")?;
    info!(cwd = %cwd.display(), "working directory");
    Ok(())
}
