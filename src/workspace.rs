//! Scoped workspace directory for a single run.
//!
//! Everything the run downloads or clones lives under one uniquely-named
//! temporary directory. The directory is removed when the `Workspace` is
//! dropped, so cleanup runs on normal completion, on `?`-propagated errors,
//! and on unwind.

use std::path::Path;

use anyhow::{Context, Result};
use tempfile::TempDir;
use tracing::debug;

/// Exclusive owner of the run's temporary directory tree.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Allocate a fresh workspace directory under the platform temp location.
    ///
    /// Fatal if the underlying storage cannot allocate one — there is no
    /// retry or fallback location.
    pub fn create() -> Result<Self> {
        let dir = TempDir::new().context("failed to create workspace directory")?;
        debug!(path = %dir.path().display(), "created run workspace");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
