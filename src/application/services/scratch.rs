use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Where per-segment temporary directories are allocated.
#[derive(Debug, Clone, Default)]
pub struct ScratchSpace {
    root: Option<PathBuf>,
}

impl ScratchSpace {
    /// Allocates under the system temp directory.
    pub fn system() -> Self {
        Self { root: None }
    }

    pub fn in_dir(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn allocate(&self, prefix: &str) -> io::Result<ScratchDir> {
        let dir = match &self.root {
            Some(root) => {
                std::fs::create_dir_all(root)?;
                tempfile::Builder::new().prefix(prefix).tempdir_in(root)?
            }
            None => tempfile::Builder::new().prefix(prefix).tempdir()?,
        };
        Ok(ScratchDir { dir })
    }
}

/// A temporary directory removed when released or dropped.
#[derive(Debug)]
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Deletes the directory now. Failure is logged; dropping would retry silently.
    pub fn release(self) {
        let path = self.dir.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            tracing::warn!(error = %e, path = %path.display(), "Failed to remove scratch directory");
        }
    }
}
