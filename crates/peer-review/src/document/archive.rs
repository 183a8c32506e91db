use std::path::{Path, PathBuf};

use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("unable to create archive directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Server-side directory holding a copy of every generated document.
#[derive(Debug, Clone)]
pub struct DocumentArchive {
    root: PathBuf,
}

impl DocumentArchive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the directory when missing. Runs once at startup.
    pub fn ensure_dir(&self) -> Result<(), ArchiveError> {
        if self.root.is_dir() {
            return Ok(());
        }
        std::fs::create_dir_all(&self.root).map_err(|source| ArchiveError::CreateDir {
            path: self.root.clone(),
            source,
        })?;
        info!(path = %self.root.display(), "created document archive directory");
        Ok(())
    }

    pub async fn persist(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, ArchiveError> {
        let path = self.root.join(filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| ArchiveError::Write {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}
