use std::path::{Path, PathBuf};

use crate::helper::error_chain_fmt;

/// Filesystem store for the raw book text files.
///
/// Files are looked up by their sanitized basename only: whatever path
/// components a stored name carries, the lookup never leaves `root`.
pub struct BookFileStore {
    root: PathBuf,
}

#[derive(thiserror::Error)]
pub enum BookFileStoreError {
    #[error("The file could not be found in the book store: {0}")]
    FileNotFound(String),
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

impl std::fmt::Debug for BookFileStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl BookFileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Reads a book file fully into memory as UTF-8 text.
    #[tracing::instrument(name = "Reading book text from store", skip(self))]
    pub fn read_to_string(&self, stored_name: &str) -> Result<String, BookFileStoreError> {
        let path = self.resolve(stored_name)?;
        match std::fs::read_to_string(&path) {
            Ok(raw) => Ok(raw),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                Err(BookFileStoreError::FileNotFound(stored_name.to_string()))
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Reads a book file fully into memory as raw bytes, for downloads.
    #[tracing::instrument(name = "Reading book bytes from store", skip(self))]
    pub fn read(&self, stored_name: &str) -> Result<Vec<u8>, BookFileStoreError> {
        let path = self.resolve(stored_name)?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                Err(BookFileStoreError::FileNotFound(stored_name.to_string()))
            }
            Err(error) => Err(error.into()),
        }
    }

    fn resolve(&self, stored_name: &str) -> Result<PathBuf, BookFileStoreError> {
        trusted_join(&self.root, stored_name)
            .ok_or_else(|| BookFileStoreError::FileNotFound(stored_name.to_string()))
    }
}

/// The single place where a stored file name is turned into a path.
///
/// Only the basename of `stored_name` is trusted, so `../../etc/passwd`
/// resolves to `<root>/passwd`. Names with no usable basename (empty, `..`)
/// yield `None`.
pub fn trusted_join(root: &Path, stored_name: &str) -> Option<PathBuf> {
    let base = Path::new(stored_name).file_name()?;
    Some(root.join(base))
}

/// Basename a stored file name sanitizes to, if any.
pub fn sanitized_basename(stored_name: &str) -> Option<String> {
    Path::new(stored_name)
        .file_name()
        .map(|base| base.to_string_lossy().into_owned())
}
