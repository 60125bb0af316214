//! Persistence of generated artifacts.

use std::path::Path;

use crate::errors::PersistError;

/// Destination for generated files.
///
/// Both operations are idempotent: creating an existing directory succeeds,
/// and saving overwrites.
pub trait FileSystem {
    /// Create `path` and any missing parents.
    fn create_directory(&self, path: &Path) -> Result<(), PersistError>;

    /// Write `contents` to `path`, replacing any existing file.
    fn save_file(&self, path: &Path, contents: &str) -> Result<(), PersistError>;
}

/// [`FileSystem`] backed by the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn create_directory(&self, path: &Path) -> Result<(), PersistError> {
        std::fs::create_dir_all(path).map_err(|source| PersistError::CreateDirectory {
            path: path.to_path_buf(),
            source,
        })
    }

    fn save_file(&self, path: &Path, contents: &str) -> Result<(), PersistError> {
        std::fs::write(path, contents).map_err(|source| PersistError::SaveFile {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = contents.len(), "saved file");
        Ok(())
    }
}
