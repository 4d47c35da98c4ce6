//! Schema persistence
//!
//! Stores generated schema documents as pretty-printed JSON files under a
//! base directory, one file per schema name (`<dir>/<name>.schema.json`).
//!
//! ## Security
//!
//! Schema names are validated before they become paths. Absolute names and
//! names containing ".." components are rejected so every file stays inside
//! the base directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use serde_json::Value;
use tracing::info;

/// File suffix for stored schema documents
pub const SCHEMA_FILE_SUFFIX: &str = ".schema.json";

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid schema name '{0}'")]
    InvalidName(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Directory of stored schema documents
#[derive(Debug, Clone)]
pub struct SchemaStore {
    base_path: PathBuf,
}

impl SchemaStore {
    /// Create a store rooted at `base_path`; the directory is created on first save
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolve a schema name to its file path with security checks.
    ///
    /// Names may contain `/` to group schemas into subdirectories.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, StorageError> {
        if name.trim().is_empty() {
            return Err(StorageError::InvalidName(name.to_string()));
        }

        let relative = Path::new(name);
        for component in relative.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                Component::ParentDir => {
                    return Err(StorageError::PermissionDenied(
                        "Path traversal (..) not allowed".to_string(),
                    ));
                }
                _ => {
                    return Err(StorageError::PermissionDenied(format!(
                        "Schema name must be relative: {}",
                        name
                    )));
                }
            }
        }

        Ok(self
            .base_path
            .join(format!("{}{}", name, SCHEMA_FILE_SUFFIX)))
    }

    /// Check if a schema has been stored under this name
    pub fn exists(&self, name: &str) -> Result<bool, StorageError> {
        let path = self.path_for(name)?;
        match fs::metadata(&path) {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::IoError(format!(
                "Failed to check schema {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Write a schema document, creating missing directories
    pub fn save(&self, name: &str, document: &Value) -> Result<PathBuf, StorageError> {
        let path = self.path_for(name)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StorageError::IoError(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let mut content = serde_json::to_string_pretty(document)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        content.push('\n');

        fs::write(&path, content).map_err(|e| {
            StorageError::IoError(format!("Failed to write schema {}: {}", path.display(), e))
        })?;

        info!(schema = name, path = %path.display(), "Schema saved");
        Ok(path)
    }

    /// Read a schema document, `None` if it was never stored
    pub fn load(&self, name: &str) -> Result<Option<Value>, StorageError> {
        let path = self.path_for(name)?;

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::IoError(format!(
                    "Failed to read schema {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let document = serde_json::from_str(&content).map_err(|e| {
            StorageError::SerializationError(format!(
                "Invalid schema document {}: {}",
                path.display(),
                e
            ))
        })?;

        info!(schema = name, path = %path.display(), "Schema loaded");
        Ok(Some(document))
    }
}
