// src/domain/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Note not found: {0}")]
    NoteNotFound(String),
    #[error("Invalid note path: {0}")]
    InvalidPath(String),
    #[error("Notes root not found: {}", .0.display())]
    RootNotFound(PathBuf),
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl DomainError {
    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::NoteNotFound(_) => "not_found",
            DomainError::InvalidPath(_) => "invalid_path",
            DomainError::RootNotFound(_) => "root_not_found",
            DomainError::StorageError(_) => "storage_error",
        }
    }
}
