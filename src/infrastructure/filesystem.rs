// src/infrastructure/filesystem.rs
use crate::application::NoteRepository;
use crate::domain::{DomainError, NoteId, TreeNode};
use crate::infrastructure::tree_walker;
use anyhow::{Context, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument, warn};

/// Notes stored as plain files below a root directory
#[derive(Debug, Clone)]
pub struct FsNoteRepository {
    root: PathBuf,
}

impl FsNoteRepository {
    /// Open an existing notes root
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = PathBuf::from(root.as_ref());
        debug!(?root, "Creating new FsNoteRepository");

        if !root.is_dir() {
            return Err(DomainError::RootNotFound(root).into());
        }

        Ok(Self { root })
    }

    /// Open a notes root, creating it first when missing
    pub fn create<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        ensure_dir(root)
            .with_context(|| format!("Failed to create notes root {}", root.display()))?;
        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a note, guaranteed to stay inside the root.
    ///
    /// `NoteId` already rules out lexical escapes; this additionally resolves
    /// the deepest ancestor that exists on disk so a symlinked folder inside
    /// the root cannot point the note somewhere else.
    fn resolve(&self, id: &NoteId) -> Result<PathBuf, DomainError> {
        let path = self.root.join(id.to_relative_path());

        let canonical_root = self.root.canonicalize().map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                DomainError::RootNotFound(self.root.clone())
            } else {
                DomainError::StorageError(format!("Failed to resolve notes root: {}", e))
            }
        })?;

        let existing = path
            .ancestors()
            .find_map(|p| p.canonicalize().ok())
            .unwrap_or_else(|| canonical_root.clone());

        if !existing.starts_with(&canonical_root) {
            warn!(%id, resolved = %existing.display(), "Rejected path resolving outside notes root");
            return Err(DomainError::InvalidPath(format!(
                "'{}' resolves outside the notes root",
                id
            )));
        }

        Ok(path)
    }
}

fn ensure_dir(dir: &Path) -> std::io::Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        info!(dir = %dir.display(), "Created notes root");
    }
    Ok(())
}

/// Without a root there is nothing to read or delete
fn missing_root_as_not_found(e: DomainError, id: &NoteId) -> DomainError {
    match e {
        DomainError::RootNotFound(root) => {
            debug!(root = %root.display(), %id, "Notes root is gone");
            DomainError::NoteNotFound(id.to_string())
        }
        other => other,
    }
}

impl NoteRepository for FsNoteRepository {
    fn list_tree(&self) -> Result<Vec<TreeNode>, DomainError> {
        tree_walker::list_tree(&self.root)
    }

    #[instrument(level = "debug", skip(self, id), fields(id = %id))]
    fn read_note(&self, id: &NoteId) -> Result<String, DomainError> {
        let path = self.resolve(id).map_err(|e| missing_root_as_not_found(e, id))?;
        fs::read_to_string(&path).map_err(|e| {
            debug!(path = %path.display(), error = %e, "Note not readable");
            DomainError::NoteNotFound(id.to_string())
        })
    }

    #[instrument(level = "debug", skip(self, id, content), fields(id = %id, bytes = content.len()))]
    fn write_note(&self, id: &NoteId, content: &str) -> Result<(), DomainError> {
        // The root may have been removed since the repository was opened
        ensure_dir(&self.root).map_err(|e| {
            DomainError::StorageError(format!(
                "Failed to create notes root {}: {}",
                self.root.display(),
                e
            ))
        })?;
        let path = self.resolve(id)?;
        let dir = path
            .parent()
            .ok_or_else(|| DomainError::InvalidPath(id.to_string()))?;

        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| {
                DomainError::StorageError(format!(
                    "Failed to create folder {}: {}",
                    dir.display(),
                    e
                ))
            })?;
            debug!(dir = %dir.display(), "Created note folder");
        }

        if path.is_dir() {
            return Err(DomainError::StorageError(format!(
                "'{}' is a folder",
                id
            )));
        }

        // Write next to the target and rename over it, so readers never see
        // a partially written note
        let mut temp = NamedTempFile::new_in(dir).map_err(|e| {
            DomainError::StorageError(format!("Failed to create temp file in {}: {}", dir.display(), e))
        })?;
        temp.write_all(content.as_bytes())
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|e| DomainError::StorageError(format!("Failed to write note {}: {}", id, e)))?;
        temp.persist(&path)
            .map_err(|e| DomainError::StorageError(format!("Failed to save note {}: {}", id, e.error)))?;

        info!(%id, "Saved note");
        Ok(())
    }

    #[instrument(level = "debug", skip(self, id), fields(id = %id))]
    fn delete_note(&self, id: &NoteId) -> Result<(), DomainError> {
        let path = self.resolve(id).map_err(|e| missing_root_as_not_found(e, id))?;

        match fs::symlink_metadata(&path) {
            Ok(meta) if meta.is_dir() => {
                debug!(%id, "Refusing to delete folder");
                return Err(DomainError::NoteNotFound(id.to_string()));
            }
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DomainError::NoteNotFound(id.to_string()));
            }
            Err(e) => {
                return Err(DomainError::StorageError(format!(
                    "Failed to inspect note {}: {}",
                    id, e
                )));
            }
        }

        fs::remove_file(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DomainError::NoteNotFound(id.to_string()),
            _ => DomainError::StorageError(format!("Failed to delete note {}: {}", id, e)),
        })?;

        info!(%id, "Deleted note");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo() -> (TempDir, FsNoteRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = FsNoteRepository::new(temp_dir.path()).unwrap();
        (temp_dir, repo)
    }

    fn id(raw: &str) -> NoteId {
        NoteId::parse(raw).unwrap()
    }

    #[test]
    fn given_missing_root_when_opening_then_returns_error() {
        let temp_dir = TempDir::new().unwrap();

        let result = FsNoteRepository::new(temp_dir.path().join("missing"));

        assert!(result.is_err());
    }

    #[test]
    fn given_missing_root_when_creating_then_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("notes");

        let repo = FsNoteRepository::create(&root).unwrap();

        assert!(root.is_dir());
        assert!(repo.list_tree().unwrap().is_empty());
    }

    #[test]
    fn given_existing_note_when_writing_then_overwrites_in_full() {
        let (_dir, repo) = repo();
        repo.write_note(&id("n.txt"), "a much longer first version").unwrap();

        repo.write_note(&id("n.txt"), "short").unwrap();

        assert_eq!(repo.read_note(&id("n.txt")).unwrap(), "short");
    }

    #[test]
    fn given_write_when_done_then_leaves_no_temp_files() {
        let (dir, repo) = repo();

        repo.write_note(&id("x/n.txt"), "data").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path().join("x")).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn given_file_in_place_of_folder_when_writing_then_returns_storage_error() {
        let (dir, repo) = repo();
        fs::write(dir.path().join("plain"), "i am a file").unwrap();

        let result = repo.write_note(&id("plain/child.txt"), "x");

        assert!(matches!(result, Err(DomainError::StorageError(_))));
    }

    #[test]
    fn given_folder_id_when_writing_then_returns_storage_error() {
        let (dir, repo) = repo();
        fs::create_dir(dir.path().join("folder")).unwrap();

        let result = repo.write_note(&id("folder"), "x");

        assert!(matches!(result, Err(DomainError::StorageError(_))));
        assert!(dir.path().join("folder").is_dir());
    }

    #[test]
    fn given_folder_id_when_reading_then_returns_not_found() {
        let (dir, repo) = repo();
        fs::create_dir(dir.path().join("folder")).unwrap();

        let result = repo.read_note(&id("folder"));

        assert!(matches!(result, Err(DomainError::NoteNotFound(_))));
    }

    #[test]
    fn given_folder_id_when_deleting_then_returns_not_found_and_keeps_folder() {
        let (dir, repo) = repo();
        fs::create_dir_all(dir.path().join("folder")).unwrap();
        fs::write(dir.path().join("folder/n.txt"), "keep").unwrap();

        let result = repo.delete_note(&id("folder"));

        assert!(matches!(result, Err(DomainError::NoteNotFound(_))));
        assert!(dir.path().join("folder/n.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn given_symlink_escaping_root_when_reading_then_returns_invalid_path() {
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("secret.txt"), "secret").unwrap();
        let (dir, repo) = repo();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("escape")).unwrap();

        let result = repo.read_note(&id("escape/secret.txt"));

        assert!(matches!(result, Err(DomainError::InvalidPath(_))));
    }

    #[cfg(unix)]
    #[test]
    fn given_symlink_escaping_root_when_writing_then_returns_invalid_path() {
        let outside = TempDir::new().unwrap();
        let (dir, repo) = repo();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("escape")).unwrap();

        let result = repo.write_note(&id("escape/new/planted.txt"), "x");

        assert!(matches!(result, Err(DomainError::InvalidPath(_))));
        assert!(!outside.path().join("new").exists());
    }
}
