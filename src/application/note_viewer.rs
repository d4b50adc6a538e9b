// src/application/note_viewer.rs
use crate::domain::{DomainError, Note, NoteId, TreeNode};
use std::sync::Arc;

pub trait NoteRepository {
    /// Fresh listing of every entry below the notes root
    fn list_tree(&self) -> Result<Vec<TreeNode>, DomainError>;

    fn read_note(&self, id: &NoteId) -> Result<String, DomainError>;

    /// Create or fully replace a note, creating missing parent folders
    fn write_note(&self, id: &NoteId, content: &str) -> Result<(), DomainError>;

    /// Remove a single note file; folders are never removed
    fn delete_note(&self, id: &NoteId) -> Result<(), DomainError>;
}

impl<R: NoteRepository + ?Sized> NoteRepository for Arc<R> {
    fn list_tree(&self) -> Result<Vec<TreeNode>, DomainError> {
        (**self).list_tree()
    }

    fn read_note(&self, id: &NoteId) -> Result<String, DomainError> {
        (**self).read_note(id)
    }

    fn write_note(&self, id: &NoteId, content: &str) -> Result<(), DomainError> {
        (**self).write_note(id, content)
    }

    fn delete_note(&self, id: &NoteId) -> Result<(), DomainError> {
        (**self).delete_note(id)
    }
}

impl<R: NoteRepository + ?Sized> NoteRepository for &R {
    fn list_tree(&self) -> Result<Vec<TreeNode>, DomainError> {
        (**self).list_tree()
    }

    fn read_note(&self, id: &NoteId) -> Result<String, DomainError> {
        (**self).read_note(id)
    }

    fn write_note(&self, id: &NoteId, content: &str) -> Result<(), DomainError> {
        (**self).write_note(id, content)
    }

    fn delete_note(&self, id: &NoteId) -> Result<(), DomainError> {
        (**self).delete_note(id)
    }
}

pub struct NoteViewer<R: NoteRepository> {
    repository: R,
}

impl<R: NoteRepository> NoteViewer<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn view_note(&self, raw_id: &str) -> Result<Note, DomainError> {
        let id = NoteId::parse(raw_id)?;
        let content = self.repository.read_note(&id)?;
        Ok(Note { id, content })
    }
}
