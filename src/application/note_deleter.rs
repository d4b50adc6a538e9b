// src/application/note_deleter.rs
use crate::application::NoteRepository;
use crate::domain::{DomainError, NoteId};

pub struct NoteDeleter<R: NoteRepository> {
    repository: R,
}

impl<R: NoteRepository> NoteDeleter<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Delete a single note file
    pub fn delete_note(&self, raw_id: &str) -> Result<NoteId, DomainError> {
        let id = NoteId::parse(raw_id)?;
        self.repository.delete_note(&id)?;
        Ok(id)
    }
}
