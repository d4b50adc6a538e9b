// src/application/note_writer.rs
use crate::application::NoteRepository;
use crate::domain::{DomainError, NoteId};
use tracing::debug;

pub struct NoteWriter<R: NoteRepository> {
    repository: R,
}

impl<R: NoteRepository> NoteWriter<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Create or overwrite a note and return its normalized id
    pub fn write_note(&self, raw_id: &str, content: &str) -> Result<NoteId, DomainError> {
        let id = NoteId::parse(raw_id)?;
        debug!(%id, bytes = content.len(), "Writing note");
        self.repository.write_note(&id, content)?;
        Ok(id)
    }
}
