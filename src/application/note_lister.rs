// src/application/note_lister.rs
use crate::application::NoteRepository;
use crate::domain::{DomainError, TreeNode};

pub struct NoteLister<R: NoteRepository> {
    repository: R,
}

impl<R: NoteRepository> NoteLister<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// List every note and folder below the notes root
    ///
    /// # Returns
    /// Top-level nodes in directory-read order; the root itself is not a node
    pub fn list_tree(&self) -> Result<Vec<TreeNode>, DomainError> {
        self.repository.list_tree()
    }

    /// Flattened, root-relative ids of all notes (files only)
    pub fn list_note_ids(&self) -> Result<Vec<String>, DomainError> {
        let tree = self.list_tree()?;
        Ok(tree
            .iter()
            .flat_map(|root| root.iter())
            .filter(|n| !n.is_directory())
            .map(|n| n.id.clone())
            .collect())
    }
}
