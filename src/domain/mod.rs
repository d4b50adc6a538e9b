// src/domain/mod.rs
pub mod error;
pub mod note;
pub mod note_id;
pub mod tree;

pub use error::DomainError;
pub use note::Note;
pub use note_id::NoteId;
pub use tree::TreeNode;
