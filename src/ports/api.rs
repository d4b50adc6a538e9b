//! JSON bodies exchanged over the notes HTTP API.

use serde::{Deserialize, Serialize};

// =====================================================
// Request Types
// =====================================================

/// Create or overwrite a note
#[derive(Debug, Serialize, Deserialize)]
pub struct WriteNoteRequest {
    /// Root-relative note identifier, e.g. `journal/today.md`
    pub path: String,
    pub content: String,
}

// =====================================================
// Response Types
// =====================================================

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct NoteContent {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct WriteNoteResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

/// Body of every non-2xx response
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub success: bool,
    pub kind: String,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(kind: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            kind: kind.into(),
            error: error.into(),
        }
    }
}
