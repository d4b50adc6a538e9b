// src/domain/note_id.rs
use crate::domain::DomainError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[cfg(windows)]
const SEPARATORS: &[char] = &['/', '\\'];
#[cfg(not(windows))]
const SEPARATORS: &[char] = &['/'];

/// Root-relative identifier of a note or folder.
///
/// Parsing normalizes the raw path lexically and never touches the
/// filesystem:
///
/// * `/` separates segments, and so does `\` on Windows; elsewhere `\` is
///   an ordinary filename character
/// * empty and `.` segments are dropped, so a leading `/` is harmless
/// * `..` removes the previous segment and is rejected when nothing is left
///   to remove
///
/// ```
/// use notedir::domain::NoteId;
///
/// let id: NoteId = "journal/./2024/../today.md".parse().unwrap();
/// assert_eq!(id.as_str(), "journal/today.md");
/// assert!("../etc/passwd".parse::<NoteId>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteId(String);

impl NoteId {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let mut segments: Vec<&str> = Vec::new();

        for segment in raw.split(SEPARATORS) {
            match segment {
                "" | "." => continue,
                ".." => {
                    if segments.pop().is_none() {
                        return Err(DomainError::InvalidPath(format!(
                            "'{}' escapes the notes root",
                            raw
                        )));
                    }
                }
                s if s.contains('\0') => {
                    return Err(DomainError::InvalidPath(format!(
                        "'{}' contains a NUL byte",
                        raw.escape_default()
                    )));
                }
                s => segments.push(s),
            }
        }

        if segments.is_empty() {
            return Err(DomainError::InvalidPath(format!(
                "'{}' does not name a note",
                raw
            )));
        }

        Ok(Self(segments.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last segment of the identifier
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Platform path relative to the notes root
    pub fn to_relative_path(&self) -> PathBuf {
        self.segments().collect()
    }
}

impl FromStr for NoteId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NoteId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for NoteId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
