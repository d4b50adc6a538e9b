// src/client/mod.rs
pub mod prefs_store;
pub mod state;

pub use prefs_store::{FilePrefsStore, MemoryPrefsStore, PrefsStore};
pub use state::{ClientState, Prefs, Theme};
