// src/infrastructure/mod.rs
pub mod config;
pub mod filesystem;
pub mod tree_walker;

pub use config::Config;
pub use filesystem::FsNoteRepository;
