// src/constants.rs
//
// Application-wide constants.

/// Deepest folder level the tree listing descends into.
///
/// Symbolic links are never followed, so this only guards against
/// pathologically deep trees. Folders at this depth are listed without
/// children.
///
/// Used in: `infrastructure/tree_walker.rs`
pub const MAX_TREE_DEPTH: usize = 64;

/// Notes root used when neither the config file nor `--root` name one.
pub const DEFAULT_NOTES_ROOT: &str = "notes";

pub const DEFAULT_HOST: &str = "127.0.0.1";

pub const DEFAULT_PORT: u16 = 3000;

/// Backend base URL a fresh client starts with; matches the default bind.
///
/// Used in: `client/state.rs`
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:3000";

/// Application directory name below the platform config directory.
pub const APP_DIR_NAME: &str = "notedir";
