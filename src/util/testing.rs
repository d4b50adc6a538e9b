// src/util/testing.rs

use anyhow::Result;
use std::collections::{BTreeMap, HashSet};
use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::NoteRepository;
use crate::domain::{DomainError, NoteId, TreeNode};

/// In-memory repository for testing use cases that depend on NoteRepository
///
/// Folders are implied by the ids of the stored notes, exactly like they
/// would be on disk after writing those notes.
///
/// # Examples
///
/// ```
/// use notedir::application::NoteRepository;
/// use notedir::domain::NoteId;
/// use notedir::util::testing::MockNoteRepository;
///
/// let mock = MockNoteRepository::builder()
///     .with_note("journal/today.md", "# Today")
///     .with_write_failure("readonly.md")
///     .build();
///
/// let id = NoteId::parse("journal/today.md").unwrap();
/// assert_eq!(mock.read_note(&id).unwrap(), "# Today");
/// ```
pub struct MockNoteRepository {
    notes: Mutex<BTreeMap<String, String>>,
    write_failures: HashSet<String>,
    calls: AtomicUsize,
}

impl MockNoteRepository {
    pub fn builder() -> MockNoteRepositoryBuilder {
        MockNoteRepositoryBuilder::new()
    }

    /// Number of repository operations invoked so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Current content of a note, bypassing the call counter
    pub fn content_of(&self, id: &str) -> Option<String> {
        self.notes.lock().ok()?.get(id).cloned()
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, DomainError> {
        self.notes
            .lock()
            .map_err(|e| DomainError::StorageError(format!("mock poisoned: {e}")))
    }
}

impl NoteRepository for MockNoteRepository {
    fn list_tree(&self) -> Result<Vec<TreeNode>, DomainError> {
        self.record_call();
        let notes = self.lock()?;
        let mut roots = Vec::new();
        for id in notes.keys() {
            insert_path(&mut roots, id);
        }
        Ok(roots)
    }

    fn read_note(&self, id: &NoteId) -> Result<String, DomainError> {
        self.record_call();
        self.lock()?
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| DomainError::NoteNotFound(id.to_string()))
    }

    fn write_note(&self, id: &NoteId, content: &str) -> Result<(), DomainError> {
        self.record_call();
        if self.write_failures.contains(id.as_str()) {
            return Err(DomainError::StorageError(format!(
                "write rejected for {id}"
            )));
        }
        self.lock()?.insert(id.to_string(), content.to_string());
        Ok(())
    }

    fn delete_note(&self, id: &NoteId) -> Result<(), DomainError> {
        self.record_call();
        self.lock()?
            .remove(id.as_str())
            .map(|_| ())
            .ok_or_else(|| DomainError::NoteNotFound(id.to_string()))
    }
}

fn insert_path(nodes: &mut Vec<TreeNode>, id: &str) {
    let mut level = nodes;
    let segments: Vec<&str> = id.split('/').collect();
    for (depth, segment) in segments.iter().enumerate() {
        let node_id = segments[..=depth].join("/");
        let is_leaf = depth + 1 == segments.len();
        let pos = match level.iter().position(|n| n.id == node_id) {
            Some(pos) => pos,
            None => {
                level.push(if is_leaf {
                    TreeNode::file(node_id, *segment)
                } else {
                    TreeNode::directory(node_id, *segment)
                });
                level.len() - 1
            }
        };
        if is_leaf {
            return;
        }
        level = level[pos].children.get_or_insert_with(Vec::new);
    }
}

/// Builder for MockNoteRepository
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockNoteRepositoryBuilder {
    notes: BTreeMap<String, String>,
    write_failures: HashSet<String>,
}

impl MockNoteRepositoryBuilder {
    pub fn new() -> Self {
        Self {
            notes: BTreeMap::new(),
            write_failures: HashSet::new(),
        }
    }

    /// Add a note that can be read, listed and deleted
    pub fn with_note(mut self, id: &str, content: &str) -> Self {
        self.notes.insert(id.to_string(), content.to_string());
        self
    }

    /// Configure write_note to fail with StorageError for a specific id
    pub fn with_write_failure(mut self, id: &str) -> Self {
        self.write_failures.insert(id.to_string());
        self
    }

    pub fn build(self) -> MockNoteRepository {
        MockNoteRepository {
            notes: Mutex::new(self.notes),
            write_failures: self.write_failures,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Default for MockNoteRepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "tower", "mio", "walkdir"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
