// src/client/prefs_store.rs
use crate::client::Prefs;
use crate::constants::APP_DIR_NAME;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Durable storage for the persisted part of the client state
pub trait PrefsStore {
    /// `None` when nothing has been saved yet
    fn load(&self) -> Result<Option<Prefs>>;
    fn save(&self, prefs: &Prefs) -> Result<()>;
}

/// Preferences kept as JSON in a single file
#[derive(Debug, Clone)]
pub struct FilePrefsStore {
    path: PathBuf,
}

impl FilePrefsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/notedir/prefs.json` of the current user
    pub fn default_location() -> Result<Self> {
        let config_dir = dirs::config_dir().context("Could not find config directory")?;
        Ok(Self::new(config_dir.join(APP_DIR_NAME).join("prefs.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PrefsStore for FilePrefsStore {
    fn load(&self) -> Result<Option<Prefs>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No saved preferences");
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read preferences {}", self.path.display()))?;
        let prefs = serde_json::from_str(&content).context("Failed to parse preferences")?;
        Ok(Some(prefs))
    }

    fn save(&self, prefs: &Prefs) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(prefs).context("Failed to serialize preferences")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write preferences {}", self.path.display()))?;
        debug!(path = %self.path.display(), "Saved preferences");
        Ok(())
    }
}

/// Preferences held in memory, for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryPrefsStore {
    saved: Mutex<Option<Prefs>>,
}

impl MemoryPrefsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefs(prefs: Prefs) -> Self {
        Self {
            saved: Mutex::new(Some(prefs)),
        }
    }

    pub fn saved(&self) -> Option<Prefs> {
        self.saved.lock().ok().and_then(|p| p.clone())
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load(&self) -> Result<Option<Prefs>> {
        Ok(self.saved())
    }

    fn save(&self, prefs: &Prefs) -> Result<()> {
        let mut saved = self
            .saved
            .lock()
            .map_err(|e| anyhow::anyhow!("Preferences lock poisoned: {}", e))?;
        *saved = Some(prefs.clone());
        Ok(())
    }
}
