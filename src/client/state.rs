// src/client/state.rs
use crate::client::PrefsStore;
use crate::constants::DEFAULT_BACKEND_URL;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

/// The persisted part of the client state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefs {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            backend_url: default_backend_url(),
        }
    }
}

/// UI-side state of a notes client.
///
/// Theme and backend URL are loaded from the store on init and saved on
/// every change. The refresh counter and the active menu item live only as
/// long as the value itself; consumers compare the counter to decide when a
/// cached listing is stale.
pub struct ClientState<S: PrefsStore> {
    store: S,
    prefs: Prefs,
    refresh_counter: u64,
    active_menu: Option<String>,
}

impl<S: PrefsStore> ClientState<S> {
    pub fn init(store: S) -> Result<Self> {
        let prefs = store.load()?.unwrap_or_default();
        debug!(?prefs, "Loaded client preferences");
        Ok(Self {
            store,
            prefs,
            refresh_counter: 0,
            active_menu: None,
        })
    }

    pub fn prefs(&self) -> &Prefs {
        &self.prefs
    }

    pub fn theme(&self) -> Theme {
        self.prefs.theme
    }

    pub fn backend_url(&self) -> &str {
        &self.prefs.backend_url
    }

    pub fn refresh_counter(&self) -> u64 {
        self.refresh_counter
    }

    pub fn active_menu(&self) -> Option<&str> {
        self.active_menu.as_deref()
    }

    /// Mark cached listings stale; returns the new counter value
    pub fn trigger_refresh(&mut self) -> u64 {
        self.refresh_counter = self.refresh_counter.wrapping_add(1);
        self.refresh_counter
    }

    pub fn set_active_menu(&mut self, item: Option<String>) {
        self.active_menu = item;
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        self.prefs.theme = self.prefs.theme.toggled();
        self.store.save(&self.prefs)?;
        info!(theme = %self.prefs.theme, "Switched theme");
        Ok(self.prefs.theme)
    }

    /// Store a new backend base URL without its trailing `/`
    pub fn set_backend_url(&mut self, url: &str) -> Result<()> {
        let url = url.trim().trim_end_matches('/');
        if url.is_empty() {
            bail!("Backend URL must not be empty");
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!("Backend URL must start with http:// or https://, got '{}'", url);
        }
        self.prefs.backend_url = url.to_string();
        self.store.save(&self.prefs)?;
        info!(backend_url = %url, "Changed backend URL");
        Ok(())
    }
}
