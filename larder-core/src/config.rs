//! Runtime settings shared by the server and the CLI.

use std::path::PathBuf;
use std::time::Duration;

use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::storage::FileStorage;

pub const DEFAULT_SEED: &str = "assets/sample-recipes.json";
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    /// File path or http(s) URL of the sample collection.
    pub seed: String,
    pub page_size: usize,
    pub search_debounce: Duration,
    pub bind: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: FileStorage::default_dir(),
            seed: DEFAULT_SEED.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl Settings {
    /// Defaults overridden by environment variables:
    /// - `LARDER_DATA_DIR`: directory holding `recipes.json`
    /// - `LARDER_SEED`: seed file path or URL
    /// - `LARDER_PAGE_SIZE`: recipes per list page
    /// - `LARDER_SEARCH_DEBOUNCE_MS`: quiet period before a typed query applies
    /// - `LARDER_BIND`: server listen address
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(dir) = lookup("LARDER_DATA_DIR").filter(|v| !v.is_empty()) {
            settings.data_dir = PathBuf::from(dir);
        }
        if let Some(seed) = lookup("LARDER_SEED").filter(|v| !v.is_empty()) {
            settings.seed = seed;
        }
        if let Some(size) = parse_var(&lookup, "LARDER_PAGE_SIZE") {
            if size > 0 {
                settings.page_size = size;
            } else {
                tracing::warn!("LARDER_PAGE_SIZE must be positive, using {DEFAULT_PAGE_SIZE}");
            }
        }
        if let Some(ms) = parse_var(&lookup, "LARDER_SEARCH_DEBOUNCE_MS") {
            settings.search_debounce = Duration::from_millis(ms);
        }
        if let Some(bind) = lookup("LARDER_BIND").filter(|v| !v.is_empty()) {
            settings.bind = bind;
        }

        settings
    }

    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn seed(mut self, seed: &str) -> Self {
        self.seed = seed.to_string();
        self
    }

    /// Zero is ignored.
    pub fn page_size(mut self, size: usize) -> Self {
        if size > 0 {
            self.page_size = size;
        }
        self
    }

    pub fn search_debounce(mut self, window: Duration) -> Self {
        self.search_debounce = window;
        self
    }

    pub fn bind(mut self, bind: &str) -> Self {
        self.bind = bind.to_string();
        self
    }
}

fn parse_var<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(%key, value = %raw, "Ignoring unparseable setting");
            None
        }
    }
}
