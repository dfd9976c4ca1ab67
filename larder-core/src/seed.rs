//! Seed data sources.
//!
//! The store fetches a seed collection at most once, and only when storage
//! holds nothing usable.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::error::SeedError;
use crate::types::Recipe;

/// Trait for seed sources, enabling mockability in tests.
#[async_trait]
pub trait SeedSource: Send + Sync {
    /// Fetch the seed collection.
    async fn fetch(&self) -> Result<Vec<Recipe>, SeedError>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}

/// Build a seed source from a path or an http(s) URL.
pub fn seed_source_from(location: &str) -> Box<dyn SeedSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSeed::new(location))
    } else {
        Box::new(FileSeed::new(location))
    }
}

/// Seed read from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSeed {
    path: PathBuf,
}

impl FileSeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SeedSource for FileSeed {
    async fn fetch(&self) -> Result<Vec<Recipe>, SeedError> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Seed fetched from a static JSON asset over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSeed {
    url: String,
    timeout: Duration,
}

impl HttpSeed {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl SeedSource for HttpSeed {
    async fn fetch(&self) -> Result<Vec<Recipe>, SeedError> {
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;
        let recipes = client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Recipe>>()
            .await?;
        Ok(recipes)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// In-memory seed. Counts fetches so tests can check the at-most-once rule.
#[derive(Debug, Default)]
pub struct StaticSeed {
    recipes: Vec<Recipe>,
    fail: bool,
    fetches: AtomicUsize,
}

impl StaticSeed {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes,
            fail: false,
            fetches: AtomicUsize::new(0),
        }
    }

    /// A seed whose fetch always fails.
    pub fn failing() -> Self {
        Self {
            recipes: Vec::new(),
            fail: true,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SeedSource for StaticSeed {
    async fn fetch(&self) -> Result<Vec<Recipe>, SeedError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SeedError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "static seed configured to fail",
            )));
        }
        Ok(self.recipes.clone())
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}
