//! The recipe repository.
//!
//! `RecipeStore` owns the canonical collection. Every mutation persists the full
//! collection to storage before it becomes visible to readers; a mutation whose
//! write fails is dropped and the error is returned.

use chrono::Utc;
use rand::Rng;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;

use crate::error::StoreError;
use crate::search::{collect_tags, filter_recipes};
use crate::seed::SeedSource;
use crate::storage::KeyValueStorage;
use crate::types::{NewRecipe, Recipe, RecipePatch};

/// Storage slot holding the serialized collection.
pub const STORAGE_KEY: &str = "recipes";

/// Read-only live view of the collection.
///
/// Always reads the latest committed collection; `changed` wakes on every mutation.
#[derive(Debug, Clone)]
pub struct RecipesView {
    rx: watch::Receiver<Arc<Vec<Recipe>>>,
}

impl RecipesView {
    pub fn snapshot(&self) -> Arc<Vec<Recipe>> {
        self.rx.borrow().clone()
    }

    /// Wait for the next committed mutation. Returns false once the store is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    pub fn len(&self) -> usize {
        self.rx.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.borrow().is_empty()
    }
}

/// Result of a change closure passed to [`RecipeStore::commit`].
enum Change<T> {
    Unchanged(T),
    Changed(T),
}

pub struct RecipeStore {
    storage: Arc<dyn KeyValueStorage>,
    recipes: watch::Sender<Arc<Vec<Recipe>>>,
    /// Serializes clone-mutate-persist-publish so writers never interleave.
    write_lock: Mutex<()>,
    seed_attempted: AtomicBool,
}

impl RecipeStore {
    /// Load the persisted collection.
    ///
    /// Missing or malformed payloads produce an empty store; the caller decides
    /// whether to seed it.
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Self {
        let recipes = match storage.get(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Recipe>>(&raw) {
                Ok(recipes) => recipes,
                Err(e) => {
                    tracing::warn!(error = %e, "Error loading recipes from storage, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read recipe storage, starting empty");
                Vec::new()
            }
        };

        tracing::debug!(count = recipes.len(), "loaded recipes from storage");

        let (recipes, _) = watch::channel(Arc::new(recipes));
        Self {
            storage,
            recipes,
            write_lock: Mutex::new(()),
            seed_attempted: AtomicBool::new(false),
        }
    }

    /// Load from storage, then seed if nothing usable was stored.
    pub async fn open(storage: Arc<dyn KeyValueStorage>, seed: &dyn SeedSource) -> Self {
        let store = Self::load(storage);
        store.seed_if_empty(seed).await;
        store
    }

    /// Fetch and adopt the seed collection when the store is empty.
    ///
    /// Runs at most once per store. The seed is only adopted if the collection is
    /// still empty when the fetch completes, so recipes created meanwhile survive.
    /// Returns whether the seed was adopted.
    pub async fn seed_if_empty(&self, seed: &dyn SeedSource) -> bool {
        if !self.is_empty() || self.seed_attempted.swap(true, Ordering::SeqCst) {
            return false;
        }

        let recipes = match seed.fetch().await {
            Ok(recipes) => recipes,
            Err(e) => {
                tracing::error!(source = %seed.describe(), error = %e, "Error loading sample recipes");
                return false;
            }
        };

        let count = recipes.len();
        let adopted = self.commit(|current| {
            if current.is_empty() {
                *current = recipes;
                Change::Changed(true)
            } else {
                Change::Unchanged(false)
            }
        });

        match adopted {
            Ok(true) => {
                tracing::info!(source = %seed.describe(), count, "seeded recipe store");
                true
            }
            Ok(false) => {
                tracing::info!("store was populated while seeding, discarding seed");
                false
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to persist seed recipes");
                false
            }
        }
    }

    /// Live view of the collection.
    pub fn all(&self) -> RecipesView {
        RecipesView {
            rx: self.recipes.subscribe(),
        }
    }

    pub fn snapshot(&self) -> Arc<Vec<Recipe>> {
        self.recipes.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.recipes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.borrow().is_empty()
    }

    pub fn get(&self, id: &str) -> Option<Recipe> {
        self.recipes.borrow().iter().find(|r| r.id == id).cloned()
    }

    /// Create a recipe. Field validation is the caller's job.
    pub fn add(&self, fields: NewRecipe) -> Result<Recipe, StoreError> {
        let recipe = self.commit(|recipes| {
            let mut id = generate_id();
            while recipes.iter().any(|r| r.id == id) {
                id = generate_id();
            }

            let recipe = Recipe {
                id,
                name: fields.name,
                description: fields.description,
                tags: fields.tags,
                ingredients: fields.ingredients,
                steps: fields.steps,
                created_at: Utc::now(),
            };
            recipes.push(recipe.clone());
            Change::Changed(recipe)
        })?;

        tracing::info!(id = %recipe.id, name = %recipe.name, "created recipe");
        Ok(recipe)
    }

    /// Shallow-merge `patch` over the recipe with `id`. `None` if there is no such recipe.
    pub fn update(&self, id: &str, patch: RecipePatch) -> Result<Option<Recipe>, StoreError> {
        let updated = self.commit(|recipes| match recipes.iter_mut().find(|r| r.id == id) {
            Some(recipe) => {
                patch.apply_to(recipe);
                Change::Changed(Some(recipe.clone()))
            }
            None => Change::Unchanged(None),
        })?;

        if updated.is_some() {
            tracing::info!(id, "updated recipe");
        }
        Ok(updated)
    }

    /// Remove the recipe with `id`. Returns false if there is no such recipe.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let deleted = self.commit(|recipes| match recipes.iter().position(|r| r.id == id) {
            Some(index) => {
                recipes.remove(index);
                Change::Changed(true)
            }
            None => Change::Unchanged(false),
        })?;

        if deleted {
            tracing::info!(id, "deleted recipe");
        }
        Ok(deleted)
    }

    /// Recipes matching `query` and every tag in `tags`, in collection order.
    pub fn search(&self, query: &str, tags: &BTreeSet<String>) -> Vec<Recipe> {
        let recipes = self.snapshot();
        filter_recipes(&recipes, query, tags)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn all_tags(&self) -> Vec<String> {
        collect_tags(&self.snapshot())
    }

    fn commit<T>(
        &self,
        change: impl FnOnce(&mut Vec<Recipe>) -> Change<T>,
    ) -> Result<T, StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut next = self.recipes.borrow().as_ref().clone();
        match change(&mut next) {
            Change::Unchanged(value) => Ok(value),
            Change::Changed(value) => {
                self.persist(&next)?;
                self.recipes.send_replace(Arc::new(next));
                Ok(value)
            }
        }
    }

    fn persist(&self, recipes: &[Recipe]) -> Result<(), StoreError> {
        let json = serde_json::to_string(recipes)?;
        self.storage.set(STORAGE_KEY, &json)?;
        Ok(())
    }
}

/// Time-based prefix plus a random suffix, both base 36.
fn generate_id() -> String {
    let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
    let suffix: u64 = rand::rng().random();
    format!("{}{}", to_base36(millis), to_base36(suffix))
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
