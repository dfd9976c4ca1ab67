use anyhow::{bail, Context, Result};
use clap::Args;
use larder_core::{validate_patch, RecipePatch, RecipeStore};

#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
    /// Recipe ID
    pub id: String,

    #[arg(long, short)]
    pub name: Option<String>,

    #[arg(long, short)]
    pub description: Option<String>,

    /// Replace all ingredients (repeatable, in order)
    #[arg(long = "ingredient", short)]
    pub ingredients: Vec<String>,

    /// Replace all steps (repeatable, in order)
    #[arg(long = "step", short)]
    pub steps: Vec<String>,

    /// Replace all tags (comma-separated; empty to clear)
    #[arg(long, short)]
    pub tags: Option<String>,
}

impl UpdateArgs {
    fn patch(&self) -> RecipePatch {
        RecipePatch {
            name: self.name.clone(),
            description: self.description.clone(),
            tags: self.tags.as_deref().map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect()
            }),
            ingredients: (!self.ingredients.is_empty()).then(|| self.ingredients.clone()),
            steps: (!self.steps.is_empty()).then(|| self.steps.clone()),
        }
    }
}

pub fn update(store: &RecipeStore, args: UpdateArgs) -> Result<()> {
    let patch = args.patch();
    if patch.is_empty() {
        bail!("Nothing to update; pass at least one field");
    }
    let patch = match validate_patch(patch) {
        Ok(patch) => patch,
        Err(errors) => {
            for (field, error) in errors.iter() {
                eprintln!("{field}: {error}");
            }
            bail!("Recipe not updated: {} invalid field(s)", errors.len())
        }
    };

    let updated = store.update(&args.id, patch).inspect_err(|e| {
        tracing::error!(id = %args.id, error = %e, "Failed to save recipe");
    });
    match updated.context("Failed to save recipe")? {
        Some(recipe) => {
            println!("Updated {} ({})", recipe.name, recipe.id);
            Ok(())
        }
        None => bail!("No recipe with id {}", args.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_core::{KeyValueStorage, MemoryStorage, NewRecipe, Recipe, StorageError};
    use std::io;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// Memory storage whose writes start failing once `broken` is set.
    #[derive(Default)]
    struct Breakable {
        inner: MemoryStorage,
        broken: AtomicBool,
    }

    impl KeyValueStorage for Breakable {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.broken.load(Ordering::SeqCst) {
                return Err(io::Error::other("disk full").into());
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    fn store_with_tea() -> (RecipeStore, Recipe) {
        let store = RecipeStore::load(Arc::new(MemoryStorage::new()));
        let tea = store
            .add(NewRecipe {
                name: "Tea".to_string(),
                description: "Hot".to_string(),
                ingredients: vec!["water".to_string()],
                steps: vec!["boil".to_string()],
                tags: vec![],
            })
            .unwrap();
        (store, tea)
    }

    #[test]
    fn test_update_rejects_blank_fields() {
        let (store, tea) = store_with_tea();
        let args = UpdateArgs {
            id: tea.id.clone(),
            name: Some("Te".to_string()),
            steps: vec!["boil".to_string(), "  ".to_string()],
            ..Default::default()
        };

        let err = update(&store, args).unwrap_err();
        assert_eq!(err.to_string(), "Recipe not updated: 2 invalid field(s)");
        assert_eq!(store.get(&tea.id), Some(tea));
    }

    #[test]
    fn test_update_replaces_given_fields() {
        let (store, tea) = store_with_tea();
        let args = UpdateArgs {
            id: tea.id.clone(),
            description: Some(" Very hot ".to_string()),
            ..Default::default()
        };

        update(&store, args).unwrap();
        let stored = store.get(&tea.id).unwrap();
        assert_eq!(stored.description, "Very hot");
        assert_eq!(stored.name, "Tea");
    }

    #[test]
    fn test_update_unknown_recipe() {
        let (store, _) = store_with_tea();
        let args = UpdateArgs {
            id: "missing".to_string(),
            name: Some("Coffee".to_string()),
            ..Default::default()
        };
        assert_eq!(
            update(&store, args).unwrap_err().to_string(),
            "No recipe with id missing"
        );
    }

    #[test]
    fn test_patch_only_carries_given_fields() {
        let args = UpdateArgs {
            id: "abc".to_string(),
            description: Some("New".to_string()),
            tags: Some(" a, ,b ".to_string()),
            ..Default::default()
        };
        let patch = args.patch();
        assert_eq!(patch.description.as_deref(), Some("New"));
        assert_eq!(patch.tags, Some(vec!["a".to_string(), "b".to_string()]));
        assert!(patch.name.is_none());
        assert!(patch.ingredients.is_none());
    }

    #[test]
    fn test_empty_tags_clear() {
        let args = UpdateArgs {
            tags: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(args.patch().tags, Some(vec![]));
    }

    #[test]
    fn test_failed_save_is_reported() {
        let storage = Arc::new(Breakable::default());
        let store = RecipeStore::load(storage.clone());
        let tea = store
            .add(NewRecipe {
                name: "Tea".to_string(),
                description: "Hot".to_string(),
                ingredients: vec!["water".to_string()],
                steps: vec!["boil".to_string()],
                tags: vec![],
            })
            .unwrap();
        storage.broken.store(true, Ordering::SeqCst);

        let args = UpdateArgs {
            id: tea.id.clone(),
            name: Some("Green tea".to_string()),
            ..Default::default()
        };
        let err = update(&store, args).unwrap_err();
        assert_eq!(err.to_string(), "Failed to save recipe");
        assert_eq!(store.get(&tea.id), Some(tea));
    }
}
