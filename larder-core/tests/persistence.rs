//! Store behavior against real files: persistence across restarts, seeding
//! from the bundled sample asset, and recovery from a corrupt data file.

use larder_core::{
    FileSeed, FileStorage, NewRecipe, RecipePatch, RecipeStore, StaticSeed,
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

fn sample_asset() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../assets/sample-recipes.json")
}

fn tea() -> NewRecipe {
    NewRecipe {
        name: "Tea".to_string(),
        description: "Hot".to_string(),
        tags: vec!["drink".to_string()],
        ingredients: vec!["water".to_string(), "leaves".to_string()],
        steps: vec!["boil".to_string()],
    }
}

#[test]
fn test_recipes_survive_restart() {
    let dir = TempDir::new().unwrap();

    let (kept, updated) = {
        let store = RecipeStore::load(Arc::new(FileStorage::new(dir.path())));
        let kept = store.add(tea()).unwrap();
        let gone = store.add(tea()).unwrap();
        store.delete(&gone.id).unwrap();
        let updated = store
            .update(
                &kept.id,
                RecipePatch {
                    description: Some("Very hot".to_string()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        (kept, updated)
    };

    assert!(dir.path().join("recipes.json").exists());

    let reopened = RecipeStore::load(Arc::new(FileStorage::new(dir.path())));
    assert_eq!(reopened.len(), 1);
    let recipe = reopened.get(&kept.id).unwrap();
    assert_eq!(recipe, updated);
    assert_eq!(recipe.created_at, kept.created_at);
}

#[tokio::test]
async fn test_empty_store_seeds_from_sample_asset() {
    let dir = TempDir::new().unwrap();
    let storage = Arc::new(FileStorage::new(dir.path()));

    let store = RecipeStore::open(storage.clone(), &FileSeed::new(sample_asset())).await;
    assert!(store.len() >= 10);
    assert!(store.all_tags().contains(&"vegan".to_string()));

    // Seeded data is persisted; a second open does not fetch again.
    let seed = StaticSeed::new(vec![]);
    let reopened = RecipeStore::open(storage, &seed).await;
    assert_eq!(reopened.len(), store.len());
    assert_eq!(seed.fetch_count(), 0);
}

#[tokio::test]
async fn test_corrupt_file_falls_back_to_seed() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("recipes.json"), "{ not json").unwrap();

    let store = RecipeStore::open(
        Arc::new(FileStorage::new(dir.path())),
        &FileSeed::new(sample_asset()),
    )
    .await;
    assert!(!store.is_empty());

    let rewritten = fs::read_to_string(dir.path().join("recipes.json")).unwrap();
    assert!(rewritten.trim_start().starts_with('['));
}

#[tokio::test]
async fn test_missing_seed_leaves_store_empty_and_usable() {
    let dir = TempDir::new().unwrap();
    let store = RecipeStore::open(
        Arc::new(FileStorage::new(dir.path())),
        &FileSeed::new(dir.path().join("nope.json")),
    )
    .await;
    assert!(store.is_empty());

    store.add(tea()).unwrap();
    assert_eq!(store.len(), 1);
}
