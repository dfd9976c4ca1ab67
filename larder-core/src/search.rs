//! Text + tag filtering over the in-memory collection.

use std::collections::BTreeSet;

use crate::types::Recipe;

/// Filter `recipes` by a free-text query and a set of required tags.
///
/// - Text: case-insensitive literal substring of name OR description.
///   An empty query matches everything. Ingredients, steps and tags are not searched.
/// - Tags: AND logic, a recipe must carry every required tag.
///
/// The result preserves collection order.
pub fn filter_recipes<'a>(
    recipes: &'a [Recipe],
    query: &str,
    required_tags: &BTreeSet<String>,
) -> Vec<&'a Recipe> {
    let needle = query.to_lowercase();

    recipes
        .iter()
        .filter(|recipe| matches_query(recipe, &needle) && matches_tags(recipe, required_tags))
        .collect()
}

/// Like [`filter_recipes`], but yields positions in `recipes`.
pub fn filter_indices(recipes: &[Recipe], query: &str, required_tags: &BTreeSet<String>) -> Vec<usize> {
    let needle = query.to_lowercase();

    recipes
        .iter()
        .enumerate()
        .filter(|(_, recipe)| matches_query(recipe, &needle) && matches_tags(recipe, required_tags))
        .map(|(i, _)| i)
        .collect()
}

/// `needle` must already be lowercased.
fn matches_query(recipe: &Recipe, needle: &str) -> bool {
    needle.is_empty()
        || recipe.name.to_lowercase().contains(needle)
        || recipe.description.to_lowercase().contains(needle)
}

fn matches_tags(recipe: &Recipe, required_tags: &BTreeSet<String>) -> bool {
    required_tags.iter().all(|tag| recipe.has_tag(tag))
}

/// Every tag used across the collection, deduplicated and sorted.
pub fn collect_tags(recipes: &[Recipe]) -> Vec<String> {
    recipes
        .iter()
        .flat_map(|recipe| recipe.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
