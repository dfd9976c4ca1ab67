use anyhow::{bail, Result};
use larder_core::{format_created, resolve_detail, DetailOutcome, Recipe, RecipeStore};

pub fn show(store: &RecipeStore, id: &str) -> Result<()> {
    match resolve_detail(store, Some(id)) {
        DetailOutcome::Found(recipe) => {
            print!("{}", render_recipe(&recipe));
            Ok(())
        }
        DetailOutcome::Redirect(_) => bail!("No recipe with id {id}"),
    }
}

pub fn render_recipe(recipe: &Recipe) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", recipe.name));
    out.push_str(&format!("Created {}\n", format_created(&recipe.created_at)));
    if !recipe.tags.is_empty() {
        out.push_str(&format!("Tags: {}\n", recipe.tags.join(", ")));
    }
    out.push_str(&format!("\n{}\n", recipe.description));

    out.push_str("\nIngredients:\n");
    for ingredient in &recipe.ingredients {
        out.push_str(&format!("  - {ingredient}\n"));
    }

    out.push_str("\nSteps:\n");
    for (i, step) in recipe.steps.iter().enumerate() {
        out.push_str(&format!("  {}. {step}\n", i + 1));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_render_recipe() {
        let recipe = Recipe {
            id: "abc".to_string(),
            name: "Tea".to_string(),
            description: "Hot".to_string(),
            tags: vec!["drink".to_string(), "quick".to_string()],
            ingredients: vec!["water".to_string()],
            steps: vec!["boil".to_string(), "steep".to_string()],
            created_at: Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap(),
        };

        assert_eq!(
            render_recipe(&recipe),
            "Tea\nCreated October 18, 2026\nTags: drink, quick\n\nHot\n\n\
             Ingredients:\n  - water\n\nSteps:\n  1. boil\n  2. steep\n"
        );
    }
}
