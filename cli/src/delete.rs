use anyhow::{bail, Context, Result};
use larder_core::{delete_recipe, Confirm, DeleteOutcome, Preconfirmed, RecipeStore};

use crate::prompt::StdinConfirm;

pub fn delete(store: &RecipeStore, id: &str, yes: bool) -> Result<()> {
    let confirm: &dyn Confirm = if yes { &Preconfirmed(true) } else { &StdinConfirm };

    if let Some(recipe) = store.get(id) {
        println!("{} ({})", recipe.name, recipe.id);
    }

    match delete_recipe(store, id, confirm).context("Failed to delete recipe")? {
        DeleteOutcome::Deleted(_) => {
            println!("Deleted.");
            Ok(())
        }
        DeleteOutcome::Cancelled => {
            println!("Cancelled.");
            Ok(())
        }
        DeleteOutcome::NotFound(_) => bail!("No recipe with id {id}"),
    }
}
