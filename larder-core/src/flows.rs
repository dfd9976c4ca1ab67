//! Create, detail and delete flows on top of the store.

use chrono::{DateTime, Utc};
use tracing::error;

use crate::error::StoreError;
use crate::form::{FormErrors, RecipeForm};
use crate::routes::Route;
use crate::store::RecipeStore;
use crate::types::Recipe;

pub const CREATE_FAILED_MESSAGE: &str = "Error creating recipe. Please try again.";
pub const DELETE_CONFIRM_PROMPT: &str = "Are you sure you want to delete this recipe?";

/// A yes/no question put to the user.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

/// An answer given ahead of time, e.g. `--yes` or `?confirm=true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preconfirmed(pub bool);

impl Confirm for Preconfirmed {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

#[derive(Debug)]
pub enum CreateOutcome {
    Created { recipe: Recipe, redirect: Route },
    Invalid(FormErrors),
    /// The store rejected the write. The form keeps its contents.
    Failed(String),
}

pub fn submit_create(form: &mut RecipeForm, store: &RecipeStore) -> CreateOutcome {
    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(errors) => {
            form.mark_all_touched();
            return CreateOutcome::Invalid(errors);
        }
    };

    match store.add(fields) {
        Ok(recipe) => {
            let redirect = Route::Detail(recipe.id.clone());
            CreateOutcome::Created { recipe, redirect }
        }
        Err(e) => {
            error!(error = %e, "Failed to create recipe");
            CreateOutcome::Failed(CREATE_FAILED_MESSAGE.to_string())
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum DetailOutcome {
    Found(Recipe),
    Redirect(Route),
}

pub fn resolve_detail(store: &RecipeStore, id: Option<&str>) -> DetailOutcome {
    match id.and_then(|id| store.get(id)) {
        Some(recipe) => DetailOutcome::Found(recipe),
        None => DetailOutcome::Redirect(Route::List),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted(Route),
    NotFound(Route),
}

pub fn delete_recipe(
    store: &RecipeStore,
    id: &str,
    confirm: &dyn Confirm,
) -> Result<DeleteOutcome, StoreError> {
    if !confirm.confirm(DELETE_CONFIRM_PROMPT) {
        return Ok(DeleteOutcome::Cancelled);
    }

    if store.delete(id)? {
        Ok(DeleteOutcome::Deleted(Route::List))
    } else {
        Ok(DeleteOutcome::NotFound(Route::List))
    }
}

/// Long-form date, e.g. "October 18, 2026".
pub fn format_created(created_at: &DateTime<Utc>) -> String {
    created_at.format("%B %-d, %Y").to_string()
}
