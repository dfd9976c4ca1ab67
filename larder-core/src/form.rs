//! The create-recipe form: field state, validation and the unsaved-changes guard.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use thiserror::Error;

use crate::flows::Confirm;
use crate::types::{NewRecipe, RecipePatch};

pub const NAME_MIN_LEN: usize = 3;
pub const MAX_TAGS: usize = 5;

pub const UNSAVED_CHANGES_PROMPT: &str =
    "You have unsaved changes. Are you sure you want to leave?";

/// A form control. Ingredient and step rows are addressed by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Description,
    Ingredient(usize),
    Step(usize),
    Tags,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Description => write!(f, "description"),
            Field::Ingredient(i) => write!(f, "ingredients[{i}]"),
            Field::Step(i) => write!(f, "steps[{i}]"),
            Field::Tags => write!(f, "tags"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldError {
    #[error("This field is required")]
    Required,

    #[error("Minimum length is {required} characters")]
    MinLength { required: usize, actual: usize },

    #[error("At most {max} tags are allowed")]
    MaxTags { max: usize, actual: usize },
}

/// Per-field validation errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<Field, FieldError>,
}

impl FormErrors {
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.errors.iter().map(|(field, error)| (*field, error))
    }

    fn insert(&mut self, field: Field, error: FieldError) {
        self.errors.insert(field, error);
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {error}")?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeForm {
    name: String,
    description: String,
    ingredients: Vec<String>,
    steps: Vec<String>,
    tags: Vec<String>,
    dirty: bool,
    touched: BTreeSet<Field>,
}

impl Default for RecipeForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeForm {
    /// An empty form with one ingredient row and one step row.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            ingredients: vec![String::new()],
            steps: vec![String::new()],
            tags: Vec::new(),
            dirty: false,
            touched: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
        self.dirty = true;
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
        self.dirty = true;
    }

    /// Returns false if there is no such row.
    pub fn set_ingredient(&mut self, index: usize, text: &str) -> bool {
        set_row(&mut self.ingredients, index, text) && self.mark_dirty()
    }

    /// Returns false if there is no such row.
    pub fn set_step(&mut self, index: usize, text: &str) -> bool {
        set_row(&mut self.steps, index, text) && self.mark_dirty()
    }

    /// Receives the tag editor's value.
    pub fn set_tags(&mut self, tags: &[String]) {
        self.tags = tags.to_vec();
        self.dirty = true;
    }

    /// Append an empty ingredient row and return its index.
    pub fn add_ingredient(&mut self) -> usize {
        self.ingredients.push(String::new());
        self.ingredients.len() - 1
    }

    /// Remove an ingredient row. The last remaining row is never removed.
    pub fn remove_ingredient(&mut self, index: usize) -> bool {
        remove_row(&mut self.ingredients, index)
    }

    /// Append an empty step row and return its index.
    pub fn add_step(&mut self) -> usize {
        self.steps.push(String::new());
        self.steps.len() - 1
    }

    /// Remove a step row. The last remaining row is never removed.
    pub fn remove_step(&mut self, index: usize) -> bool {
        remove_row(&mut self.steps, index)
    }

    pub fn touch(&mut self, field: Field) {
        self.touched.insert(field);
    }

    pub fn mark_all_touched(&mut self) {
        self.touched.insert(Field::Name);
        self.touched.insert(Field::Description);
        self.touched.insert(Field::Tags);
        self.touched
            .extend((0..self.ingredients.len()).map(Field::Ingredient));
        self.touched.extend((0..self.steps.len()).map(Field::Step));
    }

    /// Every current validation error.
    pub fn errors(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        check_name(&self.name, &mut errors);
        check_required(Field::Description, &self.description, &mut errors);
        check_rows(&self.ingredients, Field::Ingredient, &mut errors);
        check_rows(&self.steps, Field::Step, &mut errors);

        if self.tags.len() > MAX_TAGS {
            errors.insert(
                Field::Tags,
                FieldError::MaxTags {
                    max: MAX_TAGS,
                    actual: self.tags.len(),
                },
            );
        }

        errors
    }

    /// Errors on fields the user has touched; what a UI shows inline.
    pub fn visible_errors(&self) -> FormErrors {
        let mut visible = FormErrors::default();
        for (field, error) in self.errors().iter() {
            if self.touched.contains(&field) {
                visible.insert(field, error.clone());
            }
        }
        visible
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// The recipe fields, trimmed, if the form is valid.
    pub fn validate(&self) -> Result<NewRecipe, FormErrors> {
        let errors = self.errors();
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewRecipe {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            tags: self.tags.clone(),
            ingredients: trimmed(&self.ingredients),
            steps: trimmed(&self.steps),
        })
    }

    /// Leaving a dirty, invalid form needs confirmation.
    pub fn can_leave(&self, confirm: &dyn Confirm) -> bool {
        if self.dirty && !self.is_valid() {
            confirm.confirm(UNSAVED_CHANGES_PROMPT)
        } else {
            true
        }
    }

    fn mark_dirty(&mut self) -> bool {
        self.dirty = true;
        true
    }
}

fn check_name(name: &str, errors: &mut FormErrors) {
    let len = name.trim().chars().count();
    if len == 0 {
        errors.insert(Field::Name, FieldError::Required);
    } else if len < NAME_MIN_LEN {
        errors.insert(
            Field::Name,
            FieldError::MinLength {
                required: NAME_MIN_LEN,
                actual: len,
            },
        );
    }
}

fn check_required(field: Field, value: &str, errors: &mut FormErrors) {
    if value.trim().is_empty() {
        errors.insert(field, FieldError::Required);
    }
}

/// At least one row, and no blank rows.
fn check_rows(rows: &[String], field: fn(usize) -> Field, errors: &mut FormErrors) {
    if rows.is_empty() {
        errors.insert(field(0), FieldError::Required);
    }
    for (i, row) in rows.iter().enumerate() {
        check_required(field(i), row, errors);
    }
}

fn trimmed(rows: &[String]) -> Vec<String> {
    rows.iter().map(|row| row.trim().to_string()).collect()
}

/// Check the fields a patch replaces and return it trimmed.
///
/// Replaced fields must keep a stored recipe valid. The tag limit only
/// applies when a recipe is created.
pub fn validate_patch(patch: RecipePatch) -> Result<RecipePatch, FormErrors> {
    let mut errors = FormErrors::default();
    if let Some(name) = &patch.name {
        check_name(name, &mut errors);
    }
    if let Some(description) = &patch.description {
        check_required(Field::Description, description, &mut errors);
    }
    if let Some(ingredients) = &patch.ingredients {
        check_rows(ingredients, Field::Ingredient, &mut errors);
    }
    if let Some(steps) = &patch.steps {
        check_rows(steps, Field::Step, &mut errors);
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(RecipePatch {
        name: patch.name.map(|name| name.trim().to_string()),
        description: patch.description.map(|d| d.trim().to_string()),
        tags: patch.tags,
        ingredients: patch.ingredients.as_deref().map(trimmed),
        steps: patch.steps.as_deref().map(trimmed),
    })
}

fn set_row(rows: &mut [String], index: usize, text: &str) -> bool {
    match rows.get_mut(index) {
        Some(row) => {
            *row = text.to_string();
            true
        }
        None => false,
    }
}

fn remove_row(rows: &mut Vec<String>, index: usize) -> bool {
    if rows.len() <= 1 || index >= rows.len() {
        return false;
    }
    rows.remove(index);
    true
}
