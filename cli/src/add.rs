use anyhow::{bail, Context, Result};
use clap::Args;
use larder_core::{submit_create, CreateOutcome, RecipeForm, RecipeStore, TagEditor, TagKey};
use std::io::{self, BufRead, Write};

use crate::prompt::{ask_line, ask_yes_no, LineConfirm};

#[derive(Args, Debug, Default)]
pub struct AddArgs {
    #[arg(long, short)]
    pub name: Option<String>,

    #[arg(long, short)]
    pub description: Option<String>,

    /// One ingredient (repeatable, in order)
    #[arg(long = "ingredient", short)]
    pub ingredients: Vec<String>,

    /// One step (repeatable, in order)
    #[arg(long = "step", short)]
    pub steps: Vec<String>,

    /// Comma-separated tags
    #[arg(long, short)]
    pub tags: Option<String>,

    /// Ask for each field on the terminal
    #[arg(long)]
    pub interactive: bool,
}

pub fn add(store: &RecipeStore, args: AddArgs) -> Result<()> {
    if args.interactive {
        return add_interactive(store, &mut io::stdin().lock(), &mut io::stdout());
    }

    let mut form = RecipeForm::new();
    fill_form(&mut form, &args, store.all_tags());

    match submit_create(&mut form, store) {
        CreateOutcome::Created { recipe, redirect } => {
            println!("Created {} ({})", recipe.name, redirect);
            Ok(())
        }
        CreateOutcome::Invalid(errors) => {
            for (field, error) in errors.iter() {
                eprintln!("{field}: {error}");
            }
            bail!("Recipe not saved: {} invalid field(s)", errors.len())
        }
        CreateOutcome::Failed(message) => bail!(message),
    }
}

fn fill_form(form: &mut RecipeForm, args: &AddArgs, candidates: Vec<String>) {
    if let Some(name) = &args.name {
        form.set_name(name);
    }
    if let Some(description) = &args.description {
        form.set_description(description);
    }
    for (i, ingredient) in args.ingredients.iter().enumerate() {
        if i > 0 {
            form.add_ingredient();
        }
        form.set_ingredient(i, ingredient);
    }
    for (i, step) in args.steps.iter().enumerate() {
        if i > 0 {
            form.add_step();
        }
        form.set_step(i, step);
    }
    if let Some(tags) = &args.tags {
        form.set_tags(&type_tags(TagEditor::new(candidates), tags));
    }
}

/// Feed typed text through a tag editor. Commas and newlines end a tag.
fn type_tags(mut editor: TagEditor, typed: &str) -> Vec<String> {
    for c in typed.chars() {
        editor.key(TagKey::from_char(c));
    }
    editor.key(TagKey::Enter);
    editor.blur();
    editor.value().to_vec()
}

/// Read rows until an empty line.
fn ask_rows(
    input: &mut impl BufRead,
    output: &mut impl Write,
    label: &str,
) -> Result<Vec<String>> {
    let mut rows = Vec::new();
    while let Some(row) = ask_line(input, output, &format!("{label} {}:", rows.len() + 1))? {
        if row.trim().is_empty() {
            break;
        }
        rows.push(row);
    }
    Ok(rows)
}

fn add_interactive(
    store: &RecipeStore,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    loop {
        let name = ask_line(input, output, "Name:")?.context("No input")?;
        let description = ask_line(input, output, "Description:")?.context("No input")?;
        writeln!(output, "Ingredients, one per line; empty line to finish.")?;
        let ingredients = ask_rows(input, output, "Ingredient")?;
        writeln!(output, "Steps, one per line; empty line to finish.")?;
        let steps = ask_rows(input, output, "Step")?;

        let candidates = store.all_tags();
        if !candidates.is_empty() {
            writeln!(output, "Existing tags: {}", candidates.join(", "))?;
        }
        let tags = ask_line(input, output, "Tags (comma-separated):")?.unwrap_or_default();

        let mut form = RecipeForm::new();
        fill_form(
            &mut form,
            &AddArgs {
                name: Some(name),
                description: Some(description),
                ingredients,
                steps,
                tags: Some(tags),
                interactive: true,
            },
            candidates,
        );

        match submit_create(&mut form, store) {
            CreateOutcome::Created { recipe, redirect } => {
                writeln!(output, "Created {} ({})", recipe.name, redirect)?;
                return Ok(());
            }
            CreateOutcome::Invalid(errors) => {
                for (field, error) in errors.iter() {
                    writeln!(output, "  {field}: {error}")?;
                }
            }
            CreateOutcome::Failed(message) => writeln!(output, "{message}")?,
        }

        if !ask_yes_no(input, output, "Try again?")?
            && form.can_leave(&LineConfirm::new(&mut *input, &mut *output))
        {
            bail!("Recipe not saved");
        }
    }
}
