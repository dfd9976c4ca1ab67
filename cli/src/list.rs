use anyhow::Result;
use clap::Args;
use larder_core::routes::LIST_PATH;
use larder_core::{FilterState, ListSnapshot, ListView, Location, RecipeStore, Settings};

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Text to look for in name or description
    #[arg(long, short)]
    pub search: Option<String>,

    /// Only recipes carrying this tag (repeatable)
    #[arg(long = "tag", short)]
    pub tags: Vec<String>,

    /// Zero-based page index
    #[arg(long, short, default_value_t = 0)]
    pub page: usize,

    /// Recipes per page
    #[arg(long, env = "LARDER_PAGE_SIZE")]
    pub page_size: Option<usize>,
}

impl ListArgs {
    pub fn filter(&self) -> FilterState {
        FilterState {
            query: self.search.clone().unwrap_or_default(),
            tags: self.tags.iter().filter(|t| !t.is_empty()).cloned().collect(),
            page: self.page,
        }
    }
}

pub fn list(store: &RecipeStore, settings: &Settings, args: &ListArgs) -> Result<()> {
    let page_size = args.page_size.filter(|&n| n > 0).unwrap_or(settings.page_size);

    let mut view = ListView::new(store.snapshot(), page_size);
    view.apply_location(&Location::new(LIST_PATH, args.filter().to_params()));

    print!("{}", render_list(&view.snapshot()));
    Ok(())
}

pub fn render_list(snapshot: &ListSnapshot) -> String {
    if snapshot.total == 0 {
        return "No recipes found.\n".to_string();
    }

    let mut out = String::new();
    for recipe in &snapshot.recipes {
        out.push_str(&format!("{}  {}", recipe.id, recipe.name));
        if !recipe.tags.is_empty() {
            out.push_str(&format!("  [{}]", recipe.tags.join(", ")));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "Page {} of {} ({} recipes)\n",
        snapshot.page_index + 1,
        snapshot.page_count,
        snapshot.total
    ));
    out
}
