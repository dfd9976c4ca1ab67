mod add;
mod browse;
mod delete;
mod list;
mod prompt;
mod show;
mod update;

use anyhow::Result;
use clap::{Parser, Subcommand};
use larder_core::{seed_source_from, FileStorage, RecipeStore, Settings};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "larder")]
#[command(about = "Larder recipe manager", long_about = None)]
struct Cli {
    /// Directory holding recipes.json
    #[arg(long, global = true, env = "LARDER_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Sample recipes (file path or URL) loaded into an empty store
    #[arg(long, global = true, env = "LARDER_SEED")]
    seed: Option<String>,

    /// Do not load sample recipes into an empty store
    #[arg(long, global = true)]
    no_seed: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List recipes, filtered and paginated
    List(list::ListArgs),
    /// Show one recipe
    Show {
        /// Recipe ID
        id: String,
    },
    /// Create a recipe
    Add(add::AddArgs),
    /// Change fields of an existing recipe
    Update(update::UpdateArgs),
    /// Delete a recipe
    Delete {
        /// Recipe ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// List every tag in use
    Tags,
    /// Interactive, filterable list
    Browse(browse::BrowseArgs),
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

async fn open_store(settings: &Settings, seed: bool) -> RecipeStore {
    let storage = Arc::new(FileStorage::new(&settings.data_dir));
    if seed {
        let source = seed_source_from(&settings.seed);
        RecipeStore::open(storage, source.as_ref()).await
    } else {
        RecipeStore::load(storage)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let mut settings = Settings::from_env();
    if let Some(dir) = cli.data_dir {
        settings = settings.data_dir(dir);
    }
    if let Some(seed) = cli.seed.as_deref() {
        settings = settings.seed(seed);
    }

    let store = open_store(&settings, !cli.no_seed).await;

    match cli.command {
        Commands::List(args) => list::list(&store, &settings, &args),
        Commands::Show { id } => show::show(&store, &id),
        Commands::Add(args) => add::add(&store, args),
        Commands::Update(args) => update::update(&store, args),
        Commands::Delete { id, yes } => delete::delete(&store, &id, yes),
        Commands::Tags => {
            for tag in store.all_tags() {
                println!("{tag}");
            }
            Ok(())
        }
        Commands::Browse(args) => browse::browse(&store, &settings, &args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_core::NewRecipe;

    #[tokio::test]
    async fn test_open_store_keeps_recipes_between_runs() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::default().data_dir(dir.path());

        let store = open_store(&settings, false).await;
        assert!(store.is_empty());
        store
            .add(NewRecipe {
                name: "Tea".to_string(),
                description: "Hot".to_string(),
                ingredients: vec!["water".to_string()],
                steps: vec!["boil".to_string()],
                tags: vec![],
            })
            .unwrap();

        let reopened = open_store(&settings, false).await;
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.snapshot()[0].name, "Tea");
    }

    #[test]
    fn test_cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["larder", "list", "--tag", "vegan", "--no-seed"]).unwrap();
        assert!(cli.no_seed);
        assert!(matches!(cli.command, Commands::List(_)));
    }
}
