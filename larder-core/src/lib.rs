pub mod config;
pub mod debounce;
pub mod error;
pub mod flows;
pub mod form;
pub mod highlight;
pub mod list_view;
pub mod location;
pub mod pagination;
pub mod routes;
pub mod search;
pub mod seed;
pub mod session;
pub mod storage;
pub mod store;
pub mod tag_editor;
pub mod types;

pub use config::Settings;
pub use error::{SeedError, StorageError, StoreError};
pub use flows::{
    delete_recipe, format_created, resolve_detail, submit_create, Confirm, CreateOutcome,
    DeleteOutcome, DetailOutcome, Preconfirmed,
};
pub use form::{validate_patch, Field, FieldError, FormErrors, RecipeForm};
pub use highlight::highlight;
pub use list_view::{ListSnapshot, ListView};
pub use location::{FilterState, History, Location, LocationUpdate, QueryParams};
pub use pagination::{paginate, Page, DEFAULT_PAGE_SIZE};
pub use routes::Route;
pub use search::{collect_tags, filter_recipes};
pub use seed::{seed_source_from, FileSeed, HttpSeed, SeedSource, StaticSeed};
pub use session::{ListEvent, ListSession, SessionClosed};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{RecipeStore, RecipesView};
pub use tag_editor::{Announcer, LogAnnouncer, TagEditor, TagKey};
pub use types::{NewRecipe, Recipe, RecipePatch};
