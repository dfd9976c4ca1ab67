mod api;

use anyhow::Context;
use axum::extract::MatchedPath;
use axum::http::{Request, Response};
use axum::Router;
use larder_core::{seed_source_from, FileStorage, RecipeStore, Settings};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::Span;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use utoipa_swagger_ui::SwaggerUi;

pub struct App {
    pub store: RecipeStore,
    pub settings: Settings,
}

/// Application state shared across all handlers
pub type AppState = Arc<App>;

fn init_telemetry() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn app(state: AppState) -> Router {
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    api::router()
        .merge(swagger_ui)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    // Route template, not the concrete path.
                    let route = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map_or(request.uri().path(), MatchedPath::as_str);
                    tracing::info_span!("request", method = %request.method(), route)
                })
                .on_response(|response: &Response<_>, latency: Duration, _: &Span| {
                    tracing::info!(
                        status = response.status().as_u16(),
                        ms = latency.as_millis() as u64,
                        "served"
                    );
                }),
        )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        println!("{}", api::openapi().to_pretty_json()?);
        return Ok(());
    }

    init_telemetry();

    let settings = Settings::from_env();
    let storage = Arc::new(FileStorage::new(&settings.data_dir));
    tracing::info!("Storing recipes in {}", storage.data_dir().display());

    let state: AppState = Arc::new(App {
        store: RecipeStore::load(storage),
        settings,
    });

    // The list stays empty until the seed arrives.
    let seeding = state.clone();
    tokio::spawn(async move {
        let seed = seed_source_from(&seeding.settings.seed);
        if seeding.store.seed_if_empty(seed.as_ref()).await {
            tracing::info!(count = seeding.store.len(), "Loaded sample recipes from {}", seed.describe());
        }
    });

    let listener = tokio::net::TcpListener::bind(&state.settings.bind)
        .await
        .with_context(|| format!("Failed to bind {}", state.settings.bind))?;
    let addr = listener.local_addr()?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
