pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;
use crate::services::content::ContentClient;
use crate::services::storage::RecitationStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub store: Arc<RecitationStore>,
    pub content: ContentClient,
    pub config: Arc<Config>,
}

/// Build the full router for the given state.
pub fn app(state: AppState) -> Router {
    let recordings = ServeDir::new(state.store.root());
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health_check))
        // Recordings
        .route("/upload-recitation", post(routes::recitations::upload))
        .route("/get-recitations", get(routes::recitations::list))
        .route("/api/recitations/:filename", delete(routes::recitations::delete))
        .nest_service("/recitations", recordings)
        // Recitation checking
        .route("/api/recitation/check", post(routes::check::check))
        .route("/api/recitation/attempts", get(routes::check::attempts))
        // Quran
        .route("/api/quran/surahs", get(routes::quran::list_surahs))
        .route("/api/quran/surahs/:number", get(routes::quran::surah))
        .route("/api/quran/translations", get(routes::quran::translations))
        .route("/api/quran/juz", get(routes::quran::list_juz))
        .route("/api/quran/juz/:number", get(routes::quran::juz))
        .route("/api/quran/ayah-of-the-day", get(routes::quran::ayah_of_the_day))
        .route("/api/quran/voice-search", get(routes::quran::voice_search))
        // Hadith
        .route("/api/hadith/books", get(routes::hadith::books))
        .route("/api/hadith/books/:book/editions", get(routes::hadith::book_editions))
        .route("/api/hadith/editions/:edition", get(routes::hadith::edition_page))
        .route(
            "/api/hadith/editions/:edition/:number/download",
            get(routes::hadith::download),
        )
        .route("/api/hadith/of-the-day", get(routes::hadith::of_the_day))
        // Adhkar
        .route("/api/adhkar", get(routes::adhkar::categories))
        .route("/api/adhkar/:category", get(routes::adhkar::category))
        // Prayer times
        .route("/api/prayer-times", get(routes::prayer::prayer_times))
        // Bookmarks
        .route(
            "/api/bookmarks",
            get(routes::bookmarks::list).post(routes::bookmarks::add),
        )
        .route("/api/bookmarks/:surah", delete(routes::bookmarks::remove))
        .layer(body_limit)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    tracing::info!(
        "Storing recitations in {}",
        config.recitations_dir.display()
    );
    let store = RecitationStore::new(&config.recitations_dir, &config.public_base_url).await?;

    let state = AppState {
        db: Arc::new(db),
        store: Arc::new(store),
        content: ContentClient::new(config.upstream.clone())?,
        config: Arc::new(config),
    };

    let addr = state.config.bind_addr();
    let app = app(state);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
