//! Common test utilities and fixtures for integration tests.
//!
//! Each `TestContext` gets its own in-memory SQLite database, a temporary
//! recordings directory, and a fake of the third-party content APIs on a
//! local port, so the tests need no external services.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use sqlx::sqlite::SqlitePoolOptions;
use tempfile::TempDir;

use fixtures::UpstreamHits;

use quran_companion_backend::config::{Config, UpstreamUrls};
use quran_companion_backend::db::Database;
use quran_companion_backend::services::content::ContentClient;
use quran_companion_backend::services::storage::RecitationStore;
use quran_companion_backend::AppState;
use recitation_core::Threshold;

pub const PUBLIC_BASE_URL: &str = "http://localhost:5000";

/// Upload limit used by the test server.
pub const MAX_UPLOAD_BYTES: usize = 64 * 1024;

/// Test context holding the app and the resources backing it.
pub struct TestContext {
    pub db: Arc<Database>,
    pub recordings: TempDir,
    pub upstream_url: String,
    pub upstream_hits: Arc<UpstreamHits>,
    app: Router,
}

impl TestContext {
    /// Create a new test context.
    ///
    /// # Panics
    /// Panics if the database, the recordings directory or the fake
    /// upstream cannot be set up.
    pub async fn new() -> Self {
        let (upstream_url, upstream_hits) = fixtures::spawn_upstream().await;

        // One connection that never closes: every connection to
        // `sqlite::memory:` would otherwise open a fresh database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");

        let db = Database::from_pool(pool);
        db.run_migrations()
            .await
            .expect("Failed to run migrations");
        let db = Arc::new(db);

        let recordings = tempfile::tempdir().expect("Failed to create recordings dir");
        let store = RecitationStore::new(recordings.path(), PUBLIC_BASE_URL)
            .await
            .expect("Failed to open recordings store");

        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            database_url: "sqlite::memory:".to_string(),
            recitations_dir: recordings.path().to_path_buf(),
            public_base_url: PUBLIC_BASE_URL.to_string(),
            pronunciation_threshold: Threshold::default(),
            max_upload_bytes: MAX_UPLOAD_BYTES,
            upstream: UpstreamUrls {
                quran: format!("{}/quran", upstream_url),
                hadith: format!("{}/hadith", upstream_url),
                adhkar: format!("{}/adhkar.json", upstream_url),
                prayer: format!("{}/prayer", upstream_url),
                geocode: format!("{}/geocode", upstream_url),
            },
        };

        // The fake upstream is local; never route it through a proxy.
        let http = reqwest::Client::builder()
            .no_proxy()
            .build()
            .expect("Failed to build HTTP client");

        let state = AppState {
            db: db.clone(),
            store: Arc::new(store),
            content: ContentClient::with_client(config.upstream.clone(), http),
            config: Arc::new(config),
        };

        Self {
            db,
            recordings,
            upstream_url,
            upstream_hits,
            app: quran_companion_backend::app(state),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Test server over the app router.
    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("Failed to start test server")
    }
}
