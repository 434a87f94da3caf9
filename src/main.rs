mod config;
mod db;
mod html;
mod model;
mod routes;
mod view;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;
use crate::routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "berita=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path = std::env::var("BERITA_CONFIG").unwrap_or_else(|_| "berita.toml".to_string());
    let config = Config::load(&config_path)?;
    info!(
        "Loaded {} wartawan and {} seed articles from {}",
        config.wartawan.len(),
        config.articles.len(),
        config_path
    );

    // Initialize database
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:berita.db?mode=rwc".to_string());
    let db = Database::new(&database_url).await?;
    db.initialize().await?;
    db.sync_wartawan(&config.wartawan).await?;
    let seeded = db.sync_articles(&config.articles).await?;
    let wartawan = db.get_all_wartawan().await?;
    info!(
        "Database initialized with {} wartawan, {} new articles seeded",
        wartawan.len(),
        seeded
    );

    let state = Arc::new(AppState {
        db: Arc::new(db),
        site_name: config.site_name.clone(),
        per_page: config.per_page,
    });

    let app = routes::router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen).await?;
    info!("Server starting on http://{}", config.listen);

    axum::serve(listener, app).await?;

    Ok(())
}
