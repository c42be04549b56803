use anyhow::Result;

use list_paginator::{app, config, domain::ItemCatalog, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = config::Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        base_uri = %settings.pagination.uri,
        default_limit = settings.pagination.query.limit.default,
        "Starting list-paginator"
    );

    let catalog = ItemCatalog::seeded(settings.seed_items);
    tracing::info!(items = settings.seed_items, "Item catalog seeded");

    // Create application state
    let state = app::AppState::new(settings.clone(), catalog);

    // Build application
    let app = app::create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
