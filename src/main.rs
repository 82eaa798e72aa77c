use anyhow::Result;
use std::sync::Arc;

use qc_brief_services::{config, logging, routes, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    logging::init_logging()?;

    // Load configuration
    let config = config::Config::new()?;
    let addr = config.bind_addr;
    tracing::info!(
        "Extracting for {} with {} catalog metrics",
        config.brief.department,
        config.brief.catalog.len()
    );

    // Compile the catalog once for every request
    let state = Arc::new(AppState::new(config)?);
    let app = routes::app(state);

    // Run it
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
