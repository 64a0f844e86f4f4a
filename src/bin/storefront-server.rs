//! Storefront catalog API server.

use anyhow::Result;
use tracing::info;

use storefront_core::web::build_router;
use storefront_core::{AppState, StorefrontConfig};

#[tokio::main]
async fn main() -> Result<()> {
    storefront_core::logging::init_structured_logging();

    let config = StorefrontConfig::load()?;
    let bind_address = config.web.bind_address.clone();
    let auth_enabled = config.auth.enabled;

    let state = AppState::new(config);
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!(
        bind_address = %bind_address,
        auth_enabled,
        "Storefront catalog API listening"
    );

    axum::serve(listener, router).await?;

    Ok(())
}
