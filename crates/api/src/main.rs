use std::sync::Arc;

use anyhow::Context;

use boardkit_api::app::{self, services};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    boardkit_observability::init();

    let jwt_secret = std::env::var("JWT_SECRET")
        .context("JWT_SECRET must be set (base64; decoded key must be at least 32 bytes)")?;

    let token_ttl_secs: i64 = match std::env::var("JWT_TTL_SECS") {
        Ok(raw) => raw.parse().context("JWT_TTL_SECS must be an integer")?,
        Err(_) => 3600,
    };

    let config = services::ApiConfig {
        jwt_secret_base64: jwt_secret,
        token_ttl: chrono::Duration::seconds(token_ttl_secs),
    };

    // A bad signing secret is fatal here, before the listener is bound.
    let app_services = Arc::new(services::build_services(&config)?);
    let app = app::build_app(app_services);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .context("failed to bind 0.0.0.0:8080")?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
