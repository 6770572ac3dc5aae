use komodo_portal_api::cms::CmsClient;
use komodo_portal_api::server::{app, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up CMS_BASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = komodo_portal_api::config::config();
    tracing::info!("Starting Komodo Portal API in {:?} mode", config.environment);

    if komodo_portal_api::is_production!() && config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET must be set in production");
    }

    let store = CmsClient::new(&config.cms)?;
    let app = app(AppState::new(store));

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;

    tracing::info!("Listening on http://{} (CMS at {})", bind_addr, config.cms.base_url);

    axum::serve(listener, app).await?;
    Ok(())
}
