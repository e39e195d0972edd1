use anyhow::Context;

use glowcart_api::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    glowcart_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    let app = glowcart_api::app::build_app(&config).context("failed to wire services")?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        recommendation_limit = config.recommendation_limit,
        notifications = config.notifications,
        "listening"
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
