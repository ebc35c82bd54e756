//! Lamp Bot - Entry point.

use anyhow::Context;
use lamp_bot::{
    api::{create_router, AppState},
    config::Config,
};
use lamp_client::LampClient;
use slack_client::SlackClient;
use std::net::SocketAddr;
use std::sync::Arc;
use team_registry::RegistryClient;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Lamp Bot");

    let lamp = LampClient::new(&config.lamp.url)
        .with_timeouts(config.lamp.connect_timeout, config.lamp.send_timeout)
        .with_close_timeout(config.lamp.close_timeout);
    info!("Lamp endpoint: {}", lamp.url());

    let users = SlackClient::new(&config.slack.api_url, config.slack.timeout)
        .context("Failed to create Slack client")?;

    let registry = &config.registry;
    let teams = RegistryClient::new(
        &registry.url,
        &registry.database,
        &registry.design_doc,
        &registry.view,
        registry.credentials(),
        registry.timeout,
    )
    .context("Failed to create registry client")?;
    info!("Team registry view: {}", teams.view_url().path());

    let state = AppState::new(
        config.slack.verification_token.clone(),
        config.lamp.name.clone(),
        Arc::new(lamp),
        Arc::new(teams),
        Arc::new(users),
    );
    let app = create_router(state);

    // Bind to address
    let addr = SocketAddr::new(
        config
            .server
            .listen_addr
            .parse()
            .with_context(|| format!("Invalid listen address {}", config.server.listen_addr))?,
        config.server.port,
    );

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
