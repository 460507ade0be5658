use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use room_admin::{
    app,
    config::{Config, LogFormat},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    let registry = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log));
    match config.app.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    info!("Starting Room Admin API ({})", config.app.environment);

    // Seed every list view from its fixture
    let state = AppState::new(config.clone()).await;
    info!(
        "Views loaded: {} rooms, {} users, {} bookings",
        state.rooms.len().await,
        state.users.len().await,
        state.bookings.len().await
    );
    for (view, empty) in [
        ("rooms", state.rooms.is_empty().await),
        ("users", state.users.is_empty().await),
        ("bookings", state.bookings.is_empty().await),
    ] {
        if empty {
            warn!("{} view starts empty; check {}", view, config.fixtures.dir.display());
        }
    }

    let addr: SocketAddr = format!("{}:{}", config.app.host, config.app.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state).into_make_service()).await?;
    Ok(())
}
