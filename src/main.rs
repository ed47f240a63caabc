use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coach_reservations::{app, config::Config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting coach reservations service ({})", config.app.environment);

    let addr: SocketAddr = format!("{}:{}", config.app.host, config.app.port).parse()?;
    let state = AppState::new(config);
    let summary = state.coach.summary();
    info!(
        "Coach ready: {} seats, {} prebooked, priority quota {}",
        summary.total, summary.reserved, summary.priority_quota_remaining
    );

    let router = app(state);

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router.into_make_service()).await?;

    Ok(())
}
