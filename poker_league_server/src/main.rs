use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use poker_league_core::{open_player_store, TokioBlindAlerter};
use poker_league_server::config::ServerConfig;
use poker_league_server::{serve, AppState, SharedState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let store = open_player_store(config.store_path.as_deref())?;
    let alerter = Arc::new(TokioBlindAlerter::current());
    let state = SharedState::new(AppState::texas_holdem(store, alerter));

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("无法监听 {}: {}", config.addr, e);
            return Err(e.into());
        }
    };
    serve(listener, state).await?;
    info!("服务器已停止");
    Ok(())
}
