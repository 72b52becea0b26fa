use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use poker_league_core::{
    open_player_store, Cli, ConsoleSink, TexasHoldem, TokioBlindAlerter, STORE_PATH_ENV,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 日志写到 stderr，stdout 只留给对局的提示和盲注
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let store_path = std::env::var(STORE_PATH_ENV)
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);
    let store = open_player_store(store_path.as_deref())?;
    let game = Arc::new(TexasHoldem::new(Arc::new(TokioBlindAlerter::current()), store.clone()));

    println!("Let's play poker");
    println!("Type {{Name}} wins to record a win");

    let stdout = Arc::new(ConsoleSink::new(std::io::stdout()));
    let mut cli = Cli::new(BufReader::new(tokio::io::stdin()), stdout, game);
    cli.play_poker().await?;

    for player in store.get_league() {
        info!("{}: {} 胜", player.name, player.wins);
    }
    Ok(())
}
