use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use lesk_server::config::Config;
use lesk_server::{AppState, app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::load();
    info!(
        addr = %config.listen_addr(),
        wordnet = %config.wordnet_path.display(),
        mode = ?config.wordnet_mode,
        rps = config.rate_limit_rps,
        burst = config.rate_limit_burst,
        "starting lesk-server"
    );

    let (tagger, lexicon) =
        lesk_wordnet::load_collaborators(&config.wordnet_path, config.wordnet_mode)?;
    let state = AppState {
        tagger: Arc::new(tagger),
        lexicon: Arc::new(lexicon),
    };

    let addr: SocketAddr = config
        .listen_addr()
        .parse()
        .with_context(|| format!("invalid listen address {}", config.listen_addr()))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("listening on {addr}");

    axum::serve(
        listener,
        app(state, config.rate_limit_rps, config.rate_limit_burst),
    )
    .await?;
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
