use anyhow::Context;
use job_dispatch::{build_router, config::ServerConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env()?;
    let state = AppState::from_config(&config);
    let app = build_router(state);

    log::info!("Server running at http://{}", config.bind_addr);
    log::info!("  API base:    http://{}/api", config.bind_addr);
    log::info!("  Roster file: {}", config.db_path.display());
    match config.rng_seed {
        Some(seed) => log::info!("  Tie-breaks:  seeded ({seed})"),
        None => log::info!("  Tie-breaks:  thread rng"),
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("bind {} failed", config.bind_addr))?;

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
