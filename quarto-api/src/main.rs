//! Quarto Web API
//!
//! Serves one shared game to a browser front end. The front end holds no
//! game data of its own: it renders `GET /game` and dispatches the three
//! commands (`/select`, `/place`, `/reset`).

mod config;
mod models;
mod routes;

use anyhow::Context;
use clap::Parser;
use log::info;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = Config::parse();

    let app = routes::router(routes::new_state()).layer(config.cors()?);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Quarto API running on http://{}", addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
