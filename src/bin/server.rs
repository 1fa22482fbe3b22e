//! Taskforge HTTP server.
//!
//! Wires the configured storage adapters behind the ports and serves the
//! JSON API. `STORAGE=memory` (the default) keeps everything in-process;
//! `STORAGE=postgres` uses Diesel against `DATABASE_URL`.

use anyhow::Context;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use std::sync::Arc;
use taskforge::api::{self, AppState};
use taskforge::config::{ServerConfig, StorageBackend};
use taskforge::identity::adapters::postgres::PostgresUserRepository;
use taskforge::task::adapters::mailer::TracingHistoryMailer;
use taskforge::task::adapters::postgres::{PostgresTaskEventRepository, PostgresTaskRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let config = ServerConfig::from_env()?;
    let state = match config.storage {
        StorageBackend::Memory => AppState::in_memory(),
        StorageBackend::Postgres => postgres_state(&config)?,
    };

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("taskforge listening on http://{addr}");
    axum::serve(listener, api::router(state)).await?;
    Ok(())
}

fn postgres_state(config: &ServerConfig) -> anyhow::Result<AppState> {
    let database_url = config
        .database_url
        .clone()
        .context("DATABASE_URL is required when STORAGE=postgres")?;
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder().build(manager)?;

    Ok(AppState::new(
        Arc::new(PostgresUserRepository::new(pool.clone())),
        Arc::new(PostgresTaskRepository::new(pool.clone())),
        Arc::new(PostgresTaskEventRepository::new(pool)),
        Arc::new(TracingHistoryMailer::new()),
    ))
}
