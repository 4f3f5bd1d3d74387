#![warn(clippy::pedantic, clippy::all, clippy::nursery)]

use crate::{
    config::RuntimeConfiguration,
    data::postgres_store::PostgresStudentStore,
    error::{BindListenerSnafu, RegistryResult, ServeSnafu},
    state::RegistryState,
};
use snafu::ResultExt;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[macro_use]
extern crate tracing;

mod config;
mod data;
mod error;
mod maud_conveniences;
mod routes;
mod state;

async fn shutdown_signal(store: PostgresStudentStore) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    warn!("signal received, starting graceful shutdown");
    store.close().await;
}

#[tokio::main]
#[snafu::report]
async fn main() -> RegistryResult<()> {
    // loaded before tracing so that RUST_LOG can live in the .env file
    let dotenv = dotenvy::dotenv();

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish(),
    )
    .expect("unable to set tracing subscriber");

    info!("`tracing` online");

    match dotenv {
        Ok(path) => info!(?path, "Loaded env file"),
        Err(e) if e.not_found() => debug!("No env file found, using the process environment"),
        Err(e) => warn!(?e, "Unable to load env file"),
    }

    let config = RuntimeConfiguration::new()?;
    if config.is_production() {
        info!("Running in production: requiring SSL for the database");
    }

    let pool = PgPoolOptions::new().connect_lazy_with(config.connect_options()?);
    let store = PostgresStudentStore::new(pool);

    // a dead database shouldn't stop the server, requests will just 500 until it's back
    match store.check_connection().await {
        Ok(()) => info!("Successfully connected to PostgreSQL"),
        Err(e) => error!(?e, "Database connection error"),
    }

    let app = routes::router(RegistryState::new(Arc::new(store.clone())));

    let server_ip = config.server_ip();
    let listener = TcpListener::bind(server_ip)
        .await
        .context(BindListenerSnafu { address: server_ip })?;

    info!(?server_ip, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(store))
        .await
        .context(ServeSnafu)
}
