use crate::config::AppConfig;
use crate::db::{init_db, Database};
use crate::router::handle;
use astra::Server;
use std::net::SocketAddr;

mod config;
mod db;
mod domain;
mod errors;
mod filters;
mod imports;
mod responses;
mod router;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    if let Err(e) = run() {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    // 1️⃣ Create the database handle and apply the schema
    let db = Database::new(config.database_path.clone());
    init_db(&db, &config.schema_path)?;

    // 2️⃣ Start the server
    let addr: SocketAddr = config.bind_addr.parse()?;
    tracing::info!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(config.max_workers);

    // 3️⃣ Serve requests, passing db handle and config into closure
    server.serve(move |req, _info| match handle(req, &db, &config) {
        Ok(resp) => resp,
        Err(err) => templates::html_error_response(err),
    })?;

    tracing::info!("Server shut down cleanly.");
    Ok(())
}
