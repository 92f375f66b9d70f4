//! Service entry point: configuration, schema setup, and server startup.

mod server;

use actix_web::web;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::ServerConfig;
use user_registry::inbound::http::health::HealthState;
use user_registry::outbound::persistence::{DbPool, PoolConfig, ensure_schema};

/// Command-line and environment configuration.
///
/// The connection string is the single required external setting.
#[derive(Debug, Parser)]
#[command(name = "user-registry", about = "CRUD HTTP service over user records")]
struct Cli {
    /// PostgreSQL connection string for the backing store.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Socket address the HTTP server binds to.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind_addr: std::net::SocketAddr,
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();

    // Schema setup must complete before any traffic is served; a failure
    // here aborts startup.
    let database_url = cli.database_url.clone();
    web::block(move || ensure_schema(&database_url))
        .await
        .map_err(std::io::Error::other)?
        .map_err(std::io::Error::other)?;
    info!("database schema is up to date");

    let pool = DbPool::new(PoolConfig::new(&cli.database_url))
        .await
        .map_err(std::io::Error::other)?;

    let health_state = web::Data::new(HealthState::new());
    let http_server = server::create_server(
        health_state,
        ServerConfig::new(cli.bind_addr, pool),
    )?;
    info!(bind_addr = %cli.bind_addr, "listening");
    http_server.await
}
