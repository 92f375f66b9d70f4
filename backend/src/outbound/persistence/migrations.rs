//! Startup schema management via embedded Diesel migrations.
//!
//! The migration set is compiled into the binary, so a deployment needs no
//! migration files on disk. Running it is idempotent: already-applied
//! versions are skipped.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations compiled in from the crate's `migrations/` directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while bringing the schema up to date.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The store could not be reached for schema setup.
    #[error("failed to connect for schema setup: {message}")]
    Connection { message: String },

    /// A migration failed to apply.
    #[error("schema migration failed: {message}")]
    Migration { message: String },
}

/// Apply any pending migrations, creating the users table on first run.
///
/// Must be invoked once before the server starts serving traffic. Uses a
/// dedicated synchronous connection; migrations never run over the shared
/// async pool.
///
/// # Errors
///
/// Any failure here is fatal: the caller must abort startup rather than
/// serve against an unknown schema.
pub fn ensure_schema(database_url: &str) -> Result<(), SchemaError> {
    let mut conn = PgConnection::establish(database_url).map_err(|err| SchemaError::Connection {
        message: err.to_string(),
    })?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| SchemaError::Migration {
            message: err.to_string(),
        })?;

    for version in applied {
        info!(%version, "applied migration");
    }

    Ok(())
}
