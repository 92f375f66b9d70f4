//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementation of the domain's `UserRepository` port backed by
//! PostgreSQL via Diesel, with async support through `diesel-async` and
//! `bb8` connection pooling.
//!
//! Row structs (`models`) and table definitions (`schema`) are internal to
//! this module; the domain only ever sees its own types and the port error
//! kinds. Schema setup runs once at startup through [`ensure_schema`].

mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, SchemaError, ensure_schema};
pub use pool::{DbPool, PoolConfig, PoolError};
