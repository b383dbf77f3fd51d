//! # sn-storage-sql
//!
//! `PostgreSQL` storage backend for the secure notes service, built on
//! `SQLx`.
//!
//! Provides [`PgAccountProvider`] and [`PgNoteProvider`], plus pool
//! construction and embedded migrations.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod account;
mod entities;
mod error;
pub mod note;
pub mod pool;

pub use account::PgAccountProvider;
pub use note::PgNoteProvider;
pub use pool::{create_pool, run_migrations, PoolConfig};
