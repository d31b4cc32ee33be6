//! Database layer - connection pool, migrations and repositories
//!
//! - Connection pool (max 5 connections)
//! - Idempotent migrations run at startup
//! - Rely on DB constraints, handle conflicts - no check-then-insert

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::create_pool;
pub use repos::*;
