//! Adapters - Implementations of port interfaces.
//!
//! - `http` - axum routes, handlers and the session middleware
//! - `postgres` - `DatabaseRepo` over PostgreSQL
//! - `storage` - in-memory and Redis session stores, in-memory repository
//! - `templates` - minijinja page renderer

pub mod http;
pub mod postgres;
pub mod storage;
pub mod templates;

pub use http::{app_router, AppState};
pub use postgres::PostgresDatabaseRepo;
pub use storage::{InMemoryDatabaseRepo, InMemorySessionStore, RedisSessionStore};
pub use templates::MiniJinjaRenderer;
