//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresDatabaseRepo` - rooms, reservations and room restrictions

mod database_repo;

pub use database_repo::PostgresDatabaseRepo;
