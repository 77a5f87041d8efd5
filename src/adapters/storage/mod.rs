//! Storage Adapters
//!
//! ## Available Adapters
//!
//! - **InMemorySessionStore** - Session values in process memory
//! - **RedisSessionStore** - Session values in a Redis hash per visitor
//! - **InMemoryDatabaseRepo** - Rooms and reservations in memory (tests, local runs)
//!
//! ```ignore
//! use adapters::storage::{InMemoryDatabaseRepo, InMemorySessionStore};
//!
//! let sessions = InMemorySessionStore::with_lifetime(Duration::from_secs(3600));
//! let repo = InMemoryDatabaseRepo::with_seeded_rooms();
//! ```

mod in_memory_database_repo;
mod in_memory_session_store;
mod redis_session_store;

pub use in_memory_database_repo::InMemoryDatabaseRepo;
pub use in_memory_session_store::InMemorySessionStore;
pub use redis_session_store::RedisSessionStore;
