//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the reservation workflow and the outside world. Adapters implement them.
//!
//! - `DatabaseRepo` - Room and reservation persistence
//! - `SessionStore` - Per-visitor key/value session storage
//! - `TemplateRenderer` - Page rendering

mod database_repo;
mod session_store;
mod template_renderer;

pub use database_repo::{DatabaseRepo, RepoError};
pub use session_store::{Fetched, SessionStore, SessionStoreError, SessionValue};
pub use template_renderer::{RenderError, TemplateData, TemplateRenderer};
