//! HTTP middleware for axum.
//!
//! - `session` - Signed session cookie middleware and the `Visitor` extractor

pub mod session;

pub use session::{
    session_middleware, CookieSettings, CookieSigner, SessionLayer, SessionRejection,
    SessionState, Visitor,
};
