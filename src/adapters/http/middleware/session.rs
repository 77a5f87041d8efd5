//! Session middleware and extractor for axum.
//!
//! - `session_middleware` - reads or issues the signed session cookie and
//!   injects a [`VisitorSession`] into request extensions
//! - `Visitor` - extractor handing that session to handlers
//!
//! ```text
//! Request → session_middleware → injects VisitorSession into extensions
//!                                        ↓
//!                                Handler → Visitor extractor reads from extensions
//!                                        ↓
//! Response ← Set-Cookie: session=<uuid>.<hmac>; Max-Age=…; HttpOnly; SameSite=Lax
//! ```
//!
//! The cookie value is the session id followed by a hex HMAC-SHA256 of it.
//! A cookie with a bad signature is ignored and a fresh session issued.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::application::VisitorSession;
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

type HmacSha256 = Hmac<Sha256>;

/// Signs and verifies session cookie values.
#[derive(Clone)]
pub struct CookieSigner {
    mac: HmacSha256,
}

impl CookieSigner {
    /// # Errors
    ///
    /// Only if the HMAC implementation rejects the key length.
    pub fn new(secret: &SecretString) -> Result<Self, hmac::digest::InvalidLength> {
        let mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())?;
        Ok(Self { mac })
    }

    fn signature(&self, payload: &str) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }

    /// `<session id>.<hex signature>`
    pub fn sign(&self, id: &SessionId) -> String {
        let payload = id.to_string();
        let signature = hex::encode(self.signature(&payload));
        format!("{payload}.{signature}")
    }

    /// Session id carried by a correctly signed cookie value.
    pub fn verify(&self, value: &str) -> Option<SessionId> {
        let (payload, signature) = value.split_once('.')?;
        let provided = hex::decode(signature).ok()?;
        let expected = self.signature(payload);

        if expected.as_slice().ct_eq(provided.as_slice()).unwrap_u8() != 1 {
            return None;
        }
        payload.parse().ok()
    }
}

impl std::fmt::Debug for CookieSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieSigner").finish_non_exhaustive()
    }
}

/// Attributes of the session cookie.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    pub max_age_secs: u64,
    pub secure: bool,
}

impl CookieSettings {
    fn set_cookie(&self, value: &str) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            self.name, value, self.max_age_secs
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

/// Everything the session middleware needs.
#[derive(Clone)]
pub struct SessionLayer {
    store: Arc<dyn SessionStore>,
    signer: CookieSigner,
    cookie: CookieSettings,
}

impl SessionLayer {
    pub fn new(store: Arc<dyn SessionStore>, signer: CookieSigner, cookie: CookieSettings) -> Self {
        Self {
            store,
            signer,
            cookie,
        }
    }

    /// Session id from a request's `Cookie` headers, if one is validly signed.
    fn session_from_headers(&self, headers: &axum::http::HeaderMap) -> Option<SessionId> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|h| h.to_str().ok())
            .flat_map(|h| h.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .filter(|(name, _)| *name == self.cookie.name)
            .find_map(|(_, value)| self.signer.verify(value))
    }
}

/// Session middleware state.
pub type SessionState = Arc<SessionLayer>;

/// Resolves the visitor's session and refreshes its cookie.
///
/// 1. Reads the session cookie and verifies its signature
/// 2. Issues a new session id if it is missing or tampered with
/// 3. Injects `VisitorSession` into request extensions
/// 4. Sets the cookie on the response so its `Max-Age` slides with use
pub async fn session_middleware(
    State(layer): State<SessionState>,
    mut request: Request,
    next: Next,
) -> Response {
    let id = match layer.session_from_headers(request.headers()) {
        Some(id) => id,
        None => {
            let id = SessionId::new();
            tracing::debug!(session_id = %id, "Issuing new session");
            id
        }
    };

    request
        .extensions_mut()
        .insert(VisitorSession::new(id, layer.store.clone()));

    let mut response = next.run(request).await;

    match HeaderValue::from_str(&layer.cookie.set_cookie(&layer.signer.sign(&id))) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(e) => {
            tracing::error!(session_id = %id, error = %e, "Session cookie is not a valid header");
        }
    }
    response
}

/// Extractor for the visitor's session.
///
/// Requires `session_middleware` on the route; without it the request
/// fails with 500.
#[derive(Debug, Clone)]
pub struct Visitor(pub VisitorSession);

impl<S> axum::extract::FromRequestParts<S> for Visitor
where
    S: Send + Sync,
{
    type Rejection = SessionRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<VisitorSession>()
                .cloned()
                .map(Visitor)
                .ok_or(SessionRejection::MissingSession)
        })
    }
}

/// Rejection when no session was attached to the request.
#[derive(Debug, Clone)]
pub enum SessionRejection {
    MissingSession,
}

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        match self {
            SessionRejection::MissingSession => {
                tracing::error!("Session middleware not installed on route");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
