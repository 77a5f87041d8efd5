//! HTTP handlers for the informational pages.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    response::Response,
    Json,
};
use serde::Serialize;

use crate::adapters::http::middleware::Visitor;
use crate::adapters::http::render::render_page;
use crate::adapters::http::AppState;
use crate::ports::{Fetched, TemplateData};

/// Session key holding the address the visitor first arrived from.
const REMOTE_IP: &str = "remote_ip";

/// GET /
///
/// Remembers the visitor's address so the about page can show it.
pub async fn home(
    State(state): State<AppState>,
    Visitor(session): Visitor,
    connect_info: Option<ConnectInfo<SocketAddr>>,
) -> Response {
    if let Some(ConnectInfo(addr)) = connect_info {
        if let Err(e) = session.put(REMOTE_IP, &addr.ip().to_string()).await {
            tracing::warn!(session_id = %session.id(), error = %e, "Failed to record remote address");
        }
    }
    render_page(state.renderer.as_ref(), &session, "home.page.html", TemplateData::new()).await
}

/// GET /about
pub async fn about(State(state): State<AppState>, Visitor(session): Visitor) -> Response {
    let mut data = TemplateData::new();
    match session.get::<String>(REMOTE_IP).await {
        Ok(Fetched::Found(ip)) => data = data.with_string(REMOTE_IP, ip),
        Ok(_) => {}
        Err(e) => {
            tracing::warn!(session_id = %session.id(), error = %e, "Failed to read remote address");
        }
    }
    render_page(state.renderer.as_ref(), &session, "about.page.html", data).await
}

/// GET /warlocks-lair
pub async fn warlocks_lair(State(state): State<AppState>, Visitor(session): Visitor) -> Response {
    render_page(
        state.renderer.as_ref(),
        &session,
        "warlocks-lair.page.html",
        TemplateData::new(),
    )
    .await
}

/// GET /warriors-den
pub async fn warriors_den(State(state): State<AppState>, Visitor(session): Visitor) -> Response {
    render_page(
        state.renderer.as_ref(),
        &session,
        "warriors-den.page.html",
        TemplateData::new(),
    )
    .await
}

/// GET /contact
pub async fn contact(State(state): State<AppState>, Visitor(session): Visitor) -> Response {
    render_page(
        state.renderer.as_ref(),
        &session,
        "contact.page.html",
        TemplateData::new(),
    )
    .await
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
