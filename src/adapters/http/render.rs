//! Page rendering and redirect helpers shared by the HTML handlers.

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::application::VisitorSession;
use crate::ports::{TemplateData, TemplateRenderer};

/// Renders `page` after moving the visitor's pending notices into `data`.
pub async fn render_page(
    renderer: &dyn TemplateRenderer,
    session: &VisitorSession,
    page: &str,
    mut data: TemplateData,
) -> Response {
    let notices = session.take_notices().await;
    data.flash = data.flash.or(notices.flash);
    data.warning = data.warning.or(notices.warning);
    data.error = data.error.or(notices.error);

    match renderer.render(page, &data) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(code = %e.code(), page, error = %e, "Failed to render page");
            internal_error()
        }
    }
}

/// 303 See Other.
pub fn see_other(location: &'static str) -> Response {
    (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response()
}

/// 307 Temporary Redirect.
pub fn temporary_redirect(location: &'static str) -> Response {
    (StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response()
}

pub fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}
