//! Shared state for the site's handlers.

use std::sync::Arc;

use crate::ports::{DatabaseRepo, TemplateRenderer};

/// Dependencies every handler can reach. Cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn DatabaseRepo>,
    pub renderer: Arc<dyn TemplateRenderer>,
}

impl AppState {
    pub fn new(repo: Arc<dyn DatabaseRepo>, renderer: Arc<dyn TemplateRenderer>) -> Self {
        Self { repo, renderer }
    }
}
