//! minijinja implementation of TemplateRenderer.
//!
//! Templates are compiled into the binary and parsed once, when the renderer
//! is built. A template that fails to parse stops startup.

use std::collections::BTreeMap;

use minijinja::{Environment, ErrorKind};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::forms::{Form, FormView};
use crate::ports::{RenderError, TemplateData, TemplateRenderer};

/// Base layout every page extends.
const LAYOUT: (&str, &str) = (
    "base.layout.html",
    include_str!("../../../templates/base.layout.html"),
);

/// Every renderable page.
const PAGES: &[(&str, &str)] = &[
    ("home.page.html", include_str!("../../../templates/home.page.html")),
    ("about.page.html", include_str!("../../../templates/about.page.html")),
    (
        "warlocks-lair.page.html",
        include_str!("../../../templates/warlocks-lair.page.html"),
    ),
    (
        "warriors-den.page.html",
        include_str!("../../../templates/warriors-den.page.html"),
    ),
    ("contact.page.html", include_str!("../../../templates/contact.page.html")),
    (
        "search-availability.page.html",
        include_str!("../../../templates/search-availability.page.html"),
    ),
    (
        "choose-room.page.html",
        include_str!("../../../templates/choose-room.page.html"),
    ),
    (
        "make-reservation.page.html",
        include_str!("../../../templates/make-reservation.page.html"),
    ),
    (
        "reservation-summary.page.html",
        include_str!("../../../templates/reservation-summary.page.html"),
    ),
];

/// Context handed to templates. `form` is never missing so pages can read
/// `form.errors.<field>` unconditionally.
#[derive(Serialize)]
struct PageContext<'a> {
    string_map: &'a BTreeMap<String, String>,
    data: &'a Map<String, Value>,
    flash: Option<&'a str>,
    warning: Option<&'a str>,
    error: Option<&'a str>,
    form: FormView,
}

impl<'a> PageContext<'a> {
    fn new(data: &'a TemplateData) -> Self {
        Self {
            string_map: &data.string_map,
            data: &data.data,
            flash: data.flash.as_deref(),
            warning: data.warning.as_deref(),
            error: data.error.as_deref(),
            form: data.form.clone().unwrap_or_else(|| Form::empty().view()),
        }
    }
}

/// Renders pages from the embedded template set.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Parses the layout and every page.
    ///
    /// # Errors
    ///
    /// `CacheBuild` naming the first template that fails to parse.
    pub fn new() -> Result<Self, RenderError> {
        let mut env = Environment::new();
        for &(name, source) in std::iter::once(&LAYOUT).chain(PAGES.iter()) {
            env.add_template(name, source)
                .map_err(|e| RenderError::CacheBuild(format!("{name}: {e}")))?;
        }
        tracing::debug!(pages = PAGES.len(), "Template cache built");
        Ok(Self { env })
    }

    /// Names of all renderable pages.
    pub fn pages(&self) -> impl Iterator<Item = &'static str> {
        PAGES.iter().map(|(name, _)| *name)
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, page: &str, data: &TemplateData) -> Result<String, RenderError> {
        let template = self.env.get_template(page).map_err(|e| match e.kind() {
            ErrorKind::TemplateNotFound => RenderError::UnknownPage(page.to_string()),
            _ => RenderError::Render {
                page: page.to_string(),
                message: e.to_string(),
            },
        })?;

        template
            .render(PageContext::new(data))
            .map_err(|e| RenderError::Render {
                page: page.to_string(),
                message: e.to_string(),
            })
    }
}

impl std::fmt::Debug for MiniJinjaRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiniJinjaRenderer")
            .field("pages", &PAGES.len())
            .finish()
    }
}
