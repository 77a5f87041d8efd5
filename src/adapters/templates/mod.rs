//! Template adapters - HTML rendering for the site's pages.

mod minijinja_renderer;

pub use minijinja_renderer::MiniJinjaRenderer;
