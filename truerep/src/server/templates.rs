//! Page rendering through minijinja.

use std::path::Path;

use minijinja::{path_loader, Environment};
use serde::Serialize;

use crate::config::STATIC_PREFIX;

/// Template rendered for `GET /`.
pub const INDEX_TEMPLATE: &str = "index.html";

/// Application name exposed to templates.
const APP_NAME: &str = "TrueRep";

/// Build a template environment that loads files lazily from `dir`.
///
/// A missing directory is not an error here; it surfaces when a page is
/// first rendered.
pub fn environment(dir: &Path) -> Environment<'static> {
    let mut env = Environment::new();
    env.set_loader(path_loader(dir.to_path_buf()));
    env
}

/// Values derived from the incoming request.
#[derive(Debug, Serialize)]
pub struct PageContext<'a> {
    pub app_name: &'a str,
    pub base_url: &'a str,
    pub path: &'a str,
    pub static_url: &'a str,
}

impl<'a> PageContext<'a> {
    pub const fn new(base_url: &'a str, path: &'a str) -> Self {
        Self {
            app_name: APP_NAME,
            base_url,
            path,
            static_url: STATIC_PREFIX,
        }
    }
}

/// Render the index page.
pub fn render_index(env: &Environment<'_>, ctx: &PageContext<'_>) -> Result<String, minijinja::Error> {
    env.get_template(INDEX_TEMPLATE)?.render(ctx)
}
