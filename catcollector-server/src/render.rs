//! HTML rendering
//!
//! Templates are compiled into the binary and registered once at
//! startup, so a malformed template fails the boot instead of the
//! first page visit. Handler data is plain serde structs.

use handlebars::Handlebars;
use serde::Serialize;

/// Every page template, registered under the name handlers render by.
/// Pages wrap themselves in the `layout` partial.
const TEMPLATES: &[(&str, &str)] = &[
    ("layout", include_str!("../templates/layout.hbs")),
    ("home", include_str!("../templates/home.hbs")),
    ("about", include_str!("../templates/about.hbs")),
    ("cats/index", include_str!("../templates/cats/index.hbs")),
    ("cats/detail", include_str!("../templates/cats/detail.hbs")),
    ("cats/form", include_str!("../templates/cats/form.hbs")),
    (
        "cats/confirm_delete",
        include_str!("../templates/cats/confirm_delete.hbs"),
    ),
    ("toys/index", include_str!("../templates/toys/index.hbs")),
    ("toys/detail", include_str!("../templates/toys/detail.hbs")),
    ("toys/form", include_str!("../templates/toys/form.hbs")),
    (
        "toys/confirm_delete",
        include_str!("../templates/toys/confirm_delete.hbs"),
    ),
    (
        "registration/signup",
        include_str!("../templates/registration/signup.hbs"),
    ),
    (
        "registration/login",
        include_str!("../templates/registration/login.hbs"),
    ),
];

/// Rendering error type
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("template registration failed: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("template render failed: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// Build the template registry.
pub fn build_registry() -> Result<Handlebars<'static>, RenderError> {
    let mut registry = Handlebars::new();
    for (name, source) in TEMPLATES {
        registry.register_template_string(name, *source)?;
    }

    Ok(registry)
}

/// Render a registered template to a full HTML page.
pub fn render_page<T: Serialize>(
    registry: &Handlebars<'static>,
    name: &str,
    data: &T,
) -> Result<String, RenderError> {
    Ok(registry.render(name, data)?)
}

/// Content for pages that carry nothing beyond the shared chrome.
#[derive(Debug, Serialize)]
pub struct NoContent {}

/// Common wrapper every page renders through: the signed-in username
/// for the nav bar plus an optional one-shot error banner, flattened
/// alongside the page's own fields.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub current_user: Option<String>,
    pub error: Option<String>,
    #[serde(flatten)]
    pub content: T,
}

impl<T: Serialize> Page<T> {
    pub fn new(content: T) -> Self {
        Self {
            current_user: None,
            error: None,
            content,
        }
    }

    #[must_use]
    pub fn for_user(mut self, username: impl Into<String>) -> Self {
        self.current_user = Some(username.into());
        self
    }

    #[must_use]
    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }
}
