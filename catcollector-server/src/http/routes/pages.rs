//! Home and about pages

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::Router;

use crate::http::error::PageError;
use crate::http::extractors::MaybeUser;
use crate::http::server::AppState;
use crate::render::{render_page, NoContent, Page};

/// GET /
async fn home(
    State(state): State<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
) -> Result<Html<String>, PageError> {
    let mut page = Page::new(NoContent {});
    if let Some(u) = &user {
        page = page.for_user(u.username.as_str());
    }

    Ok(Html(render_page(&state.templates, "home", &page)?))
}

/// GET /about
async fn about(
    State(state): State<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
) -> Result<Html<String>, PageError> {
    let mut page = Page::new(NoContent {});
    if let Some(u) = &user {
        page = page.for_user(u.username.as_str());
    }

    Ok(Html(render_page(&state.templates, "about", &page)?))
}

/// Page routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
}
