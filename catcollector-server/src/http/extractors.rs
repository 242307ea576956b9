//! Custom Axum extractors

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::auth;
use crate::db::repos::SessionRepo;

use super::error::PageError;
use super::server::AppState;

/// The signed-in collector, resolved from the session cookie.
///
/// Rejection is a 302 to the login page carrying the original path in
/// `next`, so the browser lands back where it was heading.
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
}

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = PageError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let next = parts.uri.path().to_owned();

        let token = auth::session_cookie_value(&parts.headers)
            .ok_or_else(|| PageError::Unauthenticated { next: next.clone() })?;

        let user = SessionRepo::new(&state.pool)
            .find_user(&auth::hash_token(&token))
            .await?
            .ok_or(PageError::Unauthenticated { next })?;

        Ok(Self {
            id: user.id,
            username: user.username,
        })
    }
}

/// Like [`CurrentUser`] but for pages anyone may see; the nav still
/// greets a signed-in collector. A stale or missing cookie is `None`.
pub struct MaybeUser(pub Option<CurrentUser>);

impl FromRequestParts<Arc<AppState>> for MaybeUser {
    type Rejection = PageError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = auth::session_cookie_value(&parts.headers) else {
            return Ok(Self(None));
        };

        let user = SessionRepo::new(&state.pool)
            .find_user(&auth::hash_token(&token))
            .await?;

        Ok(Self(user.map(|u| CurrentUser {
            id: u.id,
            username: u.username,
        })))
    }
}
