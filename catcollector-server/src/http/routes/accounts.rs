//! Signup, login, and logout

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth;
use crate::db::repos::{DbError, SessionRepo, UserRepo};
use crate::models::{Password, Username};
use crate::render::{render_page, Page};

use crate::http::error::{redirect_found, PageError};
use crate::http::server::AppState;

/// Query parameters accepted by the login page
#[derive(Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

/// Signup form fields. Names match the account-creation form the
/// templates were written for: password twice, confirmed server-side.
#[derive(Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

/// Login form fields
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub next: String,
}

/// Data for the signup page
#[derive(Serialize)]
struct SignupData {
    username: String,
}

/// Data for the login page
#[derive(Serialize)]
struct LoginData {
    username: String,
    next: String,
}

/// GET /accounts/signup
async fn signup_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let page = Page::new(SignupData {
        username: String::new(),
    });

    Ok(Html(render_page(
        &state.templates,
        "registration/signup",
        &page,
    )?))
}

/// POST /accounts/signup
///
/// On success the new collector is signed in immediately and sent to
/// their (empty) cat index. On failure the form comes back with the
/// actual reason, not a catch-all message.
async fn signup(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SignupForm>,
) -> Result<Response, PageError> {
    let rejected = |message: String| -> Result<Response, PageError> {
        tracing::warn!(username = %form.username, "Signup rejected: {}", message);
        let page = Page::new(SignupData {
            username: form.username.clone(),
        })
        .with_error(Some(message));
        let body = render_page(&state.templates, "registration/signup", &page)?;
        Ok((StatusCode::BAD_REQUEST, Html(body)).into_response())
    };

    let username = match Username::new(&form.username) {
        Ok(u) => u,
        Err(e) => return rejected(e.to_string()),
    };
    let password = match Password::confirmed(&form.password1, &form.password2) {
        Ok(p) => p,
        Err(e) => return rejected(e.to_string()),
    };

    let hash = auth::hash_password(&password).map_err(|e| PageError::Internal {
        message: e.to_string(),
    })?;

    let user = match UserRepo::new(&state.pool).create(&username, &hash).await {
        Ok(user) => user,
        Err(DbError::Conflict { .. }) => return rejected("That username is taken.".into()),
        Err(e) => return Err(e.into()),
    };

    tracing::info!(username = %user.username, "New collector signed up");
    start_session(&state, user.id, "/cats").await
}

/// GET /accounts/login
async fn login_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LoginQuery>,
) -> Result<Html<String>, PageError> {
    let page = Page::new(LoginData {
        username: String::new(),
        next: sanitize_next(query.next.as_deref()),
    });

    Ok(Html(render_page(
        &state.templates,
        "registration/login",
        &page,
    )?))
}

/// POST /accounts/login
async fn login(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Result<Response, PageError> {
    let destination = sanitize_next((!form.next.is_empty()).then_some(form.next.as_str()));

    let user = UserRepo::new(&state.pool)
        .find_by_username(&form.username)
        .await?;

    let verified = match &user {
        Some(u) => match auth::verify_password(&form.password, &u.password_hash) {
            Ok(ok) => ok,
            Err(e) => {
                tracing::error!(username = %form.username, "Stored hash unreadable: {}", e);
                false
            }
        },
        None => false,
    };

    let Some(user) = user.filter(|_| verified) else {
        tracing::warn!(username = %form.username, "Failed login attempt");
        let page = Page::new(LoginData {
            username: form.username.clone(),
            next: form.next.clone(),
        })
        .with_error(Some("Username and password did not match.".into()));
        let body = render_page(&state.templates, "registration/login", &page)?;
        return Ok((StatusCode::UNAUTHORIZED, Html(body)).into_response());
    };

    // A login is a good moment to drop stale sessions
    match SessionRepo::new(&state.pool).delete_expired().await {
        Ok(0) => {}
        Ok(swept) => tracing::debug!(swept, "Expired sessions removed"),
        Err(e) => tracing::warn!("Expired session sweep failed: {}", e),
    }

    tracing::info!(username = %user.username, "Collector logged in");
    start_session(&state, user.id, &destination).await
}

/// POST /accounts/logout
async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, PageError> {
    if let Some(token) = auth::session_cookie_value(&headers) {
        SessionRepo::new(&state.pool)
            .delete(&auth::hash_token(&token))
            .await?;
    }

    let mut response = redirect_found("/");
    response
        .headers_mut()
        .insert(SET_COOKIE, cookie_header(auth::clear_session_cookie())?);

    Ok(response)
}

/// Create a session row, then redirect with the cookie installed.
async fn start_session(state: &AppState, user_id: Uuid, to: &str) -> Result<Response, PageError> {
    let token = auth::generate_token();
    SessionRepo::new(&state.pool)
        .create(user_id, &auth::hash_token(&token), auth::session_expiry())
        .await?;

    let mut response = redirect_found(to);
    response
        .headers_mut()
        .insert(SET_COOKIE, cookie_header(auth::set_session_cookie(&token))?);

    Ok(response)
}

fn cookie_header(value: String) -> Result<HeaderValue, PageError> {
    HeaderValue::from_str(&value).map_err(|_| PageError::Internal {
        message: "cookie value not header-safe".into(),
    })
}

/// Only same-site paths are allowed as post-login destinations.
fn sanitize_next(next: Option<&str>) -> String {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_owned(),
        _ => "/cats".to_owned(),
    }
}

/// Account routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/accounts/signup", get(signup_page).post(signup))
        .route("/accounts/login", get(login_page).post(login))
        .route("/accounts/logout", post(logout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_next_keeps_local_paths() {
        assert_eq!(sanitize_next(Some("/cats/abc")), "/cats/abc");
        assert_eq!(sanitize_next(Some("/toys")), "/toys");
    }

    #[test]
    fn sanitize_next_rejects_offsite_destinations() {
        assert_eq!(sanitize_next(Some("https://example.com")), "/cats");
        assert_eq!(sanitize_next(Some("//example.com")), "/cats");
        assert_eq!(sanitize_next(Some("cats")), "/cats");
        assert_eq!(sanitize_next(None), "/cats");
    }
}
