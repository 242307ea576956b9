//! Page error types with IntoResponse
//!
//! This is an HTML app, not a JSON API: errors become redirects or
//! short plain pages with the right status code. Anything worth an
//! operator's attention is logged before the response goes out.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::db::repos::DbError;
use crate::models::ValidationError;
use crate::render::RenderError;
use crate::storage::StoreError;

/// Build a 302 Found redirect.
///
/// `Redirect::to` emits 303; browser form flows here keep the classic
/// 302 POST-redirect-GET contract.
pub fn redirect_found(location: &str) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, location.to_owned())],
    )
        .into_response()
}

/// Page error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum PageError {
    /// No valid session (302 to login, original path in `next`)
    Unauthenticated { next: String },

    /// Validation failed (400)
    Validation(ValidationError),

    /// Unreadable multipart upload (400)
    BadUpload { message: String },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Database error (500, logged)
    Database(DbError),

    /// Object storage error (500, logged)
    Storage(StoreError),

    /// Template error (500, logged)
    Render(RenderError),

    /// Internal error (500, logged)
    Internal { message: String },
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthenticated { next } => redirect_found(&format!(
                "/accounts/login?next={}",
                urlencoding::encode(&next)
            )),
            Self::Validation(e) => {
                (StatusCode::BAD_REQUEST, format!("Bad request: {e}")).into_response()
            }
            Self::BadUpload { message } => {
                tracing::warn!("Unreadable upload: {}", message);
                (StatusCode::BAD_REQUEST, "Upload could not be read.").into_response()
            }
            Self::NotFound { resource, .. } => {
                (StatusCode::NOT_FOUND, format!("No such {resource}.")).into_response()
            }
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                internal_response()
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {}", e);
                internal_response()
            }
            Self::Render(e) => {
                tracing::error!("Render error: {}", e);
                internal_response()
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                internal_response()
            }
        }
    }
}

fn internal_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Something went wrong on our side.",
    )
        .into_response()
}

impl From<ValidationError> for PageError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for PageError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            _ => Self::Database(e),
        }
    }
}

impl From<StoreError> for PageError {
    fn from(e: StoreError) -> Self {
        Self::Storage(e)
    }
}

impl From<RenderError> for PageError {
    fn from(e: RenderError) -> Self {
        Self::Render(e)
    }
}
