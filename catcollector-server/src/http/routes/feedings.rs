//! Feeding creation

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::post;
use axum::{Form, Router};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::repos::{CatRepo, FeedingRepo};
use crate::models::{FeedingDate, MealKind};

use crate::http::error::{redirect_found, PageError};
use crate::http::extractors::CurrentUser;
use crate::http::server::AppState;

/// Feeding form fields
#[derive(Deserialize)]
pub struct FeedingForm {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub meal: String,
}

/// POST /cats/{cat_id}/add_feeding
///
/// Always sends the browser back to the detail page. A form that does
/// not validate creates nothing; the redirect carries the reason so
/// the page can say so instead of pretending the meal was logged.
async fn add_feeding(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(cat_id): Path<Uuid>,
    Form(form): Form<FeedingForm>,
) -> Result<Response, PageError> {
    CatRepo::new(&state.pool)
        .get_for_owner(cat_id, user.id)
        .await?;

    let parsed = FeedingDate::parse(&form.date).and_then(|date| {
        let meal = if form.meal.is_empty() {
            MealKind::default()
        } else {
            MealKind::from_code(&form.meal)?
        };
        Ok((date, meal))
    });

    match parsed {
        Ok((date, meal)) => {
            FeedingRepo::new(&state.pool)
                .create(cat_id, date, meal)
                .await?;
            Ok(redirect_found(&format!("/cats/{cat_id}")))
        }
        Err(e) => {
            tracing::warn!(%cat_id, "Feeding form rejected: {}", e);
            Ok(redirect_found(&format!(
                "/cats/{cat_id}?error={}",
                urlencoding::encode(&format!("Feeding not saved: {e}"))
            )))
        }
    }
}

/// Feeding routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/cats/{cat_id}/add_feeding", post(add_feeding))
}
