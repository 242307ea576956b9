//! Toy pages - the shared toy chest
//!
//! Toys belong to everyone: any signed-in collector may add, edit, or
//! delete them. Only the cat association is per-collector.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::repos::{Toy, ToyRepo};
use crate::models::{ToyColor, ToyName, ValidationError};
use crate::render::{render_page, Page};

use crate::http::error::{redirect_found, PageError};
use crate::http::extractors::CurrentUser;
use crate::http::server::AppState;

/// Toy form fields (create and update)
#[derive(Deserialize)]
pub struct ToyForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
}

/// Toy fields as the templates see them
#[derive(Serialize)]
pub(crate) struct ToyView {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) color: String,
}

impl From<Toy> for ToyView {
    fn from(t: Toy) -> Self {
        Self {
            id: t.id.to_string(),
            name: t.name,
            color: t.color,
        }
    }
}

#[derive(Serialize)]
struct ToyIndexData {
    toys: Vec<ToyView>,
}

#[derive(Serialize)]
struct ToyFormData {
    heading: String,
    action: String,
    name: String,
    color: String,
}

impl ToyFormData {
    fn blank(action: &str, heading: &str) -> Self {
        Self {
            heading: heading.into(),
            action: action.into(),
            name: String::new(),
            color: String::new(),
        }
    }

    fn refill(action: &str, heading: &str, form: &ToyForm) -> Self {
        Self {
            heading: heading.into(),
            action: action.into(),
            name: form.name.clone(),
            color: form.color.clone(),
        }
    }

    fn from_toy(toy: &Toy) -> Self {
        Self {
            heading: format!("Edit {}", toy.name),
            action: format!("/toys/{}/update", toy.id),
            name: toy.name.clone(),
            color: toy.color.clone(),
        }
    }
}

/// Validated toy fields
struct ToyFields {
    name: ToyName,
    color: ToyColor,
}

fn validate_toy_form(form: &ToyForm) -> Result<ToyFields, ValidationError> {
    Ok(ToyFields {
        name: ToyName::new(&form.name)?,
        color: ToyColor::new(&form.color)?,
    })
}

/// GET /toys
async fn index(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Html<String>, PageError> {
    let toys = ToyRepo::new(&state.pool).list().await?;

    let page = Page::new(ToyIndexData {
        toys: toys.into_iter().map(ToyView::from).collect(),
    })
    .for_user(user.username.as_str());

    Ok(Html(render_page(&state.templates, "toys/index", &page)?))
}

/// GET /toys/{toy_id}
async fn detail(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(toy_id): Path<Uuid>,
) -> Result<Html<String>, PageError> {
    let toy = ToyRepo::new(&state.pool).get(toy_id).await?;

    let page = Page::new(ToyView::from(toy)).for_user(user.username.as_str());

    Ok(Html(render_page(&state.templates, "toys/detail", &page)?))
}

/// GET /toys/create
async fn create_page(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Html<String>, PageError> {
    let page = Page::new(ToyFormData::blank("/toys/create", "Add a Toy"))
        .for_user(user.username.as_str());

    Ok(Html(render_page(&state.templates, "toys/form", &page)?))
}

/// POST /toys/create
async fn create(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Form(form): Form<ToyForm>,
) -> Result<Response, PageError> {
    let fields = match validate_toy_form(&form) {
        Ok(fields) => fields,
        Err(e) => {
            let page = Page::new(ToyFormData::refill("/toys/create", "Add a Toy", &form))
                .for_user(user.username.as_str())
                .with_error(Some(e.to_string()));
            let body = render_page(&state.templates, "toys/form", &page)?;
            return Ok((StatusCode::BAD_REQUEST, Html(body)).into_response());
        }
    };

    let toy = ToyRepo::new(&state.pool)
        .create(&fields.name, &fields.color)
        .await?;

    tracing::info!(toy = %toy.name, by = %user.username, "Toy added to the chest");
    Ok(redirect_found(&format!("/toys/{}", toy.id)))
}

/// GET /toys/{toy_id}/update
async fn update_page(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(toy_id): Path<Uuid>,
) -> Result<Html<String>, PageError> {
    let toy = ToyRepo::new(&state.pool).get(toy_id).await?;

    let page = Page::new(ToyFormData::from_toy(&toy)).for_user(user.username.as_str());

    Ok(Html(render_page(&state.templates, "toys/form", &page)?))
}

/// POST /toys/{toy_id}/update
async fn update(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(toy_id): Path<Uuid>,
    Form(form): Form<ToyForm>,
) -> Result<Response, PageError> {
    let action = format!("/toys/{toy_id}/update");

    let fields = match validate_toy_form(&form) {
        Ok(fields) => fields,
        Err(e) => {
            let page = Page::new(ToyFormData::refill(&action, "Edit Toy", &form))
                .for_user(user.username.as_str())
                .with_error(Some(e.to_string()));
            let body = render_page(&state.templates, "toys/form", &page)?;
            return Ok((StatusCode::BAD_REQUEST, Html(body)).into_response());
        }
    };

    ToyRepo::new(&state.pool)
        .update(toy_id, &fields.name, &fields.color)
        .await?;

    Ok(redirect_found(&format!("/toys/{toy_id}")))
}

/// GET /toys/{toy_id}/delete - confirmation page
async fn delete_page(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(toy_id): Path<Uuid>,
) -> Result<Html<String>, PageError> {
    let toy = ToyRepo::new(&state.pool).get(toy_id).await?;

    let page = Page::new(ToyView::from(toy)).for_user(user.username.as_str());

    Ok(Html(render_page(
        &state.templates,
        "toys/confirm_delete",
        &page,
    )?))
}

/// POST /toys/{toy_id}/delete
async fn delete(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(toy_id): Path<Uuid>,
) -> Result<Response, PageError> {
    ToyRepo::new(&state.pool).delete(toy_id).await?;

    tracing::info!(%toy_id, by = %user.username, "Toy removed from the chest");
    Ok(redirect_found("/toys"))
}

/// Toy routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/toys", get(index))
        .route("/toys/create", get(create_page).post(create))
        .route("/toys/{toy_id}", get(detail))
        .route("/toys/{toy_id}/update", get(update_page).post(update))
        .route("/toys/{toy_id}/delete", get(delete_page).post(delete))
}
