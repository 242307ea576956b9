//! Cat pages - index, detail, create, update, delete, toy association
//!
//! Everything here runs as the signed-in collector; the repository
//! scopes each query to them, so another collector's cat simply 404s.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::repos::{Cat, CatRepo, DbError, Feeding, FeedingRepo, Photo, PhotoRepo, Toy};
use crate::models::{Breed, CatAge, CatDescription, CatName, MealKind, ValidationError};
use crate::render::{render_page, Page};

use crate::http::error::{redirect_found, PageError};
use crate::http::extractors::CurrentUser;
use crate::http::server::AppState;

use super::toys::ToyView;

/// Cat form fields (create and update). Any extra submitted field,
/// such as an owner, is dropped here.
#[derive(Deserialize)]
pub struct CatForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub breed: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub age: String,
}

/// Query parameters on the detail page
#[derive(Deserialize)]
pub struct DetailQuery {
    pub error: Option<String>,
}

/// Cat fields as the templates see them
#[derive(Serialize)]
struct CatView {
    id: String,
    name: String,
    breed: String,
    description: String,
    age: i32,
    age_display: String,
}

impl From<Cat> for CatView {
    fn from(c: Cat) -> Self {
        let age_display = match c.age {
            0 => "Still a kitten".to_string(),
            1 => "1 year old".to_string(),
            n => format!("{n} years old"),
        };

        Self {
            id: c.id.to_string(),
            name: c.name,
            breed: c.breed,
            description: c.description,
            age: c.age,
            age_display,
        }
    }
}

#[derive(Serialize)]
struct FeedingView {
    date: String,
    meal_label: String,
}

impl From<Feeding> for FeedingView {
    fn from(f: Feeding) -> Self {
        Self {
            date: f.date.format("%Y-%m-%d").to_string(),
            meal_label: MealKind::label_for_code(&f.meal),
        }
    }
}

#[derive(Serialize)]
struct PhotoView {
    url: String,
}

impl From<Photo> for PhotoView {
    fn from(p: Photo) -> Self {
        Self { url: p.url }
    }
}

/// Available toy plus the link that hands it over
#[derive(Serialize)]
struct AvailableToyView {
    id: String,
    name: String,
    color: String,
    assoc_url: String,
}

fn available_toy_view(cat_id: Uuid, toy: Toy) -> AvailableToyView {
    AvailableToyView {
        assoc_url: format!("/cats/{cat_id}/assoc_toy/{}", toy.id),
        id: toy.id.to_string(),
        name: toy.name,
        color: toy.color,
    }
}

#[derive(Serialize)]
struct CatIndexData {
    cats: Vec<CatView>,
}

#[derive(Serialize)]
struct CatDetailData {
    cat: CatView,
    feedings: Vec<FeedingView>,
    toys: Vec<ToyView>,
    available_toys: Vec<AvailableToyView>,
    photos: Vec<PhotoView>,
}

/// Form page data, shared by create and update
#[derive(Serialize)]
struct CatFormData {
    heading: String,
    action: String,
    name: String,
    breed: String,
    description: String,
    age: String,
}

impl CatFormData {
    fn blank(action: &str, heading: &str) -> Self {
        Self {
            heading: heading.into(),
            action: action.into(),
            name: String::new(),
            breed: String::new(),
            description: String::new(),
            age: String::new(),
        }
    }

    fn refill(action: &str, heading: &str, form: &CatForm) -> Self {
        Self {
            heading: heading.into(),
            action: action.into(),
            name: form.name.clone(),
            breed: form.breed.clone(),
            description: form.description.clone(),
            age: form.age.clone(),
        }
    }

    fn from_cat(cat: &Cat) -> Self {
        Self {
            heading: format!("Edit {}", cat.name),
            action: format!("/cats/{}/update", cat.id),
            name: cat.name.clone(),
            breed: cat.breed.clone(),
            description: cat.description.clone(),
            age: cat.age.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ConfirmDeleteData {
    id: String,
    name: String,
}

/// Validated cat fields, ready for the repository
struct CatFields {
    name: CatName,
    breed: Breed,
    description: CatDescription,
    age: CatAge,
}

fn validate_cat_form(form: &CatForm) -> Result<CatFields, ValidationError> {
    Ok(CatFields {
        name: CatName::new(&form.name)?,
        breed: Breed::new(&form.breed)?,
        description: CatDescription::new(&form.description)?,
        age: CatAge::parse(&form.age)?,
    })
}

/// GET /cats
async fn index(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Html<String>, PageError> {
    let cats = CatRepo::new(&state.pool).list_for_owner(user.id).await?;

    let page = Page::new(CatIndexData {
        cats: cats.into_iter().map(CatView::from).collect(),
    })
    .for_user(user.username.as_str());

    Ok(Html(render_page(&state.templates, "cats/index", &page)?))
}

/// GET /cats/{cat_id}
///
/// The one page that shows everything about a cat: feedings, toys,
/// the toys it could still get, and photos. The `error` query string
/// carries the reason a feeding or upload bounced back here.
async fn detail(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(cat_id): Path<Uuid>,
    Query(query): Query<DetailQuery>,
) -> Result<Html<String>, PageError> {
    let repo = CatRepo::new(&state.pool);
    let cat = repo.get_for_owner(cat_id, user.id).await?;

    let feedings = FeedingRepo::new(&state.pool).list_for_cat(cat_id).await?;
    let photos = PhotoRepo::new(&state.pool).list_for_cat(cat_id).await?;
    let toys = repo.toys_for_cat(cat_id).await?;
    let available = repo.available_toys(cat_id).await?;

    let page = Page::new(CatDetailData {
        cat: CatView::from(cat),
        feedings: feedings.into_iter().map(FeedingView::from).collect(),
        toys: toys.into_iter().map(ToyView::from).collect(),
        available_toys: available
            .into_iter()
            .map(|t| available_toy_view(cat_id, t))
            .collect(),
        photos: photos.into_iter().map(PhotoView::from).collect(),
    })
    .for_user(user.username.as_str())
    .with_error(query.error);

    Ok(Html(render_page(&state.templates, "cats/detail", &page)?))
}

/// GET /cats/create
async fn create_page(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Html<String>, PageError> {
    let page = Page::new(CatFormData::blank("/cats/create", "Add a Cat"))
        .for_user(user.username.as_str());

    Ok(Html(render_page(&state.templates, "cats/form", &page)?))
}

/// POST /cats/create
///
/// The owner is always the signed-in collector, whatever the form says.
async fn create(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Form(form): Form<CatForm>,
) -> Result<Response, PageError> {
    let fields = match validate_cat_form(&form) {
        Ok(fields) => fields,
        Err(e) => {
            let page = Page::new(CatFormData::refill("/cats/create", "Add a Cat", &form))
                .for_user(user.username.as_str())
                .with_error(Some(e.to_string()));
            let body = render_page(&state.templates, "cats/form", &page)?;
            return Ok((StatusCode::BAD_REQUEST, Html(body)).into_response());
        }
    };

    let cat = CatRepo::new(&state.pool)
        .create(
            user.id,
            &fields.name,
            &fields.breed,
            &fields.description,
            fields.age,
        )
        .await?;

    tracing::info!(cat = %cat.name, owner = %user.username, "Cat added");
    Ok(redirect_found(&format!("/cats/{}", cat.id)))
}

/// GET /cats/{cat_id}/update
async fn update_page(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(cat_id): Path<Uuid>,
) -> Result<Html<String>, PageError> {
    let cat = CatRepo::new(&state.pool)
        .get_for_owner(cat_id, user.id)
        .await?;

    let page = Page::new(CatFormData::from_cat(&cat)).for_user(user.username.as_str());

    Ok(Html(render_page(&state.templates, "cats/form", &page)?))
}

/// POST /cats/{cat_id}/update
async fn update(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(cat_id): Path<Uuid>,
    Form(form): Form<CatForm>,
) -> Result<Response, PageError> {
    let action = format!("/cats/{cat_id}/update");

    let fields = match validate_cat_form(&form) {
        Ok(fields) => fields,
        Err(e) => {
            let page = Page::new(CatFormData::refill(&action, "Edit Cat", &form))
                .for_user(user.username.as_str())
                .with_error(Some(e.to_string()));
            let body = render_page(&state.templates, "cats/form", &page)?;
            return Ok((StatusCode::BAD_REQUEST, Html(body)).into_response());
        }
    };

    CatRepo::new(&state.pool)
        .update_for_owner(
            cat_id,
            user.id,
            &fields.name,
            &fields.breed,
            &fields.description,
            fields.age,
        )
        .await?;

    Ok(redirect_found(&format!("/cats/{cat_id}")))
}

/// GET /cats/{cat_id}/delete - confirmation page
async fn delete_page(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(cat_id): Path<Uuid>,
) -> Result<Html<String>, PageError> {
    let cat = CatRepo::new(&state.pool)
        .get_for_owner(cat_id, user.id)
        .await?;

    let page = Page::new(ConfirmDeleteData {
        id: cat.id.to_string(),
        name: cat.name,
    })
    .for_user(user.username.as_str());

    Ok(Html(render_page(
        &state.templates,
        "cats/confirm_delete",
        &page,
    )?))
}

/// POST /cats/{cat_id}/delete
async fn delete(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(cat_id): Path<Uuid>,
) -> Result<Response, PageError> {
    CatRepo::new(&state.pool)
        .delete_for_owner(cat_id, user.id)
        .await?;

    tracing::info!(%cat_id, owner = %user.username, "Cat removed");
    Ok(redirect_found("/cats"))
}

/// GET /cats/{cat_id}/assoc_toy/{toy_id}
///
/// Reached from a plain link on the detail page. Giving a toy the cat
/// already has changes nothing; a toy id that matches nothing lands
/// back on the detail page with a banner.
async fn assoc_toy(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path((cat_id, toy_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, PageError> {
    let repo = CatRepo::new(&state.pool);
    // Ownership gate before touching the link table
    repo.get_for_owner(cat_id, user.id).await?;

    match repo.attach_toy(cat_id, toy_id).await {
        Ok(()) => Ok(redirect_found(&format!("/cats/{cat_id}"))),
        Err(DbError::NotFound { .. }) => {
            tracing::warn!(%cat_id, %toy_id, "Toy association rejected: unknown toy");
            Ok(redirect_found(&format!(
                "/cats/{cat_id}?error={}",
                urlencoding::encode("That toy does not exist.")
            )))
        }
        Err(e) => Err(e.into()),
    }
}

/// Cat routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cats", get(index))
        .route("/cats/create", get(create_page).post(create))
        .route("/cats/{cat_id}", get(detail))
        .route("/cats/{cat_id}/update", get(update_page).post(update))
        .route("/cats/{cat_id}/delete", get(delete_page).post(delete))
        .route("/cats/{cat_id}/assoc_toy/{toy_id}", get(assoc_toy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn cat(age: i32) -> Cat {
        Cat {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Maki".into(),
            breed: "Siamese".into(),
            description: "Naps through everything".into(),
            age,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn age_display_handles_kittens_and_plurals() {
        assert_eq!(CatView::from(cat(0)).age_display, "Still a kitten");
        assert_eq!(CatView::from(cat(1)).age_display, "1 year old");
        assert_eq!(CatView::from(cat(4)).age_display, "4 years old");
    }

    #[test]
    fn form_validation_rejects_non_numeric_age() {
        let form = CatForm {
            name: "Maki".into(),
            breed: "Siamese".into(),
            description: "Naps".into(),
            age: "lots".into(),
        };
        assert!(validate_cat_form(&form).is_err());
    }

    #[test]
    fn form_validation_accepts_a_full_form() {
        let form = CatForm {
            name: "Maki".into(),
            breed: "Siamese".into(),
            description: "Naps".into(),
            age: "4".into(),
        };
        let fields = validate_cat_form(&form).expect("valid form");
        assert_eq!(fields.age.value(), 4);
    }
}
