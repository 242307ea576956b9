//! Photo upload

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::response::Response;
use axum::routing::post;
use axum::Router;
use uuid::Uuid;

use crate::db::repos::{CatRepo, PhotoRepo};
use crate::storage::photo_key;

use crate::http::error::{redirect_found, PageError};
use crate::http::extractors::CurrentUser;
use crate::http::server::AppState;

/// Largest accepted upload. Phone photos fit comfortably.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

struct Upload {
    filename: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// Pull the `photo-file` part out of the multipart body, if present.
/// Browsers submit an empty part when no file was chosen; that counts
/// as absent.
async fn read_photo_part(multipart: &mut Multipart) -> Result<Option<Upload>, PageError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| PageError::BadUpload {
        message: e.to_string(),
    })? {
        if field.name() != Some("photo-file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_owned();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_owned();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| PageError::BadUpload {
                message: e.to_string(),
            })?
            .to_vec();

        if bytes.is_empty() {
            return Ok(None);
        }

        return Ok(Some(Upload {
            filename,
            content_type,
            bytes,
        }));
    }

    Ok(None)
}

/// POST /cats/{cat_id}/add_photo
///
/// Multipart form with a `photo-file` part. Submitting without a file
/// writes nothing and lands back on the detail page with a banner. A
/// storage failure is logged, surfaced the same way, and writes no
/// Photo row.
async fn add_photo(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(cat_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Response, PageError> {
    CatRepo::new(&state.pool)
        .get_for_owner(cat_id, user.id)
        .await?;

    let detail_url = format!("/cats/{cat_id}");

    let Some(upload) = read_photo_part(&mut multipart).await? else {
        tracing::warn!(%cat_id, "Photo form submitted without a file");
        return Ok(redirect_found(&format!(
            "{detail_url}?error={}",
            urlencoding::encode("Choose a photo file first.")
        )));
    };

    let key = photo_key(&upload.filename);
    match state
        .store
        .put(&key, &upload.content_type, upload.bytes)
        .await
    {
        Ok(()) => {
            let url = state.store.object_url(&key);
            PhotoRepo::new(&state.pool).create(cat_id, &url).await?;
            tracing::info!(%cat_id, key, "Photo uploaded");
            Ok(redirect_found(&detail_url))
        }
        Err(e) => {
            tracing::error!(%cat_id, key, "Photo upload failed: {}", e);
            Ok(redirect_found(&format!(
                "{detail_url}?error={}",
                urlencoding::encode("Photo upload failed, try again.")
            )))
        }
    }
}

/// Photo routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/cats/{cat_id}/add_photo",
        post(add_photo).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
    )
}
