// handlers/public/upload/thumbnail.rs - /api/with-thumbnail[/:id]

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::{Method, StatusCode},
};
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::middleware::context::WriteKind;
use crate::middleware::timestamp::{now_ms, stamp};
use crate::middleware::StagedResult;
use crate::state::AppState;

pub const POSTS_COLLECTION: &str = "posts";
pub const IMAGE_FIELD: &str = "image";
pub const IMAGE_URL_FIELD: &str = "imageUrl";

/// Any method on /api/with-thumbnail. Only POST creates.
pub async fn thumbnail_create(
    State(state): State<AppState>,
    method: Method,
    multipart: Multipart,
) -> Result<(StatusCode, StagedResult), ApiError> {
    handle_upload(&state, &method, None, multipart).await
}

/// Any method on /api/with-thumbnail/:id. PATCH and PUT update.
pub async fn thumbnail_update(
    State(state): State<AppState>,
    method: Method,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<(StatusCode, StagedResult), ApiError> {
    handle_upload(&state, &method, Some(id), multipart).await
}

async fn handle_upload(
    state: &AppState,
    method: &Method,
    id: Option<String>,
    multipart: Multipart,
) -> Result<(StatusCode, StagedResult), ApiError> {
    let kind = WriteKind::from_method(method).ok_or(ApiError::MethodNotSupported)?;

    // Reject unroutable combinations and missing posts before anything is
    // written to disk
    match (kind, &id) {
        (WriteKind::Create, None) => {}
        (WriteKind::Update, Some(id)) => {
            state.store.get(POSTS_COLLECTION, id).await?;
        }
        _ => return Err(ApiError::MethodNotSupported),
    }

    let mut body = read_form(state, multipart).await?;
    stamp(&mut body, kind, now_ms());

    match (kind, id) {
        (WriteKind::Create, None) => {
            let record = state.store.insert(POSTS_COLLECTION, Value::Object(body)).await?;
            Ok((StatusCode::CREATED, StagedResult::plain(record)))
        }
        (WriteKind::Update, Some(id)) => {
            let record = state.store.patch(POSTS_COLLECTION, &id, Value::Object(body)).await?;
            Ok((StatusCode::OK, StagedResult::plain(record)))
        }
        _ => Err(ApiError::MethodNotSupported),
    }
}

/// Text fields become string fields; the `image` file is stored and linked
/// as `imageUrl`. Other file fields are dropped.
async fn read_form(state: &AppState, mut multipart: Multipart) -> Result<Map<String, Value>, ApiError> {
    let mut body = Map::new();
    let mut image_url: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match field.file_name().map(str::to_string) {
            None => {
                let text = field.text().await.map_err(form_error)?;
                body.insert(name, Value::String(text));
            }
            Some(file_name) if name == IMAGE_FIELD && !file_name.is_empty() && image_url.is_none() => {
                let bytes = field.bytes().await.map_err(form_error)?;
                let asset = state.assets.store(&bytes, &file_name).await?;
                image_url = Some(asset.public_url);
            }
            Some(file_name) => {
                tracing::debug!("Ignoring file field '{}' ({})", name, file_name);
            }
        }
    }

    if let Some(url) = image_url {
        body.insert(IMAGE_URL_FIELD.to_string(), Value::String(url));
    }
    Ok(body)
}

fn form_error(err: MultipartError) -> ApiError {
    tracing::debug!("Malformed multipart body: {}", err);
    ApiError::validation_error(err.body_text())
}
