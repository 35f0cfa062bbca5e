use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use common::{ImageName, Stage};
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::image_path::ImagePath;
use crate::models::image::{Acknowledgement, ImageListResponse};
use crate::state::AppState;

/// Multipart field carrying the uploaded file.
const UPLOAD_FIELD: &str = "image";

pub fn upload_body_limit(max: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max)
}

async fn list_stage(state: &AppState, stage: Stage) -> Result<Json<ImageListResponse>, AppError> {
    let data = state.store.list(stage).await?;
    Ok(Json(ImageListResponse { data }))
}

#[utoipa::path(
    get,
    path = "/getImageNames",
    tag = "Images",
    operation_id = "listGalleryImages",
    summary = "List images in the gallery stage",
    responses(
        (status = 200, description = "Gallery filenames", body = ImageListResponse),
        (status = 500, description = "Directory could not be read (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_gallery_images(
    State(state): State<AppState>,
) -> Result<Json<ImageListResponse>, AppError> {
    list_stage(&state, Stage::Gallery).await
}

#[utoipa::path(
    get,
    path = "/getImageNames_edited",
    tag = "Images",
    operation_id = "listEditedImages",
    summary = "List images in the edited stage",
    responses(
        (status = 200, description = "Edited filenames", body = ImageListResponse),
        (status = 500, description = "Directory could not be read (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_edited_images(
    State(state): State<AppState>,
) -> Result<Json<ImageListResponse>, AppError> {
    list_stage(&state, Stage::Edited).await
}

#[utoipa::path(
    get,
    path = "/getImageNames_original",
    tag = "Images",
    operation_id = "listOriginalImages",
    summary = "List images in the original stage",
    responses(
        (status = 200, description = "Original filenames", body = ImageListResponse),
        (status = 500, description = "Directory could not be read (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_original_images(
    State(state): State<AppState>,
) -> Result<Json<ImageListResponse>, AppError> {
    list_stage(&state, Stage::Original).await
}

#[utoipa::path(
    get,
    path = "/getImageNames_complete",
    tag = "Images",
    operation_id = "listCompleteImages",
    summary = "List images in the complete stage",
    responses(
        (status = 200, description = "Complete filenames", body = ImageListResponse),
        (status = 500, description = "Directory could not be read (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_complete_images(
    State(state): State<AppState>,
) -> Result<Json<ImageListResponse>, AppError> {
    list_stage(&state, Stage::Complete).await
}

#[utoipa::path(
    post,
    path = "/newImage",
    tag = "Images",
    operation_id = "uploadImage",
    summary = "Upload a new original image",
    description = "Stores the `image` multipart field in the original stage under the \
        filename it was uploaded with. An existing original of the same name is replaced. \
        Responds with the stored filename as plain text.",
    request_body(content_type = "multipart/form-data", description = "Image file in field `image`"),
    responses(
        (status = 200, description = "Stored filename", body = String, content_type = "text/plain"),
        (status = 400, description = "Malformed upload (VALIDATION_ERROR)", body = ErrorBody),
        (status = 413, description = "Upload too large (PAYLOAD_TOO_LARGE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<String, AppError> {
    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue; // Ignore unknown fields.
        }

        let raw_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("File field must have a filename".into()))?;
        // Stored names never carry the padding some clients add to multipart filenames.
        let name = ImageName::parse(raw_name.trim())?;

        let mut upload = state.store.begin_upload(Stage::Original, &name).await?;
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            upload.write(&chunk).await?;
        }
        let bytes = upload.commit().await?;

        info!(image = %name, bytes, "REQUEST:newImage");
        return Ok(name.into_string());
    }

    Err(AppError::Validation(format!(
        "Missing '{UPLOAD_FIELD}' field"
    )))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(format!("Multipart error: {}", err.body_text()))
    }
}

#[utoipa::path(
    delete,
    path = "/deleteImage/{imageName}",
    tag = "Images",
    operation_id = "deleteImage",
    summary = "Delete an image from the gallery stage",
    params(("imageName" = String, Path, description = "Filename in the gallery stage")),
    responses(
        (status = 200, description = "Image deleted", body = Acknowledgement),
        (status = 400, description = "Invalid filename (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "No such image (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, name), fields(image = %name.0))]
pub async fn delete_image(
    State(state): State<AppState>,
    name: ImagePath,
) -> Result<Json<Acknowledgement>, AppError> {
    state.store.delete(Stage::Gallery, &name.0).await?;
    Ok(Json(Acknowledgement {}))
}
