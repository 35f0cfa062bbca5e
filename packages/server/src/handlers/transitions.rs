use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use common::storage::{StorageError, Transition};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::image_path::ImagePath;
use crate::models::image::TransitionResponse;
use crate::state::AppState;

async fn run_transition(
    state: &AppState,
    transition: Transition,
    ImagePath(name): ImagePath,
) -> Result<Json<TransitionResponse>, AppError> {
    let target = state
        .store
        .transfer(transition, &name)
        .await
        .map_err(|e| match e {
            StorageError::NotFound { .. } => AppError::SourceMissing(e.to_string()),
            other => other.into(),
        })?;

    Ok(Json(TransitionResponse {
        status: StatusCode::OK.as_u16(),
        image: target.into_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/copyImageForEditing/{imageName}",
    tag = "Transitions",
    operation_id = "copyImageForEditing",
    summary = "Copy an original into the gallery",
    description = "Copies the original to the gallery stage as `edited_<imageName>`. \
        The original stays where it is.",
    params(("imageName" = String, Path, description = "Filename in the original stage")),
    responses(
        (status = 200, description = "Copied", body = TransitionResponse),
        (status = 400, description = "Not in the original stage (SOURCE_MISSING)", body = ErrorBody),
        (status = 409, description = "Gallery already holds the copy (CONFLICT)", body = ErrorBody),
        (status = 500, description = "Filesystem failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, name), fields(image = %name.0))]
pub async fn copy_image_for_editing(
    State(state): State<AppState>,
    name: ImagePath,
) -> Result<Json<TransitionResponse>, AppError> {
    run_transition(&state, Transition::CopyForEditing, name).await
}

#[utoipa::path(
    post,
    path = "/moveImageBackForEditing/{imageName}",
    tag = "Transitions",
    operation_id = "moveImageBackForEditing",
    summary = "Move an edited image back into the gallery",
    params(("imageName" = String, Path, description = "Filename in the edited stage")),
    responses(
        (status = 200, description = "Moved", body = TransitionResponse),
        (status = 400, description = "Not in the edited stage (SOURCE_MISSING)", body = ErrorBody),
        (status = 409, description = "Gallery already holds that name (CONFLICT)", body = ErrorBody),
        (status = 500, description = "Filesystem failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, name), fields(image = %name.0))]
pub async fn move_image_back_for_editing(
    State(state): State<AppState>,
    name: ImagePath,
) -> Result<Json<TransitionResponse>, AppError> {
    run_transition(&state, Transition::MoveBackForEditing, name).await
}

#[utoipa::path(
    post,
    path = "/moveImageToImageGallery/{imageName}",
    tag = "Transitions",
    operation_id = "moveImageToImageGallery",
    summary = "Hand a gallery image over for editing",
    description = "Moves the image from the gallery stage to the edited stage.",
    params(("imageName" = String, Path, description = "Filename in the gallery stage")),
    responses(
        (status = 200, description = "Moved", body = TransitionResponse),
        (status = 400, description = "Not in the gallery stage (SOURCE_MISSING)", body = ErrorBody),
        (status = 409, description = "Edited stage already holds that name (CONFLICT)", body = ErrorBody),
        (status = 500, description = "Filesystem failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, name), fields(image = %name.0))]
pub async fn move_image_to_image_gallery(
    State(state): State<AppState>,
    name: ImagePath,
) -> Result<Json<TransitionResponse>, AppError> {
    run_transition(&state, Transition::MoveToEdited, name).await
}

#[utoipa::path(
    post,
    path = "/moveImageToImagesComplete/{imageName}",
    tag = "Transitions",
    operation_id = "moveImageToImagesComplete",
    summary = "Complete an edited image",
    description = "Moves the image from the edited stage to the complete stage, \
        dropping its `edited_` prefix.",
    params(("imageName" = String, Path, description = "Filename in the edited stage")),
    responses(
        (status = 200, description = "Moved", body = TransitionResponse),
        (status = 400, description = "Not in the edited stage (SOURCE_MISSING)", body = ErrorBody),
        (status = 409, description = "Complete stage already holds that name (CONFLICT)", body = ErrorBody),
        (status = 500, description = "Filesystem failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, name), fields(image = %name.0))]
pub async fn move_image_to_images_complete(
    State(state): State<AppState>,
    name: ImagePath,
) -> Result<Json<TransitionResponse>, AppError> {
    run_transition(&state, Transition::MoveToComplete, name).await
}
