use axum::Json;
use axum::extract::{Path, State};
use common::metadata::Lang;
use common::{ImageName, Stage};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::image_path::ImagePath;
use crate::models::image::{MetadataResponse, ToolReport};
use crate::state::AppState;

async fn read_metadata(
    state: &AppState,
    stage: Stage,
    raw_name: &str,
    raw_lang: Option<&str>,
) -> Result<Json<MetadataResponse>, AppError> {
    let name = ImageName::parse(raw_name)?;
    let lang = Lang::parse(raw_lang.unwrap_or(&state.config.metadata.default_lang))?;
    let data = state.metadata.read(stage, &name, &lang).await?;
    Ok(Json(MetadataResponse { data }))
}

#[utoipa::path(
    get,
    path = "/getMetadata/{imageName}/{lang}",
    tag = "Metadata",
    operation_id = "getGalleryMetadata",
    summary = "Read metadata of a gallery image",
    params(
        ("imageName" = String, Path, description = "Filename in the gallery stage"),
        ("lang" = String, Path, description = "Language of field names and values", example = "en"),
    ),
    responses(
        (status = 200, description = "Metadata", body = MetadataResponse),
        (status = 400, description = "Invalid filename or language (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "No such image (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Metadata tool failed (EXTERNAL_TOOL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_gallery_metadata(
    State(state): State<AppState>,
    Path((image_name, lang)): Path<(String, String)>,
) -> Result<Json<MetadataResponse>, AppError> {
    read_metadata(&state, Stage::Gallery, &image_name, Some(&lang)).await
}

#[utoipa::path(
    get,
    path = "/getMetadata/{imageName}",
    tag = "Metadata",
    operation_id = "getGalleryMetadataDefaultLang",
    summary = "Read metadata of a gallery image in the default language",
    params(("imageName" = String, Path, description = "Filename in the gallery stage")),
    responses(
        (status = 200, description = "Metadata", body = MetadataResponse),
        (status = 404, description = "No such image (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Metadata tool failed (EXTERNAL_TOOL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_gallery_metadata_default_lang(
    State(state): State<AppState>,
    Path(image_name): Path<String>,
) -> Result<Json<MetadataResponse>, AppError> {
    read_metadata(&state, Stage::Gallery, &image_name, None).await
}

#[utoipa::path(
    get,
    path = "/getMetadata_edited/{imageName}/{lang}",
    tag = "Metadata",
    operation_id = "getEditedMetadata",
    summary = "Read metadata of an edited image",
    params(
        ("imageName" = String, Path, description = "Filename in the edited stage"),
        ("lang" = String, Path, description = "Language of field names and values", example = "en"),
    ),
    responses(
        (status = 200, description = "Metadata", body = MetadataResponse),
        (status = 400, description = "Invalid filename or language (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "No such image (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Metadata tool failed (EXTERNAL_TOOL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_edited_metadata(
    State(state): State<AppState>,
    Path((image_name, lang)): Path<(String, String)>,
) -> Result<Json<MetadataResponse>, AppError> {
    read_metadata(&state, Stage::Edited, &image_name, Some(&lang)).await
}

#[utoipa::path(
    get,
    path = "/getMetadata_edited/{imageName}",
    tag = "Metadata",
    operation_id = "getEditedMetadataDefaultLang",
    summary = "Read metadata of an edited image in the default language",
    params(("imageName" = String, Path, description = "Filename in the edited stage")),
    responses(
        (status = 200, description = "Metadata", body = MetadataResponse),
        (status = 404, description = "No such image (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Metadata tool failed (EXTERNAL_TOOL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_edited_metadata_default_lang(
    State(state): State<AppState>,
    Path(image_name): Path<String>,
) -> Result<Json<MetadataResponse>, AppError> {
    read_metadata(&state, Stage::Edited, &image_name, None).await
}

#[utoipa::path(
    post,
    path = "/deleteAllMetadata/{imageName}",
    tag = "Metadata",
    operation_id = "deleteAllMetadata",
    summary = "Strip every metadata tag from a gallery image",
    description = "Runs the metadata tool over the image in place and returns its report verbatim.",
    params(("imageName" = String, Path, description = "Filename in the gallery stage")),
    responses(
        (status = 200, description = "Tool report", body = ToolReport),
        (status = 404, description = "No such image (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Metadata tool failed (EXTERNAL_TOOL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, name), fields(image = %name.0))]
pub async fn delete_all_metadata(
    State(state): State<AppState>,
    name: ImagePath,
) -> Result<Json<ToolReport>, AppError> {
    let body = state.metadata.delete_all(Stage::Gallery, &name.0).await?;
    Ok(Json(ToolReport { body }))
}
