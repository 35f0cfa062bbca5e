use std::collections::BTreeMap;

use serde::Serialize;

/// Filenames currently held by one stage.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ImageListResponse {
    #[schema(example = json!(["edited_foo.jpg", "edited_bar.png"]))]
    pub data: Vec<String>,
}

/// Metadata of one image, field name to value.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MetadataResponse {
    #[schema(example = json!({"Make": "Canon", "ISO": "200"}))]
    pub data: BTreeMap<String, String>,
}

/// Raw report of the metadata tool after stripping an image.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ToolReport {
    #[schema(example = "1 image files updated")]
    pub body: String,
}

/// Acknowledgement of a completed stage transition.
#[derive(Serialize, utoipa::ToSchema)]
pub struct TransitionResponse {
    #[schema(example = 200)]
    pub status: u16,
    /// Filename of the image in its new stage.
    #[schema(example = "edited_foo.jpg")]
    pub image: String,
}

/// Empty JSON object, `{}`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct Acknowledgement {}
