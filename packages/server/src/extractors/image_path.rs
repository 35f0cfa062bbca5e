use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use common::ImageName;

use crate::error::AppError;

/// The `{imageName}` path segment, validated as a flat filename.
pub struct ImagePath(pub ImageName);

impl<S> FromRequestParts<S> for ImagePath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        Ok(ImagePath(ImageName::parse(&raw)?))
    }
}
