use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::ImageNameError;
use common::metadata::MetadataError;
use common::storage::StorageError;
use serde::Serialize;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `SOURCE_MISSING`,
    /// `NOT_FOUND`, `CONFLICT`, `PAYLOAD_TOO_LARGE`, `EXTERNAL_TOOL_ERROR`,
    /// `INTERNAL_ERROR`.
    #[schema(example = "SOURCE_MISSING")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "foo.jpg does not exist in stage original")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    /// The image a transition should act on is not in its source stage.
    SourceMissing(String),
    NotFound(String),
    Conflict(String),
    PayloadTooLarge(String),
    /// The metadata tool failed, timed out or produced unreadable output.
    ExternalTool(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::SourceMissing(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "SOURCE_MISSING",
                    message: msg,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "CONFLICT",
                    message: msg,
                },
            ),
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorBody {
                    code: "PAYLOAD_TOO_LARGE",
                    message: msg,
                },
            ),
            AppError::ExternalTool(detail) => {
                tracing::error!("Metadata tool error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "EXTERNAL_TOOL_ERROR",
                        message: detail,
                    },
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<ImageNameError> for AppError {
    fn from(err: ImageNameError) -> Self {
        AppError::Validation(err.message().into())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { .. } => AppError::NotFound(err.to_string()),
            StorageError::AlreadyExists { .. } => AppError::Conflict(err.to_string()),
            StorageError::ReservedName { .. } => AppError::Validation(err.to_string()),
            StorageError::InvalidName(e) => e.into(),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<MetadataError> for AppError {
    fn from(err: MetadataError) -> Self {
        match err {
            MetadataError::NotFound { .. } => {
                tracing::warn!("{err}");
                AppError::NotFound(err.to_string())
            }
            MetadataError::InvalidLanguage(_) => AppError::Validation(err.to_string()),
            MetadataError::Tool(_) | MetadataError::Timeout(_) | MetadataError::Parse(_) => {
                AppError::ExternalTool(err.to_string())
            }
            MetadataError::Storage(e) => e.into(),
        }
    }
}
