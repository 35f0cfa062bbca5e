use thiserror::Error;

use crate::stage::Stage;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("File with name: {name} does not exist in stage {stage}.")]
    NotFound { stage: Stage, name: String },

    #[error("invalid language code: {0:?}")]
    InvalidLanguage(String),

    /// The tool could not be started or reported failure.
    #[error("metadata tool failed: {0}")]
    Tool(String),

    #[error("metadata tool timed out after {0}s")]
    Timeout(u64),

    /// The tool succeeded but its output was not understood.
    #[error("unreadable metadata tool output: {0}")]
    Parse(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, MetadataError>;
