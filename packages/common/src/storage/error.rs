use thiserror::Error;

use crate::image_name::ImageNameError;
use crate::stage::Stage;

/// Errors raised by the stage store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The named file is not present in the stage directory.
    #[error("{name} does not exist in stage {stage}")]
    NotFound { stage: Stage, name: String },

    /// A transition would overwrite a file already present in the destination.
    #[error("{name} already exists in stage {stage}")]
    AlreadyExists { stage: Stage, name: String },

    /// The name is hidden from listings in this stage and cannot be written.
    #[error("{name} is a reserved name in stage {stage}")]
    ReservedName { stage: Stage, name: String },

    #[error("invalid image name: {0}")]
    InvalidName(#[from] ImageNameError),

    /// A cross-device copy did not reproduce the source bytes.
    #[error("copy of {name} failed verification ({expected} != {actual})")]
    VerificationFailed {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// True when the error stems from the caller naming something that is not there.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
