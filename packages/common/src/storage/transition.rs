use std::fmt;

use serde::{Deserialize, Serialize};

use crate::image_name::ImageName;
use crate::prefix::{strip_known_prefix, with_edited_prefix};
use crate::stage::Stage;

/// Whether a transition leaves the source in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferKind {
    Copy,
    Move,
}

/// The lifecycle steps an image can take between stages.
///
/// ```text
/// Original --copy, add "edited_"--> Gallery <--move--> Edited --move, strip prefix--> Complete
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Original -> Gallery, copied under `edited_<name>`.
    CopyForEditing,
    /// Gallery -> Edited.
    MoveToEdited,
    /// Edited -> Gallery.
    MoveBackForEditing,
    /// Edited -> Complete, provenance prefix removed.
    MoveToComplete,
}

impl Transition {
    pub const ALL: [Transition; 4] = [
        Transition::CopyForEditing,
        Transition::MoveToEdited,
        Transition::MoveBackForEditing,
        Transition::MoveToComplete,
    ];

    pub fn source(self) -> Stage {
        match self {
            Transition::CopyForEditing => Stage::Original,
            Transition::MoveToEdited => Stage::Gallery,
            Transition::MoveBackForEditing | Transition::MoveToComplete => Stage::Edited,
        }
    }

    pub fn destination(self) -> Stage {
        match self {
            Transition::CopyForEditing | Transition::MoveBackForEditing => Stage::Gallery,
            Transition::MoveToEdited => Stage::Edited,
            Transition::MoveToComplete => Stage::Complete,
        }
    }

    pub fn kind(self) -> TransferKind {
        match self {
            Transition::CopyForEditing => TransferKind::Copy,
            _ => TransferKind::Move,
        }
    }

    /// Filename the image gets in the destination stage.
    pub fn destination_name(self, name: &ImageName) -> ImageName {
        match self {
            Transition::CopyForEditing => with_edited_prefix(name),
            Transition::MoveToComplete => strip_known_prefix(name),
            Transition::MoveToEdited | Transition::MoveBackForEditing => name.clone(),
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source(), self.destination())
    }
}
