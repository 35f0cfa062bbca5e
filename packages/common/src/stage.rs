use std::fmt;

use serde::{Deserialize, Serialize};

/// A workflow stage. Each stage is backed by one directory under the storage root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Freshly uploaded images, never modified.
    Original,
    /// Working copies shown in the main gallery.
    Gallery,
    /// Images handed over for editing.
    Edited,
    /// Finished images, provenance prefix removed.
    Complete,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Original,
        Stage::Gallery,
        Stage::Edited,
        Stage::Complete,
    ];

    /// Directory name under the storage root. Also the URL prefix the
    /// directory is served under.
    pub fn dir_name(self) -> &'static str {
        match self {
            Stage::Original => "images_original",
            Stage::Gallery => "images",
            Stage::Edited => "images_edited",
            Stage::Complete => "images_complete",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Original => "original",
            Stage::Gallery => "gallery",
            Stage::Edited => "edited",
            Stage::Complete => "complete",
        };
        f.write_str(s)
    }
}
