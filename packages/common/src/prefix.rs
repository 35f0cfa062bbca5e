//! Provenance prefixes carried in image filenames.

use crate::image_name::ImageName;

/// Prefix given to working copies made from an original.
pub const EDITED_PREFIX: &str = "edited_";

/// Every prefix that marks provenance and is removed when an image is completed.
pub const KNOWN_PREFIXES: &[&str] = &[EDITED_PREFIX];

/// Name of the working copy made from `name`.
pub fn with_edited_prefix(name: &ImageName) -> ImageName {
    // A valid name stays valid with an alphanumeric prefix in front.
    ImageName::parse(&format!("{EDITED_PREFIX}{name}")).unwrap_or_else(|_| name.clone())
}

/// Remove one leading known prefix.
///
/// Names without a known prefix, and names that are nothing but a prefix,
/// come back unchanged.
pub fn strip_known_prefix(name: &ImageName) -> ImageName {
    KNOWN_PREFIXES
        .iter()
        .find_map(|prefix| name.strip_prefix(*prefix))
        .and_then(|rest| ImageName::parse(rest).ok())
        .unwrap_or_else(|| name.clone())
}
