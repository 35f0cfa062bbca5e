mod adapter;
mod error;
mod exiftool;
mod lang;
mod tool;

pub use adapter::MetadataAdapter;
pub use error::MetadataError;
pub use exiftool::ExifTool;
pub use lang::Lang;
pub use tool::{MetadataMap, MetadataTool};
