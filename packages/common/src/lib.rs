pub mod config;
pub mod image_name;
pub mod metadata;
pub mod prefix;
pub mod stage;
pub mod storage;

pub use config::{MetadataConfig, StorageConfig};
pub use image_name::{ImageName, ImageNameError};
pub use stage::Stage;
