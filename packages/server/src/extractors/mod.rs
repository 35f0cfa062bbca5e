pub mod image_path;
