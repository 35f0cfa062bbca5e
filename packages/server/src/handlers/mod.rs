pub mod images;
pub mod metadata;
pub mod transitions;
