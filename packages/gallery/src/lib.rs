//! Client-side state for the edited-images gallery.
//!
//! [`GalleryView`] holds what the page shows and applies pointer, scroll and
//! key events to it. [`GalleryController`] pairs a view with a [`GalleryApi`]
//! and performs the server calls those events imply.

pub mod api;
pub mod command;
pub mod controller;
pub mod view;

pub use api::{GalleryApi, GalleryError, HttpGalleryApi};
pub use command::GalleryCommand;
pub use controller::GalleryController;
pub use view::GalleryView;
