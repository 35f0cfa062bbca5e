use tracing::{debug, warn};

use crate::api::GalleryApi;
use crate::command::GalleryCommand;
use crate::view::GalleryView;

/// Drives a [`GalleryView`] against the server.
///
/// Failed calls never propagate: their message lands in
/// [`GalleryView::last_error`] and the view keeps its previous content.
pub struct GalleryController<A> {
    api: A,
    view: GalleryView,
    lang: String,
}

impl<A: GalleryApi> GalleryController<A> {
    pub fn new(api: A, lang: impl Into<String>) -> Self {
        Self {
            api,
            view: GalleryView::new(),
            lang: lang.into(),
        }
    }

    pub fn view(&self) -> &GalleryView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut GalleryView {
        &mut self.view
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Reload the edited listing.
    pub async fn refresh(&mut self) {
        match self.api.list_edited().await {
            Ok(names) => {
                debug!(count = names.len(), "Edited listing refreshed");
                self.view.set_images(names);
            }
            Err(e) => {
                warn!("Failed to list edited images: {e}");
                self.view.set_error(e.to_string());
            }
        }
    }

    pub async fn mouse_over(&mut self, name: &str) {
        if let Some(target) = self.view.mouse_over(name) {
            self.load_metadata(&target).await;
        }
    }

    pub async fn click(&mut self, name: &str) {
        if let Some(target) = self.view.click(name) {
            self.load_metadata(&target).await;
        }
    }

    /// Run the context-menu entry titled `title` on the hovered image.
    /// Unknown titles are ignored.
    pub async fn context_menu(&mut self, title: &str) {
        match GalleryCommand::from_title(title) {
            Some(command) => self.dispatch(command).await,
            None => debug!(title, "Unknown context menu entry"),
        }
    }

    pub async fn dispatch(&mut self, command: GalleryCommand) {
        let Some(target) = self.view.hovered().map(str::to_string) else {
            debug!(?command, "No image under the pointer");
            return;
        };

        match command {
            GalleryCommand::TransferForEditing => {
                match self.api.move_back_for_editing(&target).await {
                    Ok(()) => self.refresh().await,
                    Err(e) => {
                        warn!(image = %target, "Failed to move image back for editing: {e}");
                        self.view.set_error(e.to_string());
                    }
                }
            }
        }
    }

    async fn load_metadata(&mut self, name: &str) {
        match self.api.edited_metadata(name, &self.lang).await {
            Ok(metadata) => self.view.set_metadata(metadata),
            Err(e) => {
                warn!(image = %name, "Failed to load metadata: {e}");
                self.view.set_error(e.to_string());
            }
        }
    }
}
