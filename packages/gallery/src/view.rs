use common::metadata::MetadataMap;

/// Listing entry that marks the edited directory and is never an image.
pub const EDITED_SENTINEL: &str = "images_edited.txt";

/// Pixels one key press scrolls the image table by.
pub const KEY_SCROLL_STEP: i64 = 50;

/// What the edited-images gallery currently shows.
///
/// Pure state: every method applies one UI event and reports which image,
/// if any, needs its metadata loaded. Fetching is left to the caller.
#[derive(Debug, Clone, Default)]
pub struct GalleryView {
    images: Vec<String>,
    /// Image under the pointer most recently. Target of the context menu.
    hovered: Option<String>,
    /// Image locked by a click. While set, hovering does not replace the metadata.
    pinned: Option<String>,
    metadata: MetadataMap,
    metadata_table_height: Option<String>,
    table_scroll: i64,
    last_error: Option<String>,
}

impl GalleryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn pinned(&self) -> Option<&str> {
        self.pinned.as_deref()
    }

    pub fn is_pinned(&self, name: &str) -> bool {
        self.pinned.as_deref() == Some(name)
    }

    pub fn metadata(&self) -> &MetadataMap {
        &self.metadata
    }

    /// CSS height of the metadata panel, once a scroll event has set one.
    pub fn metadata_table_height(&self) -> Option<&str> {
        self.metadata_table_height.as_deref()
    }

    /// Vertical scroll offset of the image table, in pixels.
    pub fn table_scroll(&self) -> i64 {
        self.table_scroll
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Replace the listing. Any entry mentioning the sentinel is dropped.
    pub fn set_images(&mut self, names: Vec<String>) {
        self.images = names
            .into_iter()
            .filter(|name| !name.contains(EDITED_SENTINEL))
            .collect();
    }

    pub fn set_metadata(&mut self, metadata: MetadataMap) {
        self.metadata = metadata;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    /// Pointer entered `name`. Returns the image to load metadata for.
    pub fn mouse_over(&mut self, name: &str) -> Option<String> {
        self.hovered = Some(name.to_string());
        match self.pinned {
            Some(_) => None,
            None => Some(name.to_string()),
        }
    }

    /// `name` was clicked. Clicking the pinned image releases it; clicking
    /// any other image pins that one. Returns the image to load metadata for.
    pub fn click(&mut self, name: &str) -> Option<String> {
        if self.is_pinned(name) {
            self.pinned = None;
            None
        } else {
            self.pinned = Some(name.to_string());
            Some(name.to_string())
        }
    }

    /// Page scrolled to `page_y`. Near the top the metadata panel grows with
    /// the scroll position; further down it keeps its last height.
    pub fn scroll(&mut self, page_y: u32, window_height: u32) {
        let grow_limit = window_height / 4;
        if page_y <= grow_limit {
            self.metadata_table_height = Some(format!("calc(70vh + {page_y}px)"));
        }
    }

    /// Key pressed anywhere on the page. `s` scrolls the table down, `w` up.
    /// Returns whether the key was handled.
    pub fn key(&mut self, key: &str) -> bool {
        let delta = match key {
            "s" => KEY_SCROLL_STEP,
            "w" => -KEY_SCROLL_STEP,
            _ => return false,
        };
        self.table_scroll = (self.table_scroll + delta).max(0);
        true
    }
}
