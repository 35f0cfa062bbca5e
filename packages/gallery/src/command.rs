/// Actions offered in an image's context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryCommand {
    /// Move the image from the edited stage back to the gallery stage.
    TransferForEditing,
}

impl GalleryCommand {
    /// Menu entries, in display order.
    pub const ALL: [GalleryCommand; 1] = [GalleryCommand::TransferForEditing];

    pub fn title(self) -> &'static str {
        match self {
            GalleryCommand::TransferForEditing => "transfer for editing",
        }
    }

    /// Look up the command behind a menu title.
    pub fn from_title(title: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.title() == title)
    }

    /// Titles to render in the context menu.
    pub fn menu() -> impl Iterator<Item = &'static str> {
        Self::ALL.into_iter().map(Self::title)
    }
}
