mod error;
mod hash;
mod locks;
mod store;
mod transition;

pub use error::StorageError;
pub use hash::ContentHash;
pub use locks::{NameGuard, NameLocks};
pub use store::{StageStore, Upload};
pub use transition::{TransferKind, Transition};
