use std::sync::Arc;

use common::metadata::{MetadataAdapter, MetadataTool};
use common::storage::{StageStore, StorageError};

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<StageStore>,
    pub metadata: Arc<MetadataAdapter>,
}

impl AppState {
    /// Open the stage store described by `config` and wire the metadata tool to it.
    pub async fn new(
        config: AppConfig,
        tool: Arc<dyn MetadataTool>,
    ) -> Result<Self, StorageError> {
        let store = Arc::new(StageStore::open(config.storage.clone()).await?);
        let metadata = Arc::new(MetadataAdapter::new(Arc::clone(&store), tool));
        Ok(Self {
            config: Arc::new(config),
            store,
            metadata,
        })
    }
}
