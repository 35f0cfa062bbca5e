use std::sync::Arc;

use tracing::{info, instrument};

use super::error::{MetadataError, Result};
use super::lang::Lang;
use super::tool::{MetadataMap, MetadataTool};
use crate::image_name::ImageName;
use crate::stage::Stage;
use crate::storage::StageStore;

/// Reads and strips metadata of images held in the stage store.
///
/// Each call re-lists the stage and re-runs the tool; nothing is cached.
/// The image's (stage, filename) lock is held for the duration so a
/// concurrent transition cannot move the file out from under the tool.
pub struct MetadataAdapter {
    store: Arc<StageStore>,
    tool: Arc<dyn MetadataTool>,
}

impl MetadataAdapter {
    pub fn new(store: Arc<StageStore>, tool: Arc<dyn MetadataTool>) -> Self {
        Self { store, tool }
    }

    #[instrument(skip_all, fields(%stage, image = %name, %lang))]
    pub async fn read(&self, stage: Stage, name: &ImageName, lang: &Lang) -> Result<MetadataMap> {
        let _guard = self.store.lock(stage, name).await;
        self.ensure_listed(stage, name).await?;
        self.tool.read(&self.store.path_of(stage, name), lang).await
    }

    #[instrument(skip_all, fields(%stage, image = %name))]
    pub async fn delete_all(&self, stage: Stage, name: &ImageName) -> Result<String> {
        let _guard = self.store.lock(stage, name).await;
        self.ensure_listed(stage, name).await?;
        let report = self.tool.delete_all(&self.store.path_of(stage, name)).await?;
        info!(%report, "Deleted all metadata");
        Ok(report)
    }

    async fn ensure_listed(&self, stage: Stage, name: &ImageName) -> Result<()> {
        if self.store.contains(stage, name).await? {
            Ok(())
        } else {
            Err(MetadataError::NotFound {
                stage,
                name: name.to_string(),
            })
        }
    }
}
