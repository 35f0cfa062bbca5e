use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;

use super::error::Result;
use super::lang::Lang;

/// Field name to rendered value, as reported by the metadata tool.
pub type MetadataMap = BTreeMap<String, String>;

/// An external program that reads and strips image metadata.
#[async_trait]
pub trait MetadataTool: Send + Sync {
    /// Read every tag of the file at `path`, with names/values in `lang`.
    async fn read(&self, path: &Path, lang: &Lang) -> Result<MetadataMap>;

    /// Strip all metadata from the file at `path`. Returns the tool's own report.
    async fn delete_all(&self, path: &Path) -> Result<String>;
}
