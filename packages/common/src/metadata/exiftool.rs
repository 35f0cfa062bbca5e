use std::ffi::OsString;
use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::process::Command;
use tracing::{debug, instrument};

use super::error::{MetadataError, Result};
use super::lang::Lang;
use super::tool::{MetadataMap, MetadataTool};
use crate::config::MetadataConfig;

/// Bookkeeping key exiftool adds to every JSON record.
const SOURCE_FILE_KEY: &str = "SourceFile";

/// [`MetadataTool`] backed by the `exiftool` command line program.
#[derive(Debug, Clone)]
pub struct ExifTool {
    bin: String,
    timeout: Duration,
}

impl ExifTool {
    pub fn new(config: &MetadataConfig) -> Self {
        Self {
            bin: config.exiftool_bin.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    async fn run(&self, args: Vec<OsString>) -> Result<Output> {
        let mut command = Command::new(&self.bin);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(bin = %self.bin, ?args, "Running metadata tool");

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| MetadataError::Timeout(self.timeout.as_secs()))?
            .map_err(|e| MetadataError::Tool(format!("failed to run {}: {e}", self.bin)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if stderr.is_empty() {
                format!("{} exited with {}", self.bin, output.status)
            } else {
                stderr
            };
            return Err(MetadataError::Tool(detail));
        }

        Ok(output)
    }
}

#[async_trait]
impl MetadataTool for ExifTool {
    #[instrument(skip_all, fields(path = %path.display(), %lang))]
    async fn read(&self, path: &Path, lang: &Lang) -> Result<MetadataMap> {
        let output = self
            .run(vec![
                "-json".into(),
                "-lang".into(),
                lang.as_str().into(),
                path.as_os_str().to_owned(),
            ])
            .await?;
        parse_json_output(&output.stdout)
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    async fn delete_all(&self, path: &Path) -> Result<String> {
        let output = self
            .run(vec![
                "-all=".into(),
                "-overwrite_original".into(),
                path.as_os_str().to_owned(),
            ])
            .await?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Turn `exiftool -json` output (an array with one object per file) into a
/// flat map of strings.
fn parse_json_output(stdout: &[u8]) -> Result<MetadataMap> {
    let records: Vec<Map<String, Value>> =
        serde_json::from_slice(stdout).map_err(|e| MetadataError::Parse(e.to_string()))?;

    let record = records
        .into_iter()
        .next()
        .ok_or_else(|| MetadataError::Parse("no record in output".into()))?;

    Ok(record
        .into_iter()
        .filter(|(key, _)| key != SOURCE_FILE_KEY)
        .map(|(key, value)| (key, render_value(value)))
        .collect())
}

fn render_value(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Array(items) => items
            .into_iter()
            .map(render_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
