use std::path::PathBuf;

use serde::Deserialize;

use crate::stage::Stage;

/// Where the four stage directories live.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Parent directory of the stage directories. Default: ".".
    #[serde(default = "default_storage_root")]
    pub root: PathBuf,
    /// Filenames never reported in listings. Default: ["images_edited.txt"].
    #[serde(default = "default_hidden_files")]
    pub hidden_files: Vec<String>,
}

fn default_storage_root() -> PathBuf {
    PathBuf::from(".")
}
fn default_hidden_files() -> Vec<String> {
    vec!["images_edited.txt".into()]
}

impl StorageConfig {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Directory backing `stage`.
    pub fn stage_dir(&self, stage: Stage) -> PathBuf {
        self.root.join(stage.dir_name())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_storage_root(),
            hidden_files: default_hidden_files(),
        }
    }
}

/// External metadata tool settings.
#[derive(Debug, Deserialize, Clone)]
pub struct MetadataConfig {
    /// exiftool executable. Default: "exiftool".
    #[serde(default = "default_exiftool_bin")]
    pub exiftool_bin: String,
    /// Language used when a request names none. Default: "en".
    #[serde(default = "default_lang")]
    pub default_lang: String,
    /// Upper bound for a single tool invocation, in seconds. Default: 30.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_exiftool_bin() -> String {
    "exiftool".into()
}
fn default_lang() -> String {
    "en".into()
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            exiftool_bin: default_exiftool_bin(),
            default_lang: default_lang(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
