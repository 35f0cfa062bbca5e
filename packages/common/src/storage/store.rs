use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info, instrument, warn};

use super::error::StorageError;
use super::hash::ContentHash;
use super::locks::{NameGuard, NameLocks};
use super::transition::{TransferKind, Transition};
use crate::config::StorageConfig;
use crate::image_name::ImageName;
use crate::stage::Stage;

/// The four stage directories plus the lock table guarding them.
///
/// Every mutation holds the (stage, filename) locks of the names it touches
/// for its whole check-then-act sequence. In-flight writes go to dot-prefixed
/// `.partial` files inside the destination directory, which listings skip.
pub struct StageStore {
    config: StorageConfig,
    locks: NameLocks,
}

impl StageStore {
    /// Open the store, creating any missing stage directory.
    pub async fn open(config: StorageConfig) -> Result<Self, StorageError> {
        for stage in Stage::ALL {
            fs::create_dir_all(config.stage_dir(stage)).await?;
        }
        Ok(Self {
            config,
            locks: NameLocks::new(),
        })
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn stage_dir(&self, stage: Stage) -> PathBuf {
        self.config.stage_dir(stage)
    }

    pub fn path_of(&self, stage: Stage, name: &ImageName) -> PathBuf {
        self.stage_dir(stage).join(name.as_str())
    }

    fn partial_path(&self, stage: Stage) -> PathBuf {
        self.stage_dir(stage)
            .join(format!(".{}.partial", uuid::Uuid::new_v4()))
    }

    /// Whether `name` is kept out of listings. Hidden names are treated as
    /// absent by every read and mutation, and can never be created.
    pub fn is_hidden(&self, name: &str) -> bool {
        name.starts_with('.') || self.config.hidden_files.iter().any(|h| h == name)
    }

    fn reject_hidden(&self, stage: Stage, name: &ImageName) -> Result<(), StorageError> {
        if self.is_hidden(name) {
            return Err(StorageError::ReservedName {
                stage,
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Lock a single name for the lifetime of the returned guard.
    pub async fn lock(&self, stage: Stage, name: &ImageName) -> NameGuard<'_> {
        self.locks.lock([(stage, name)]).await
    }

    /// Filenames in a stage, sorted. Dotfiles, directories and configured
    /// sentinel files are left out.
    #[instrument(skip_all, fields(%stage))]
    pub async fn list(&self, stage: Stage) -> Result<Vec<String>, StorageError> {
        let mut entries = fs::read_dir(self.stage_dir(stage)).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                warn!(path = %entry.path().display(), "Skipping non UTF-8 filename");
                continue;
            };
            if self.is_hidden(&name) {
                continue;
            }
            names.push(name);
        }

        names.sort();
        debug!(count = names.len(), "Listed stage");
        Ok(names)
    }

    /// Whether `name` shows up in the stage listing.
    pub async fn contains(&self, stage: Stage, name: &ImageName) -> Result<bool, StorageError> {
        Ok(self.list(stage).await?.iter().any(|n| n == name.as_str()))
    }

    /// Read a whole image.
    pub async fn read(&self, stage: Stage, name: &ImageName) -> Result<Vec<u8>, StorageError> {
        if self.is_hidden(name) {
            return Err(not_found(stage, name));
        }
        let _guard = self.lock(stage, name).await;
        fs::read(self.path_of(stage, name))
            .await
            .map_err(|e| not_found_or_io(e, stage, name))
    }

    /// Start writing an image into a stage. The file only appears under its
    /// name once [`Upload::commit`] succeeds, replacing any file of the same
    /// name; dropping the upload earlier discards what was written. Hidden
    /// names are refused with [`StorageError::ReservedName`].
    #[instrument(skip_all, fields(%stage, image = %name))]
    pub async fn begin_upload(
        &self,
        stage: Stage,
        name: &ImageName,
    ) -> Result<Upload<'_>, StorageError> {
        self.reject_hidden(stage, name)?;
        let guard = self.lock(stage, name).await;
        let partial = self.partial_path(stage);
        let file = fs::File::create(&partial).await?;

        Ok(Upload {
            _guard: guard,
            file: Some(file),
            partial,
            target: self.path_of(stage, name),
            written: 0,
        })
    }

    /// Store a complete image in one go, replacing any file of the same name.
    pub async fn put(
        &self,
        stage: Stage,
        name: &ImageName,
        data: &[u8],
    ) -> Result<u64, StorageError> {
        let mut upload = self.begin_upload(stage, name).await?;
        upload.write(data).await?;
        upload.commit().await
    }

    /// Permanently remove an image from a stage.
    #[instrument(skip_all, fields(%stage, image = %name))]
    pub async fn delete(&self, stage: Stage, name: &ImageName) -> Result<(), StorageError> {
        if self.is_hidden(name) {
            return Err(not_found(stage, name));
        }
        let _guard = self.lock(stage, name).await;
        fs::remove_file(self.path_of(stage, name))
            .await
            .map_err(|e| not_found_or_io(e, stage, name))?;
        info!("Deleted image");
        Ok(())
    }

    /// Run a lifecycle transition on `name`. Returns the destination filename.
    ///
    /// Fails with [`StorageError::NotFound`] when the source is missing or
    /// hidden, with [`StorageError::ReservedName`] when the destination name
    /// is hidden and with [`StorageError::AlreadyExists`] when the destination
    /// is occupied. In every case neither directory is touched.
    #[instrument(skip_all, fields(image = %name, %transition))]
    pub async fn transfer(
        &self,
        transition: Transition,
        name: &ImageName,
    ) -> Result<ImageName, StorageError> {
        let (from, to) = (transition.source(), transition.destination());
        let target = transition.destination_name(name);
        if self.is_hidden(name) {
            return Err(not_found(from, name));
        }
        self.reject_hidden(to, &target)?;
        let _guard = self.locks.lock([(from, name), (to, &target)]).await;

        let src = self.path_of(from, name);
        let dst = self.path_of(to, &target);

        if !is_file(&src).await? {
            return Err(not_found(from, name));
        }
        if fs::try_exists(&dst).await? {
            return Err(StorageError::AlreadyExists {
                stage: to,
                name: target.to_string(),
            });
        }

        match transition.kind() {
            TransferKind::Copy => self.copy_verified(&src, to, &dst, &target).await?,
            TransferKind::Move => self.move_file(&src, to, &dst, &target).await?,
        }

        info!(destination = %target, "Transferred image");
        Ok(target)
    }

    /// Rename, falling back to copy + verify + delete when the stages sit on
    /// different filesystems.
    ///
    /// If the source cannot be removed after the verified copy is in place,
    /// the error is returned with the image present in both stages.
    async fn move_file(
        &self,
        src: &Path,
        to: Stage,
        dst: &Path,
        target: &ImageName,
    ) -> Result<(), StorageError> {
        match fs::rename(src, dst).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::CrossesDevices => {
                warn!("Cross-device rename, falling back to copy");
                self.copy_verified(src, to, dst, target).await?;
                if let Err(e) = fs::remove_file(src).await {
                    error!(
                        source = %src.display(),
                        destination = %dst.display(),
                        "Copied image but could not remove source, image now exists in both stages: {e}"
                    );
                    return Err(e.into());
                }
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Copy into a scratch file next to `dst`, check the bytes match the
    /// source, then rename the scratch file into place.
    async fn copy_verified(
        &self,
        src: &Path,
        to: Stage,
        dst: &Path,
        target: &ImageName,
    ) -> Result<(), StorageError> {
        let partial = self.partial_path(to);

        let result = async {
            fs::copy(src, &partial).await?;
            let expected = ContentHash::of_file(src).await?;
            let actual = ContentHash::of_file(&partial).await?;
            if expected != actual {
                return Err(StorageError::VerificationFailed {
                    name: target.to_string(),
                    expected: expected.to_hex(),
                    actual: actual.to_hex(),
                });
            }
            fs::rename(&partial, dst).await?;
            Ok(())
        }
        .await;

        if result.is_err() {
            let _ = fs::remove_file(&partial).await;
        }
        result
    }
}

/// An image being written into a stage. Holds the name's lock until it is
/// committed or dropped.
pub struct Upload<'a> {
    _guard: NameGuard<'a>,
    file: Option<fs::File>,
    partial: PathBuf,
    target: PathBuf,
    written: u64,
}

impl Upload<'_> {
    pub async fn write(&mut self, chunk: &[u8]) -> Result<(), StorageError> {
        if let Some(file) = self.file.as_mut() {
            file.write_all(chunk).await?;
            self.written += chunk.len() as u64;
        }
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flush the scratch file and move it into place. Returns the byte count.
    pub async fn commit(mut self) -> Result<u64, StorageError> {
        if let Some(mut file) = self.file.take() {
            file.flush().await?;
            file.sync_all().await?;
        }
        fs::rename(&self.partial, &self.target).await?;
        info!(bytes = self.written, "Stored image");
        Ok(self.written)
    }
}

impl Drop for Upload<'_> {
    fn drop(&mut self) {
        // After a successful commit the scratch path no longer exists.
        // Blocking unlink: Drop cannot await, and it is a single syscall.
        drop(self.file.take());
        let _ = std::fs::remove_file(&self.partial);
    }
}

async fn is_file(path: &Path) -> Result<bool, StorageError> {
    match fs::metadata(path).await {
        Ok(meta) => Ok(meta.is_file()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

fn not_found(stage: Stage, name: &ImageName) -> StorageError {
    StorageError::NotFound {
        stage,
        name: name.to_string(),
    }
}

fn not_found_or_io(err: std::io::Error, stage: Stage, name: &ImageName) -> StorageError {
    if err.kind() == ErrorKind::NotFound {
        not_found(stage, name)
    } else {
        err.into()
    }
}
