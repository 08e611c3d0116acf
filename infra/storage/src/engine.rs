use crate::builder::StorageBuilder;
use crate::error::{StorageError, StorageErrorExt};
use crate::maintenance::{self, TMP_MARKER};
use crate::security;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct StorageInner {
    /// Canonical data directory; every resolved path starts with it.
    pub(crate) root: PathBuf,
    pub(crate) stale_after: Duration,
    /// Distinguishes concurrent temp files of the same target.
    pub(crate) sequence: AtomicU64,
}

/// Handle to the data directory. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Storage {
    pub(crate) inner: Arc<StorageInner>,
}

impl Deref for Storage {
    type Target = StorageInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Storage {
    #[must_use = "The storage is not ready until you call .connect()"]
    pub fn builder() -> StorageBuilder {
        StorageBuilder::new()
    }

    /// Canonical root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    /// Maps a relative path into the data directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::PathTraversalAttempt`] if the path is absolute or
    /// would resolve outside the root.
    pub fn resolve(&self, path: impl AsRef<Path>) -> Result<PathBuf, StorageError> {
        security::resolve_path(&self.inner.root, path)
    }

    /// Reports whether `path` exists inside the data directory.
    ///
    /// # Errors
    ///
    /// Fails only when the path itself is rejected by the sandbox.
    pub fn exists(&self, path: impl AsRef<Path>) -> Result<bool, StorageError> {
        Ok(self.resolve(path)?.exists())
    }

    /// Reads a whole file.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::FileNotFound`] for a missing file and
    /// [`StorageError::Io`] for any other read failure.
    pub async fn read(&self, path: impl AsRef<Path>) -> Result<Vec<u8>, StorageError> {
        let resolved = self.resolve(path)?;

        fs::read(&resolved).await.map_err(|err| match err.kind() {
            ErrorKind::NotFound => StorageError::FileNotFound {
                message: resolved.display().to_string().into(),
                context: None,
            },
            _ => StorageError::Io {
                source: err,
                context: Some(format!("Failed to read {}", resolved.display()).into()),
            },
        })
    }

    /// Replaces the content of `path` atomically.
    ///
    /// The bytes land in a sibling temp file which is synced and then renamed
    /// over the target, so readers observe either the old or the new content.
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::PathTraversalAttempt`] for paths outside the root
    /// and [`StorageError::Io`] if any filesystem step fails. A failed write
    /// leaves the previous content untouched.
    pub async fn write(&self, path: impl AsRef<Path>, data: &[u8]) -> Result<(), StorageError> {
        let target = self.resolve(path)?;
        let parent = target.parent().map(Path::to_path_buf);

        if let Some(parent) = &parent {
            fs::create_dir_all(parent)
                .await
                .context(format!("Failed to create {}", parent.display()))?;
        }

        let temp = self.temp_path(&target);
        if let Err(err) = Self::write_synced(&temp, data).await {
            let _ = fs::remove_file(&temp).await;
            return Err(err);
        }

        if let Err(err) = fs::rename(&temp, &target).await {
            let _ = fs::remove_file(&temp).await;
            return Err(StorageError::Io {
                source: err,
                context: Some(format!("Failed to replace {}", target.display()).into()),
            });
        }

        if let Some(parent) = &parent {
            Self::sync_dir(parent).await;
        }

        debug!(path = %target.display(), bytes = data.len(), "File replaced");
        Ok(())
    }

    /// Deletes a file.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::FileNotFound`] if there is nothing to delete.
    pub async fn remove(&self, path: impl AsRef<Path>) -> Result<(), StorageError> {
        let resolved = self.resolve(path)?;

        fs::remove_file(&resolved).await.map_err(|err| match err.kind() {
            ErrorKind::NotFound => StorageError::FileNotFound {
                message: resolved.display().to_string().into(),
                context: None,
            },
            _ => StorageError::Io {
                source: err,
                context: Some(format!("Failed to delete {}", resolved.display()).into()),
            },
        })
    }

    /// Reads and deserializes a JSON document.
    ///
    /// # Errors
    ///
    /// Propagates [`read`](Self::read) failures and returns [`StorageError::Json`]
    /// if the content does not match `T`.
    pub async fn read_json<T>(&self, path: impl AsRef<Path>) -> Result<T, StorageError>
    where
        T: DeserializeOwned,
    {
        let path = path.as_ref();
        let bytes = self.read(path).await?;
        serde_json::from_slice(&bytes).context(format!("Failed to parse {}", path.display()))
    }

    /// Serializes `value` as pretty JSON and writes it atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Json`] if serialization fails, otherwise the
    /// errors of [`write`](Self::write).
    pub async fn write_json<T>(&self, path: impl AsRef<Path>, value: &T) -> Result<(), StorageError>
    where
        T: Serialize + ?Sized,
    {
        let path = path.as_ref();
        let mut bytes = serde_json::to_vec_pretty(value)
            .context(format!("Failed to serialize {}", path.display()))?;
        bytes.push(b'\n');
        self.write(path, &bytes).await
    }

    /// Sweeps temp files older than the configured age.
    pub async fn purge_tmp(&self) {
        maintenance::purge_tmp(&self.inner.root, self.inner.stale_after).await;
    }

    fn temp_path(&self, target: &Path) -> PathBuf {
        let seq = self.inner.sequence.fetch_add(1, Ordering::Relaxed);
        let name = target.file_name().and_then(|n| n.to_str()).unwrap_or("document");
        target.with_file_name(format!("{name}{TMP_MARKER}{}.{seq}", std::process::id()))
    }

    async fn write_synced(temp: &Path, data: &[u8]) -> Result<(), StorageError> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(temp)
            .await
            .context(format!("Failed to create {}", temp.display()))?;
        file.write_all(data).await.context(format!("Failed to write {}", temp.display()))?;
        file.sync_all().await.context(format!("Failed to sync {}", temp.display()))
    }

    async fn sync_dir(dir: &Path) {
        let synced = match fs::File::open(dir).await {
            Ok(handle) => handle.sync_all().await,
            Err(err) => Err(err),
        };
        if let Err(err) = synced {
            warn!(path = %dir.display(), error = %err, "Directory sync failed");
        }
    }
}
