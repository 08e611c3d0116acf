use crate::engine::{Storage, StorageInner};
use crate::error::{StorageError, StorageErrorExt};
use sealed::Sealed;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::time::Duration;
use tokio::fs;
use tracing::info;

/// Temp files older than this are treated as crash leftovers.
const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(300);

#[derive(Debug, Default)]
pub struct Unrooted;
#[derive(Debug)]
pub struct Rooted(PathBuf);

mod sealed {
    pub trait Sealed {}
}
impl Sealed for Unrooted {}
impl Sealed for Rooted {}

/// Builder for [`Storage`]. A root directory must be set before [`connect`](StorageBuilder::connect).
#[allow(private_bounds)]
#[derive(Debug)]
pub struct StorageBuilder<S: Sealed = Unrooted> {
    root: S,
    create: bool,
    stale_after: Duration,
}

impl Default for StorageBuilder<Unrooted> {
    fn default() -> Self {
        Self { root: Unrooted, create: true, stale_after: DEFAULT_STALE_AFTER }
    }
}

#[allow(private_bounds)]
impl<S: Sealed> StorageBuilder<S> {
    /// Creates the root directory on connect when it is missing. Enabled by default.
    #[must_use]
    pub const fn create(mut self, enable: bool) -> Self {
        self.create = enable;
        self
    }

    /// Age after which leftover temp files are purged on connect.
    #[must_use]
    pub const fn stale_after(mut self, age: Duration) -> Self {
        self.stale_after = age;
        self
    }
}

impl StorageBuilder<Unrooted> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn root(self, path: impl Into<PathBuf>) -> StorageBuilder<Rooted> {
        StorageBuilder { root: Rooted(path.into()), create: self.create, stale_after: self.stale_after }
    }
}

impl StorageBuilder<Rooted> {
    /// Prepares the data directory and returns a shareable [`Storage`] handle.
    ///
    /// The root is created (when enabled) and canonicalized, so later sandbox
    /// checks compare against the physical location. Temp files abandoned by an
    /// earlier crash are swept before the handle is returned; a failed sweep is
    /// logged and does not abort the connect.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the root cannot be created or does not
    /// exist and creation is disabled.
    pub async fn connect(self) -> Result<Storage, StorageError> {
        let root = self.root.0;

        if self.create {
            fs::create_dir_all(&root)
                .await
                .context(format!("Failed to create data directory {}", root.display()))?;
        }

        let root = fs::canonicalize(&root)
            .await
            .context(format!("Failed to resolve data directory {}", root.display()))?;
        info!(path = %root.display(), "Data directory ready");

        let storage = Storage {
            inner: Arc::new(StorageInner {
                root,
                stale_after: self.stale_after,
                sequence: AtomicU64::new(0),
            }),
        };
        storage.purge_tmp().await;

        Ok(storage)
    }
}
