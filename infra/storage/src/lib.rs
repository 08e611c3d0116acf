//! Sandboxed data directory for the registry's JSON documents.
//!
//! All paths are resolved relative to a canonical root and may never escape it.
//! Writes go through a unique temp file, `fsync` and `rename`, so a reader never
//! sees a half-written document even if the process dies mid-write.
//!
//! # Examples
//!
//! ```rust
//! use orc_storage::{Storage, StorageError};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), StorageError> {
//!     # let tmp = tempfile::tempdir().unwrap();
//!     # let root = tmp.path().join("data");
//!     let storage = Storage::builder().root(&root).create(true).connect().await?;
//!
//!     storage.write_json("registry.json", &vec!["FRC", "BNR"]).await?;
//!     let codes: Vec<String> = storage.read_json("registry.json").await?;
//!     assert_eq!(codes, ["FRC", "BNR"]);
//!
//!     Ok(())
//! }
//! ```

mod builder;
mod engine;
mod error;
mod maintenance;
mod security;

pub use builder::StorageBuilder;
pub use engine::Storage;
pub use error::{StorageError, StorageErrorExt};
