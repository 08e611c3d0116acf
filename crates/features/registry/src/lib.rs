//! # Issuer registry
//!
//! Issues issuer codes to companies and validates ORC identifiers
//! (`ISSUER-YEAR-TRACK-SUFFIX`) against the registered issuers.
//!
//! ## Pipeline
//!
//! 1. **Derivation ([`deriver`])**: company name to a 3-letter candidate code.
//! 2. **Allocation ([`allocator`])**: candidate to a code that is not registered yet.
//! 3. **Validation ([`validator`])**: identifier string to a parsed [`OrcIdentifier`]
//!    or a [`ValidationFailure`].
//!
//! The [`Registrar`] ties the three together over a [`RegistryStore`] and a
//! [`UserStore`]. With the `server` feature the crate also exposes the HTTP
//! handlers under [`server`].
//!
//! ```rust
//! use orc_registry::allocator::Allocator;
//! use orc_registry::store::{MemoryRegistryStore, MemoryUserStore};
//! use orc_registry::{RegistrationRequest, Registrar};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), orc_registry::RegistryError> {
//! let registrar = Registrar::new(
//!     Arc::new(MemoryRegistryStore::default()),
//!     Arc::new(MemoryUserStore::default()),
//!     Allocator::default(),
//! );
//!
//! let code = registrar
//!     .register(RegistrationRequest {
//!         email: "ops@bluenote.example".into(),
//!         password: "s3cret".into(),
//!         company_name: "Blue Note Records".into(),
//!         ..Default::default()
//!     })
//!     .await?;
//! assert_eq!(code, "BNR");
//!
//! let verdict = registrar.validate("bnr-2024-000001-a1b").await?;
//! assert!(verdict.is_ok());
//! # Ok(())
//! # }
//! ```

pub mod allocator;
pub mod credentials;
pub mod deriver;
mod error;
mod registrar;
#[cfg(feature = "server")]
pub mod server;
mod snapshot;
pub mod store;
pub mod validator;

pub use crate::deriver::derive_issuer_code;
pub use crate::error::{RegistryError, RegistryErrorExt};
pub use crate::registrar::{RegistrationRequest, Registrar};
pub use crate::snapshot::RegistrySnapshot;
pub use crate::store::{RegistryStore, UserStore};
pub use crate::validator::{OrcIdentifier, ValidationFailure};

use crate::allocator::Allocator;
use crate::store::{JsonRegistryStore, JsonUserStore};
use orc_kernel::domain::config::AppConfig;
use orc_kernel::domain::slices::InitializedSlice;
use orc_storage::Storage;
use std::sync::Arc;

/// Registry feature state shared with the HTTP handlers.
#[orc_derive::orc_slice]
pub struct Registry {
    pub registrar: Registrar,
}

/// Opens the JSON stores in `storage` and builds the registry slice.
///
/// # Errors
/// Returns [`RegistryError::Storage`] if the stores cannot be created or seeded.
pub async fn init(config: &AppConfig, storage: &Storage) -> Result<InitializedSlice, RegistryError> {
    let registry = JsonRegistryStore::open(storage.clone(), &config.registry.seed).await?;
    let users = JsonUserStore::open(storage.clone()).await?;
    let allocator = Allocator::new(config.registry.max_random_attempts);

    let slice =
        Registry::new(RegistryInner { registrar: Registrar::new(Arc::new(registry), Arc::new(users), allocator) });
    tracing::info!(
        path = %storage.root().display(),
        max_random_attempts = allocator.max_random_attempts(),
        "Registry slice initialized"
    );

    Ok(InitializedSlice::new(slice))
}
