use super::{RegistryStore, UserStore, seed_record};
use crate::error::{RegistryError, RegistryErrorExt};
use async_trait::async_trait;
use orc_domain::config::SeedIssuer;
use orc_domain::constants::{REGISTRY_FILE, USERS_FILE};
use orc_domain::records::{IssuerRecord, UserRecord};
use orc_storage::Storage;
use tracing::info;

/// Registry persisted as `registry.json` in the data directory.
#[derive(Debug, Clone)]
pub struct JsonRegistryStore {
    storage: Storage,
}

impl JsonRegistryStore {
    /// Opens the store, writing the seed issuer when the file does not exist yet.
    pub async fn open(storage: Storage, seed: &SeedIssuer) -> Result<Self, RegistryError> {
        if !storage.exists(REGISTRY_FILE)? {
            storage
                .write_json(REGISTRY_FILE, &[seed_record(seed)])
                .await
                .context("Failed to seed the registry")?;
            info!(code = %seed.code, "Seeded empty registry");
        }

        Ok(Self { storage })
    }
}

#[async_trait]
impl RegistryStore for JsonRegistryStore {
    async fn load_all(&self) -> Result<Vec<IssuerRecord>, RegistryError> {
        Ok(self.storage.read_json(REGISTRY_FILE).await?)
    }

    async fn save_all(&self, records: &[IssuerRecord]) -> Result<(), RegistryError> {
        Ok(self.storage.write_json(REGISTRY_FILE, records).await?)
    }
}

/// Accounts persisted as `users.json` in the data directory.
#[derive(Debug, Clone)]
pub struct JsonUserStore {
    storage: Storage,
}

impl JsonUserStore {
    /// Opens the store, creating an empty `users.json` when it does not exist yet.
    pub async fn open(storage: Storage) -> Result<Self, RegistryError> {
        if !storage.exists(USERS_FILE)? {
            storage
                .write_json::<[UserRecord]>(USERS_FILE, &[])
                .await
                .context("Failed to create the user store")?;
        }

        Ok(Self { storage })
    }
}

#[async_trait]
impl UserStore for JsonUserStore {
    async fn load_all(&self) -> Result<Vec<UserRecord>, RegistryError> {
        Ok(self.storage.read_json(USERS_FILE).await?)
    }

    async fn save_all(&self, users: &[UserRecord]) -> Result<(), RegistryError> {
        Ok(self.storage.write_json(USERS_FILE, users).await?)
    }
}
