use super::{RegistryStore, UserStore, seed_record};
use crate::error::RegistryError;
use async_trait::async_trait;
use orc_domain::config::SeedIssuer;
use orc_domain::records::{IssuerRecord, UserRecord};
use parking_lot::RwLock;

/// Registry kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryRegistryStore {
    records: RwLock<Vec<IssuerRecord>>,
}

impl MemoryRegistryStore {
    #[must_use]
    pub const fn new(records: Vec<IssuerRecord>) -> Self {
        Self { records: RwLock::new(records) }
    }

    /// Starts with the single seed issuer.
    #[must_use]
    pub fn seeded(seed: &SeedIssuer) -> Self {
        Self::new(vec![seed_record(seed)])
    }
}

#[async_trait]
impl RegistryStore for MemoryRegistryStore {
    async fn load_all(&self) -> Result<Vec<IssuerRecord>, RegistryError> {
        Ok(self.records.read().clone())
    }

    async fn save_all(&self, records: &[IssuerRecord]) -> Result<(), RegistryError> {
        records.clone_into(&mut self.records.write());
        Ok(())
    }
}

/// Accounts kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<UserRecord>>,
}

impl MemoryUserStore {
    #[must_use]
    pub const fn new(users: Vec<UserRecord>) -> Self {
        Self { users: RwLock::new(users) }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn load_all(&self) -> Result<Vec<UserRecord>, RegistryError> {
        Ok(self.users.read().clone())
    }

    async fn save_all(&self, users: &[UserRecord]) -> Result<(), RegistryError> {
        users.clone_into(&mut self.users.write());
        Ok(())
    }
}
