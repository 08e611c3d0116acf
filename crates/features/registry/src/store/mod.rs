//! Persistence boundary of the registry.
//!
//! Both stores load and replace their whole collection. The [`Registrar`](crate::Registrar)
//! serializes writers, so implementations only need each call to be atomic.

mod json;
mod memory;

pub use json::{JsonRegistryStore, JsonUserStore};
pub use memory::{MemoryRegistryStore, MemoryUserStore};

use crate::error::RegistryError;
use async_trait::async_trait;
use chrono::Utc;
use orc_domain::config::SeedIssuer;
use orc_domain::records::{IssuerRecord, IssuerStatus, UserRecord};
use std::fmt::Debug;

#[async_trait]
pub trait RegistryStore: Debug + Send + Sync {
    /// All issuer records in insertion order.
    async fn load_all(&self) -> Result<Vec<IssuerRecord>, RegistryError>;

    /// Replaces the stored collection with `records`.
    async fn save_all(&self, records: &[IssuerRecord]) -> Result<(), RegistryError>;
}

#[async_trait]
pub trait UserStore: Debug + Send + Sync {
    async fn load_all(&self) -> Result<Vec<UserRecord>, RegistryError>;

    async fn save_all(&self, users: &[UserRecord]) -> Result<(), RegistryError>;
}

/// The record an empty registry starts with.
#[must_use]
pub fn seed_record(seed: &SeedIssuer) -> IssuerRecord {
    IssuerRecord {
        code: seed.code.clone(),
        name: seed.name.clone(),
        website: seed.website.clone(),
        contact: seed.contact.clone(),
        address: seed.address.clone(),
        status: IssuerStatus::Active,
        created: Utc::now(),
    }
}
