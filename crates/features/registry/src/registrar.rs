use crate::allocator::Allocator;
use crate::credentials::hash_password;
use crate::deriver::derive_issuer_code;
use crate::error::{RegistryError, RegistryErrorExt};
use crate::snapshot::RegistrySnapshot;
use crate::store::{RegistryStore, UserStore};
use crate::validator::{self, Lookup, LookupError, OrcIdentifier, ValidationFailure};
use chrono::Utc;
use orc_domain::records::{IssuerRecord, IssuerStatus, UserRecord};
use orc_kernel::safe_nanoid;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Input of [`Registrar::register`].
#[derive(Debug, Clone, Default)]
pub struct RegistrationRequest {
    pub email: String,
    pub password: String,
    pub company_name: String,
    pub website: Option<String>,
    pub address: Option<String>,
}

impl RegistrationRequest {
    fn check_required(&self) -> Result<(), RegistryError> {
        let missing: Vec<&str> = [
            ("email", &self.email),
            ("password", &self.password),
            ("companyName", &self.company_name),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(RegistryError::MissingFields { message: missing.join(", ").into(), context: None })
        }
    }
}

/// Registers issuers and answers validation queries.
///
/// Registrations run one at a time: reading the stores, allocating the code and
/// writing both stores happen under a single lock, so two requests can never
/// commit the same issuer code. Queries read the store on every call.
#[derive(Debug, Clone)]
pub struct Registrar {
    registry: Arc<dyn RegistryStore>,
    users: Arc<dyn UserStore>,
    allocator: Allocator,
    commit: Arc<Mutex<()>>,
}

impl Registrar {
    #[must_use]
    pub fn new(
        registry: Arc<dyn RegistryStore>,
        users: Arc<dyn UserStore>,
        allocator: Allocator,
    ) -> Self {
        Self { registry, users, allocator, commit: Arc::new(Mutex::new(())) }
    }

    /// Creates an issuer and its account, returning the allocated issuer code.
    ///
    /// # Errors
    /// - [`RegistryError::MissingFields`] if email, password or company name is blank.
    /// - [`RegistryError::UserExists`] if the email is already registered.
    /// - [`RegistryError::CapacityExhausted`] if no issuer code is left.
    /// - [`RegistryError::Hashing`] if the password cannot be hashed.
    /// - [`RegistryError::Storage`] if a store cannot be read or written. A failed
    ///   account write restores the previous registry.
    pub async fn register(&self, request: RegistrationRequest) -> Result<String, RegistryError> {
        request.check_required()?;
        let password = request.password.clone();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| RegistryError::from(format!("Password hashing task failed: {e}")))?
            .context("Failed to hash the password")?;
        let candidate = derive_issuer_code(&request.company_name);

        let _guard = self.commit.lock().await;

        let mut users = self.users.load_all().await.context("Failed to load accounts")?;
        if users.iter().any(|user| user.email == request.email) {
            return Err(RegistryError::UserExists { message: request.email.into(), context: None });
        }

        let snapshot = self.snapshot().await?;
        let code = {
            let mut rng = rand::rng();
            self.allocator.allocate(&candidate, &snapshot.used_codes(), &mut rng)?
        };

        let created = Utc::now();
        let website = request.website.unwrap_or_default();
        let address = request.address.unwrap_or_default();

        let previous = snapshot.into_records();
        let mut records = previous.clone();
        records.push(IssuerRecord {
            code: code.clone(),
            name: request.company_name.clone(),
            website: website.clone(),
            contact: request.email.clone(),
            address: address.clone(),
            status: IssuerStatus::Active,
            created,
        });
        self.registry.save_all(&records).await.context("Failed to save the registry")?;

        users.push(UserRecord {
            id: safe_nanoid!(),
            email: request.email,
            password_hash,
            company_name: request.company_name,
            website,
            address,
            orc_code: code.clone(),
            created,
        });
        if let Err(err) = self.users.save_all(&users).await {
            if let Err(rollback) = self.registry.save_all(&previous).await {
                error!(code = %code, error = %rollback, "Failed to roll back the registry");
            }
            return Err(err).context("Failed to save accounts");
        }

        info!(code = %code, candidate = %candidate, "Issuer registered");
        Ok(code)
    }

    /// Validates `raw` against the current registry.
    ///
    /// The outer error reports store failures; the inner result is the verdict.
    pub async fn validate(
        &self,
        raw: &str,
    ) -> Result<Result<OrcIdentifier, ValidationFailure>, RegistryError> {
        Ok(validator::validate(raw, &self.snapshot().await?))
    }

    /// Validates `raw` and resolves its issuer against the current registry.
    pub async fn lookup(&self, raw: &str) -> Result<Result<Lookup, LookupError>, RegistryError> {
        Ok(validator::lookup(raw, &self.snapshot().await?))
    }

    /// Every issuer record, in registration order.
    pub async fn registry(&self) -> Result<Vec<IssuerRecord>, RegistryError> {
        self.registry.load_all().await
    }

    async fn snapshot(&self) -> Result<RegistrySnapshot, RegistryError> {
        self.registry.load_all().await.map(RegistrySnapshot::new).context("Failed to load the registry")
    }
}
