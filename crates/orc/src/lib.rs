//! Facade over the ORC registry crates.
//! Re-exports the domain, kernel and feature crates and initializes the feature slices.
//! Keep this crate thin: it composes other crates and holds no business logic.

pub use orc_domain as domain;
pub use orc_kernel as kernel;
pub use orc_registry as registry;
pub use orc_storage as storage;

use orc_domain::config::AppConfig;
use orc_domain::slices::InitializedSlice;
use orc_registry::RegistryError;
use orc_storage::Storage;

#[cfg(feature = "server")]
pub mod server {
    use orc_kernel::server::ApiState;
    use utoipa_axum::router::OpenApiRouter;

    /// System routes plus every feature router.
    pub fn router() -> OpenApiRouter<ApiState> {
        orc_kernel::server::router::system_router().merge(orc_registry::server::router())
    }
}

/// Initializes every feature slice over the shared data directory.
///
/// # Errors
/// Returns the first slice initialization failure.
pub async fn init(
    config: &AppConfig,
    storage: &Storage,
) -> Result<Vec<InitializedSlice>, RegistryError> {
    let slices = vec![orc_registry::init(config, storage).await?];
    tracing::debug!(count = slices.len(), "Feature slices initialized");
    Ok(slices)
}
