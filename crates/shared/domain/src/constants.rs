//! Names shared between the HTTP layer and the stores.

/// `OpenAPI` tag for operational endpoints.
pub const SYSTEM_TAG: &str = "System";
/// `OpenAPI` tag for registry endpoints.
pub const REGISTRY_TAG: &str = "Registry";

/// Issuer records document inside the data directory.
pub const REGISTRY_FILE: &str = "registry.json";
/// Account records document inside the data directory.
pub const USERS_FILE: &str = "users.json";

/// Inclusive year range accepted in an ORC code.
pub const MIN_YEAR: u16 = 1970;
pub const MAX_YEAR: u16 = 2099;
