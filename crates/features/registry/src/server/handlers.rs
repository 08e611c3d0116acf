use super::models::{
    ErrorResponse, IssuerEntry, LookupResponse, RegisterRequest, RegisterResponse,
    ValidationResponse,
};
use crate::error::RegistryError;
use crate::registrar::RegistrationRequest;
use crate::validator::LookupError;
use crate::Registry;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use orc_derive::api_handler;
use orc_domain::constants::REGISTRY_TAG;
use orc_kernel::server::{ApiError, ApiState};

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::MissingFields { .. } => Self::bad_request("Missing required fields"),
            RegistryError::UserExists { .. } => Self::bad_request("User already exists"),
            RegistryError::CapacityExhausted { .. } => {
                tracing::error!(error = %err, "Registration refused");
                Self::unavailable("No issuer codes available")
            },
            RegistryError::Storage { .. }
            | RegistryError::Hashing { .. }
            | RegistryError::Internal { .. } => Self::internal(&err),
        }
    }
}

#[api_handler(
    get,
    path = "/api/validate/{orc}",
    params(("orc" = String, Path, description = "Identifier to check, case-insensitive")),
    responses(
        (status = OK, description = "Validation verdict", body = ValidationResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Registry unavailable", body = ErrorResponse),
    ),
    tag = REGISTRY_TAG,
)]
pub(super) async fn validate_handler(
    State(state): State<ApiState>,
    Path(orc): Path<String>,
) -> Result<Json<ValidationResponse>, ApiError> {
    let registry = state.try_get_slice::<Registry>()?;

    let body = match registry.registrar.validate(&orc).await? {
        Ok(_) => ValidationResponse { valid: true, error: None },
        Err(failure) => ValidationResponse { valid: false, error: Some(failure.to_string()) },
    };

    Ok(Json(body))
}

#[api_handler(
    get,
    path = "/api/lookup/{orc}",
    params(("orc" = String, Path, description = "Identifier to resolve, case-insensitive")),
    responses(
        (status = OK, description = "Identifier and its issuer", body = LookupResponse),
        (status = BAD_REQUEST, description = "Identifier is invalid", body = ErrorResponse),
        (status = NOT_FOUND, description = "Issuer not found", body = ErrorResponse),
    ),
    tag = REGISTRY_TAG,
)]
pub(super) async fn lookup_handler(
    State(state): State<ApiState>,
    Path(orc): Path<String>,
) -> Result<Json<LookupResponse>, ApiError> {
    let registry = state.try_get_slice::<Registry>()?;

    match registry.registrar.lookup(&orc).await? {
        Ok(found) => Ok(Json(found.into())),
        Err(LookupError::Invalid(failure)) => Err(ApiError::bad_request(failure.to_string())),
        Err(err @ LookupError::IssuerNotFound) => Err(ApiError::not_found(err.to_string())),
    }
}

#[api_handler(
    get,
    path = "/api/registry",
    responses((status = OK, description = "All issuers in registration order", body = Vec<IssuerEntry>)),
    tag = REGISTRY_TAG,
)]
pub(super) async fn registry_handler(
    State(state): State<ApiState>,
) -> Result<Json<Vec<IssuerEntry>>, ApiError> {
    let registry = state.try_get_slice::<Registry>()?;
    let records = registry.registrar.registry().await?;

    Ok(Json(records.into_iter().map(IssuerEntry::from).collect()))
}

#[api_handler(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = OK, description = "Issuer registered", body = RegisterResponse),
        (status = BAD_REQUEST, description = "Missing fields or duplicate account", body = ErrorResponse),
        (status = SERVICE_UNAVAILABLE, description = "No issuer codes left", body = ErrorResponse),
    ),
    tag = REGISTRY_TAG,
)]
pub(super) async fn register_handler(
    State(state): State<ApiState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let Json(form) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let registry = state.try_get_slice::<Registry>()?;

    let request = RegistrationRequest {
        email: form.email.unwrap_or_default(),
        password: form.password.unwrap_or_default(),
        company_name: form.company_name.unwrap_or_default(),
        website: form.website,
        address: form.address,
    };
    let orc_code = registry.registrar.register(request).await?;

    Ok(Json(RegisterResponse { success: true, orc_code }))
}
