use chrono::{DateTime, Utc};
use orc_derive::api_model;
use orc_domain::records::IssuerRecord;

use crate::validator::{IssuerSummary, Lookup};

#[api_model]
/// Outcome of `GET /api/validate/{orc}`
pub struct ValidationResponse {
    pub valid: bool,
    /// Reason for rejection, absent when `valid` is true
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[api_model]
/// Public issuer fields
pub struct IssuerView {
    pub code: String,
    pub name: String,
    pub website: String,
    /// `active`, `suspended` or `revoked`
    pub status: String,
}

impl From<IssuerSummary> for IssuerView {
    fn from(summary: IssuerSummary) -> Self {
        Self {
            code: summary.code,
            name: summary.name,
            website: summary.website,
            status: summary.status.to_string(),
        }
    }
}

#[api_model]
/// Resolved identifier
pub struct LookupResponse {
    /// Normalized (uppercase) identifier
    pub orc: String,
    pub issuer: IssuerView,
    pub valid: bool,
}

impl From<Lookup> for LookupResponse {
    fn from(lookup: Lookup) -> Self {
        Self { orc: lookup.orc, issuer: lookup.issuer.into(), valid: true }
    }
}

#[api_model]
/// Registry entry
pub struct IssuerEntry {
    pub code: String,
    pub name: String,
    pub website: String,
    pub contact: String,
    pub address: String,
    pub status: String,
    pub created: DateTime<Utc>,
}

impl From<IssuerRecord> for IssuerEntry {
    fn from(record: IssuerRecord) -> Self {
        Self {
            code: record.code,
            name: record.name,
            website: record.website,
            contact: record.contact,
            address: record.address,
            status: record.status.to_string(),
            created: record.created,
        }
    }
}

#[api_model(deny_unknown_fields = false)]
/// Registration form. `email`, `password` and `companyName` are required.
#[derive(Default)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[api_model]
/// Successful registration
pub struct RegisterResponse {
    pub success: bool,
    /// Issuer code allocated to the company
    pub orc_code: String,
}

#[api_model]
/// Error envelope shared by every endpoint
pub struct ErrorResponse {
    pub error: String,
}
