//! # ORC identifier validation
//!
//! An ORC identifier reads `ISSUER-YEAR-TRACK-SUFFIX`, for example
//! `FRC-2024-000123-A1B`:
//!
//! | Part     | Shape                       |
//! |----------|-----------------------------|
//! | `ISSUER` | 3 or 4 of `A-Z`, `0-9`      |
//! | `YEAR`   | 4 digits within 1970..=2099 |
//! | `TRACK`  | 6 digits                    |
//! | `SUFFIX` | 3 of `A-Z`, `0-9`           |
//!
//! Validation checks, in order: shape, year range and that the issuer is
//! registered. Input is uppercased first, so `frc-2024-000123-a1b` is accepted.

use crate::snapshot::RegistrySnapshot;
use orc_domain::constants::{MAX_YEAR, MIN_YEAR};
use orc_domain::records::{IssuerRecord, IssuerStatus};
use std::fmt;
use std::str::FromStr;

/// Why an identifier was rejected. The display strings are part of the public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationFailure {
    #[error("Invalid ORC format")]
    Format,
    #[error("Invalid year")]
    Year,
    #[error("Unknown issuer code")]
    UnknownIssuer,
}

/// Why a lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error(transparent)]
    Invalid(#[from] ValidationFailure),
    #[error("Issuer not found")]
    IssuerNotFound,
}

/// A structurally valid identifier. Parsing checks shape only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrcIdentifier {
    pub issuer: String,
    pub year: u16,
    pub track: String,
    pub suffix: String,
}

impl FromStr for OrcIdentifier {
    type Err = ValidationFailure;

    /// Expects uppercase input; see [`validate`] for the normalizing entry point.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('-');
        let (Some(issuer), Some(year), Some(track), Some(suffix), None) =
            (parts.next(), parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(ValidationFailure::Format);
        };

        let shaped = (3..=4).contains(&issuer.len())
            && issuer.bytes().all(is_code_byte)
            && is_digits(year, 4)
            && is_digits(track, 6)
            && suffix.len() == 3
            && suffix.bytes().all(is_code_byte);
        if !shaped {
            return Err(ValidationFailure::Format);
        }

        Ok(Self {
            issuer: issuer.to_owned(),
            year: year.parse().map_err(|_| ValidationFailure::Format)?,
            track: track.to_owned(),
            suffix: suffix.to_owned(),
        })
    }
}

impl fmt::Display for OrcIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:04}-{}-{}", self.issuer, self.year, self.track, self.suffix)
    }
}

const fn is_code_byte(b: u8) -> bool {
    b.is_ascii_uppercase() || b.is_ascii_digit()
}

fn is_digits(part: &str, len: usize) -> bool {
    part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
}

/// Validates `raw` against the registry.
///
/// ```rust
/// use orc_registry::validator::{validate, ValidationFailure};
/// use orc_registry::RegistrySnapshot;
///
/// let empty = RegistrySnapshot::default();
/// assert_eq!(validate("FRC-99-1-X", &empty), Err(ValidationFailure::Format));
/// assert_eq!(validate("FRC-1900-000001-ABC", &empty), Err(ValidationFailure::Year));
/// assert_eq!(validate("ZZZ-2024-000001-ABC", &empty), Err(ValidationFailure::UnknownIssuer));
/// ```
pub fn validate(raw: &str, snapshot: &RegistrySnapshot) -> Result<OrcIdentifier, ValidationFailure> {
    let id: OrcIdentifier = raw.to_uppercase().parse()?;

    if !(MIN_YEAR..=MAX_YEAR).contains(&id.year) {
        return Err(ValidationFailure::Year);
    }
    if !snapshot.contains(&id.issuer) {
        return Err(ValidationFailure::UnknownIssuer);
    }

    Ok(id)
}

/// Public view of an issuer returned by lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuerSummary {
    pub code: String,
    pub name: String,
    pub website: String,
    pub status: IssuerStatus,
}

impl From<&IssuerRecord> for IssuerSummary {
    fn from(record: &IssuerRecord) -> Self {
        Self {
            code: record.code.clone(),
            name: record.name.clone(),
            website: record.website.clone(),
            status: record.status,
        }
    }
}

/// Successful lookup: the normalized identifier and its issuer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub orc: String,
    pub issuer: IssuerSummary,
}

/// Validates `raw` and resolves its issuer.
pub fn lookup(raw: &str, snapshot: &RegistrySnapshot) -> Result<Lookup, LookupError> {
    let id = validate(raw, snapshot)?;
    // Only reachable when validation and resolution read different snapshots.
    let issuer = snapshot.find(&id.issuer).ok_or(LookupError::IssuerNotFound)?;

    Ok(Lookup { orc: id.to_string(), issuer: issuer.into() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_four_character_issuers() {
        let id: OrcIdentifier = "FR12-2024-000001-A1B".parse().unwrap();
        assert_eq!(id.issuer, "FR12");
        assert_eq!(id.year, 2024);
        assert_eq!(id.to_string(), "FR12-2024-000001-A1B");
    }

    #[test]
    fn parse_rejects_shape_violations() {
        for raw in [
            "",
            "FRC",
            "FR-2024-000001-ABC",
            "FRCXY-2024-000001-ABC",
            "FRC-2024-00001-ABC",
            "FRC-2024-000001-AB",
            "FRC-2024-000001-ABC-",
            "FRC-20a4-000001-ABC",
            "frc-2024-000001-ABC",
            "FRC_2024_000001_ABC",
            "FRC-+024-000001-ABC",
        ] {
            assert_eq!(raw.parse::<OrcIdentifier>(), Err(ValidationFailure::Format), "{raw}");
        }
    }

    #[test]
    fn failure_messages_are_stable() {
        assert_eq!(ValidationFailure::Format.to_string(), "Invalid ORC format");
        assert_eq!(ValidationFailure::Year.to_string(), "Invalid year");
        assert_eq!(ValidationFailure::UnknownIssuer.to_string(), "Unknown issuer code");
        assert_eq!(LookupError::IssuerNotFound.to_string(), "Issuer not found");
        assert_eq!(LookupError::from(ValidationFailure::Year).to_string(), "Invalid year");
    }
}
