use chrono::Utc;
use orc_domain::records::{IssuerRecord, IssuerStatus};
use orc_registry::validator::{LookupError, lookup, validate};
use orc_registry::{OrcIdentifier, RegistrySnapshot, ValidationFailure};

fn issuer(code: &str, status: IssuerStatus) -> IssuerRecord {
    IssuerRecord {
        code: code.to_owned(),
        name: format!("{code} Records"),
        website: format!("www.{}.example", code.to_lowercase()),
        contact: String::new(),
        address: String::new(),
        status,
        created: Utc::now(),
    }
}

fn snapshot() -> RegistrySnapshot {
    RegistrySnapshot::new(vec![
        issuer("FRC", IssuerStatus::Active),
        issuer("FR12", IssuerStatus::Active),
        issuer("OLD", IssuerStatus::Revoked),
    ])
}

#[test]
fn registered_identifier_round_trips() {
    let id = validate("FRC-2024-000123-A1B", &snapshot()).unwrap();

    assert_eq!(
        id,
        OrcIdentifier {
            issuer: "FRC".into(),
            year: 2024,
            track: "000123".into(),
            suffix: "A1B".into(),
        }
    );
    assert_eq!(id.to_string(), "FRC-2024-000123-A1B");
}

#[test]
fn lowercase_input_is_normalized() {
    let id = validate("fr12-1999-654321-zz9", &snapshot()).unwrap();
    assert_eq!(id.to_string(), "FR12-1999-654321-ZZ9");
}

#[test]
fn checks_run_in_order() {
    let registry = snapshot();

    assert_eq!(validate("FRC-99-1-X", &registry), Err(ValidationFailure::Format));
    assert_eq!(validate("FRC-1900-000001-ABC", &registry), Err(ValidationFailure::Year));
    assert_eq!(validate("ZZZ-1900-000001-ABC", &registry), Err(ValidationFailure::Year));
    assert_eq!(validate("ZZZ-2024-000001-ABC", &registry), Err(ValidationFailure::UnknownIssuer));
}

#[test]
fn year_bounds_are_inclusive() {
    let registry = snapshot();

    assert!(validate("FRC-1970-000001-ABC", &registry).is_ok());
    assert!(validate("FRC-2099-000001-ABC", &registry).is_ok());
    assert_eq!(validate("FRC-1969-000001-ABC", &registry), Err(ValidationFailure::Year));
    assert_eq!(validate("FRC-2100-000001-ABC", &registry), Err(ValidationFailure::Year));
}

#[test]
fn status_does_not_affect_validity() {
    assert!(validate("OLD-2024-000001-ABC", &snapshot()).is_ok());
}

#[test]
fn lookup_returns_issuer_summary() {
    let found = lookup("frc-2024-000001-abc", &snapshot()).unwrap();

    assert_eq!(found.orc, "FRC-2024-000001-ABC");
    assert_eq!(found.issuer.code, "FRC");
    assert_eq!(found.issuer.name, "FRC Records");
    assert_eq!(found.issuer.website, "www.frc.example");
    assert_eq!(found.issuer.status, IssuerStatus::Active);
}

#[test]
fn lookup_reports_validation_failures() {
    assert_eq!(
        lookup("not-an-orc", &snapshot()),
        Err(LookupError::Invalid(ValidationFailure::Format))
    );
    assert_eq!(
        lookup("ABC-2024-000001-ABC", &snapshot()),
        Err(LookupError::Invalid(ValidationFailure::UnknownIssuer))
    );
}
