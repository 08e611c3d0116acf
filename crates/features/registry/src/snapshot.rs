use fxhash::FxHashSet;
use orc_domain::records::IssuerRecord;

/// Point-in-time view of the registry, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrySnapshot {
    records: Vec<IssuerRecord>,
}

impl RegistrySnapshot {
    #[must_use]
    pub const fn new(records: Vec<IssuerRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn into_records(self) -> Vec<IssuerRecord> {
        self.records
    }

    #[must_use]
    pub fn used_codes(&self) -> FxHashSet<&str> {
        self.records.iter().map(|record| record.code.as_str()).collect()
    }

    #[must_use]
    pub fn find(&self, code: &str) -> Option<&IssuerRecord> {
        self.records.iter().find(|record| record.code == code)
    }

    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.find(code).is_some()
    }
}
