use std::borrow::Cow;

/// A specialized [`RegistryError`] enum of this crate.
#[orc_derive::orc_error]
pub enum RegistryError {
    /// `email`, `password` or `companyName` is absent or blank.
    #[error("Missing required fields{}: {message}", format_context(.context))]
    MissingFields { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// An account with this email is already registered.
    #[error("User already exists{}: {message}", format_context(.context))]
    UserExists { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Every reachable issuer code is taken.
    #[error("Issuer code space exhausted{}: {message}", format_context(.context))]
    CapacityExhausted { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Registry storage error{}: {source}", format_context(.context))]
    Storage { source: orc_storage::StorageError, context: Option<Cow<'static, str>> },

    #[error("Password hashing error{}: {source}", format_context(.context))]
    Hashing { source: bcrypt::BcryptError, context: Option<Cow<'static, str>> },

    #[error("Internal registry error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
