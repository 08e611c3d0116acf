//! Password hashes stored on account records.
//!
//! Hashes are bcrypt strings (`$2b$10$...`) carrying their own salt and cost.

/// bcrypt work factor of newly created hashes.
pub const PASSWORD_COST: u32 = 10;

/// Hashes `password` with a fresh random salt.
///
/// CPU-bound; run it off the async executor.
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, PASSWORD_COST)
}

/// Checks `password` against a hash produced by [`hash_password`].
/// Malformed hashes never verify.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_verify_and_differ_by_salt() {
        let first = hash_password("hunter2").unwrap();
        let second = hash_password("hunter2").unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("$2b$10$"));
        assert!(verify_password("hunter2", &first));
        assert!(verify_password("hunter2", &second));
        assert!(!verify_password("hunter3", &first));
    }

    #[test]
    fn plaintext_never_appears_in_the_hash() {
        let hash = hash_password("correct horse").unwrap();
        assert!(!hash.contains("correct horse"));
        assert_eq!(hash.len(), 60);
    }

    #[test]
    fn malformed_hashes_are_rejected() {
        assert!(!verify_password("x", ""));
        assert!(!verify_password("x", "sha256$00$00"));
        assert!(!verify_password("x", "$2b$10$tooshort"));
    }
}
