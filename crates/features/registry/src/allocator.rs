//! Turns a candidate issuer code into one that is not yet registered.

use crate::error::RegistryError;
use fxhash::FxHashSet;
use rand::Rng;

/// Characters of randomly drawn codes.
pub const CODE_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
/// Highest numeric suffix; keeps `XY99` within the 4-character issuer format.
pub const MAX_NUMERIC_SUFFIX: u8 = 99;
pub const DEFAULT_RANDOM_ATTEMPTS: u32 = 10_000;

/// Sweep order: byte-wise lexical, digits before letters.
const SWEEP_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Collision resolution against the set of codes already in the registry.
///
/// Tries, in order, the candidate itself, the candidate's first two characters
/// followed by `1..=99`, a bounded number of random 3-character codes and
/// finally every 3-character code in lexical order. The result is never a
/// member of `used`; when nothing is left the allocation fails with
/// [`RegistryError::CapacityExhausted`].
#[derive(Debug, Clone, Copy)]
pub struct Allocator {
    max_random_attempts: u32,
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new(DEFAULT_RANDOM_ATTEMPTS)
    }
}

impl Allocator {
    #[must_use]
    pub const fn new(max_random_attempts: u32) -> Self {
        Self { max_random_attempts }
    }

    #[must_use]
    pub const fn max_random_attempts(&self) -> u32 {
        self.max_random_attempts
    }

    /// Picks the final code for `candidate`.
    ///
    /// ```rust
    /// use fxhash::FxHashSet;
    /// use orc_registry::allocator::Allocator;
    ///
    /// let used: FxHashSet<&str> = ["FRC", "FR1"].into_iter().collect();
    /// let code = Allocator::default().allocate("FRC", &used, &mut rand::rng()).unwrap();
    /// assert_eq!(code, "FR2");
    /// ```
    pub fn allocate<R: Rng>(
        &self,
        candidate: &str,
        used: &FxHashSet<&str>,
        rng: &mut R,
    ) -> Result<String, RegistryError> {
        if !used.contains(candidate) {
            return Ok(candidate.to_owned());
        }

        let prefix: String = candidate.chars().take(2).collect();
        if let Some(code) =
            (1..=MAX_NUMERIC_SUFFIX).map(|i| format!("{prefix}{i}")).find(|c| !used.contains(c.as_str()))
        {
            return Ok(code);
        }

        if let Some(code) = (0..self.max_random_attempts)
            .map(|_| random_code(rng))
            .find(|c| !used.contains(c.as_str()))
        {
            return Ok(code);
        }

        tracing::warn!(candidate, attempts = self.max_random_attempts, "Random allocation gave up, sweeping");

        sweep().find(|c| !used.contains(c.as_str())).ok_or_else(|| RegistryError::CapacityExhausted {
            message: format!("No free issuer code for candidate '{candidate}'").into(),
            context: None,
        })
    }
}

fn random_code<R: Rng>(rng: &mut R) -> String {
    (0..3).map(|_| char::from(CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())])).collect()
}

fn sweep() -> impl Iterator<Item = String> {
    SWEEP_ALPHABET.iter().flat_map(|&a| {
        SWEEP_ALPHABET.iter().flat_map(move |&b| {
            SWEEP_ALPHABET.iter().map(move |&c| [a, b, c].map(char::from).iter().collect::<String>())
        })
    })
}
