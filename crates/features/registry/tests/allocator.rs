use fxhash::FxHashSet;
use orc_registry::RegistryError;
use orc_registry::allocator::{Allocator, CODE_ALPHABET};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn numbered(prefix: &str) -> Vec<String> {
    (1..=99).map(|i| format!("{prefix}{i}")).collect()
}

fn all_three_char_codes() -> Vec<String> {
    let alphabet: Vec<char> = CODE_ALPHABET.iter().copied().map(char::from).collect();
    let mut codes = Vec::with_capacity(alphabet.len().pow(3));
    for a in &alphabet {
        for b in &alphabet {
            for c in &alphabet {
                codes.push(format!("{a}{b}{c}"));
            }
        }
    }
    codes
}

#[test]
fn unused_candidate_is_kept() {
    let used = FxHashSet::default();
    assert_eq!(Allocator::default().allocate("BNR", &used, &mut rng()).unwrap(), "BNR");
}

#[test]
fn numeric_suffixes_are_tried_in_order() {
    let allocator = Allocator::default();

    let used: FxHashSet<&str> = ["FRC"].into_iter().collect();
    assert_eq!(allocator.allocate("FRC", &used, &mut rng()).unwrap(), "FR1");

    let used: FxHashSet<&str> = ["FRC", "FR1", "FR2", "FR4"].into_iter().collect();
    assert_eq!(allocator.allocate("FRC", &used, &mut rng()).unwrap(), "FR3");
}

#[test]
fn numeric_suffix_stops_at_two_digits() {
    let numbered = numbered("FR");
    let mut used: FxHashSet<&str> = numbered.iter().map(String::as_str).collect();
    used.insert("FRC");

    let code = Allocator::default().allocate("FRC", &used, &mut rng()).unwrap();

    assert_eq!(code.len(), 3, "random fallback yields three characters, got {code}");
    assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
    assert!(!used.contains(code.as_str()));
}

#[test]
fn seeded_random_fallback_is_reproducible() {
    let numbered = numbered("FR");
    let mut used: FxHashSet<&str> = numbered.iter().map(String::as_str).collect();
    used.insert("FRC");
    let allocator = Allocator::default();

    let first = allocator.allocate("FRC", &used, &mut rng()).unwrap();
    let second = allocator.allocate("FRC", &used, &mut rng()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn sweep_runs_after_random_attempts() {
    let numbered = numbered("FR");
    let mut used: FxHashSet<&str> = numbered.iter().map(String::as_str).collect();
    used.extend(["FRC", "000", "001"]);

    let code = Allocator::new(0).allocate("FRC", &used, &mut rng()).unwrap();

    assert_eq!(code, "002");
}

#[test]
fn saturated_space_reports_capacity() {
    let full = all_three_char_codes();
    let numbered = numbered("FR");
    let used: FxHashSet<&str> = full.iter().chain(&numbered).map(String::as_str).collect();

    let err = Allocator::new(50).allocate("FRC", &used, &mut rng()).unwrap_err();

    assert!(matches!(err, RegistryError::CapacityExhausted { .. }));
}

#[test]
fn single_free_code_is_found_by_the_sweep() {
    let numbered = numbered("FR");
    let full = all_three_char_codes();
    let used: FxHashSet<&str> =
        full.iter().chain(&numbered).map(String::as_str).filter(|c| *c != "Q7Z").collect();

    let code = Allocator::new(10).allocate("FRC", &used, &mut rng()).unwrap();

    assert_eq!(code, "Q7Z");
}

proptest! {
    #[test]
    fn allocated_code_is_never_in_use(
        candidate in "[A-Z]{3}",
        taken in prop::collection::vec("[A-Z0-9]{3,4}", 0..300),
        seed in any::<u64>(),
    ) {
        let mut used: FxHashSet<&str> = taken.iter().map(String::as_str).collect();
        used.insert(candidate.as_str());

        let code = Allocator::default()
            .allocate(&candidate, &used, &mut StdRng::seed_from_u64(seed))
            .unwrap();

        prop_assert!(!used.contains(code.as_str()));
        prop_assert!((3..=4).contains(&code.len()));
    }
}
