use orc_registry::derive_issuer_code;
use proptest::prelude::*;

#[test]
fn single_words_use_consonants() {
    assert_eq!(derive_issuer_code("Freecords"), "FRC");
    assert_eq!(derive_issuer_code("Acme"), "ACM");
    assert_eq!(derive_issuer_code("Ab"), "ABX");
}

#[test]
fn multiple_words_use_initials() {
    assert_eq!(derive_issuer_code("Blue Note Records"), "BNR");
    assert_eq!(derive_issuer_code("Blue Note"), "BNL");
    assert_eq!(derive_issuer_code("A B C D"), "ABC");
}

#[test]
fn entity_suffixes_are_ignored() {
    assert_eq!(derive_issuer_code("Freecords B.V."), "FRC");
    assert_eq!(derive_issuer_code("Freecords BV"), "FRC");
    assert_eq!(derive_issuer_code("Blue Note Records LLC"), "BNR");
    assert_eq!(derive_issuer_code("Sub Pop Ltd."), "SPU");
    assert_eq!(derive_issuer_code("Coral inc"), "CRL");
}

#[test]
fn degenerate_names_are_padded() {
    assert_eq!(derive_issuer_code(""), "XXX");
    assert_eq!(derive_issuer_code("   "), "XXX");
    assert_eq!(derive_issuer_code("B.V."), "XXX");
    assert_eq!(derive_issuer_code("4AD"), "ADX");
    assert_eq!(derive_issuer_code("Ö"), "XXX");
}

proptest! {
    #[test]
    fn output_is_three_uppercase_letters(name in ".{0,40}") {
        let code = derive_issuer_code(&name);
        prop_assert_eq!(code.len(), 3);
        prop_assert!(code.bytes().all(|b| b.is_ascii_uppercase()));
    }

    #[test]
    fn derivation_is_deterministic(name in "[A-Za-z .]{0,30}") {
        prop_assert_eq!(derive_issuer_code(&name), derive_issuer_code(&name));
    }
}
