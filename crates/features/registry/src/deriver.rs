//! Company name to 3-letter candidate issuer code.

/// Legal-entity suffixes removed before derivation, longest alternatives first.
const ENTITY_SUFFIXES: &[&str] = &[
    "Limited", "Company", "Corp.", "B.V.", "Inc.", "Ltd.", "Corp", "LLC", "Inc", "Ltd", "Co.", "BV",
    "Co",
];

const CODE_LEN: usize = 3;
const PADDING: char = 'X';

/// Derives the 3-character candidate code for `company_name`.
///
/// Entity suffixes such as `B.V.` or `Inc.` are dropped, as is everything that
/// is not an ASCII letter. A single remaining word contributes its first three
/// consonants (or its first three letters when it has fewer consonants);
/// several words contribute their initials, topped up from the first word.
/// Short results are padded with `X`, so the output is always three
/// uppercase letters and the function never fails.
///
/// ```rust
/// use orc_registry::derive_issuer_code;
///
/// assert_eq!(derive_issuer_code("Freecords B.V."), "FRC");
/// assert_eq!(derive_issuer_code("Blue Note Records"), "BNR");
/// assert_eq!(derive_issuer_code(""), "XXX");
/// ```
#[must_use]
pub fn derive_issuer_code(company_name: &str) -> String {
    let stripped = strip_entity_suffixes(company_name);
    let letters: String =
        stripped.chars().filter(|c| c.is_ascii_alphabetic() || c.is_whitespace()).collect();
    let words: Vec<String> = letters.split_whitespace().map(str::to_ascii_uppercase).collect();

    let code = match words.as_slice() {
        [] => String::new(),
        [word] => single_word(word),
        [first, ..] => initials(first, &words),
    };

    code.chars().chain(std::iter::repeat(PADDING)).take(CODE_LEN).collect()
}

fn single_word(word: &str) -> String {
    let consonants: String = word.chars().filter(|c| !is_vowel(*c)).collect();
    let source = if consonants.len() >= CODE_LEN { &consonants } else { word };
    source.chars().take(CODE_LEN).collect()
}

fn initials(first: &str, words: &[String]) -> String {
    let mut code: String = words.iter().filter_map(|w| w.chars().next()).take(CODE_LEN).collect();

    for letter in first.chars().skip(1) {
        if code.len() >= CODE_LEN {
            break;
        }
        if !code.contains(letter) {
            code.push(letter);
        }
    }

    code
}

const fn is_vowel(c: char) -> bool {
    matches!(c, 'A' | 'E' | 'I' | 'O' | 'U')
}

const fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Removes every suffix token that starts after a non-word character (or at the
/// start) and is followed by a non-word character (or the end). Case-insensitive.
fn strip_entity_suffixes(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev: Option<char> = None;
    let mut rest = name;

    while let Some(c) = rest.chars().next() {
        let at_boundary = prev.is_none_or(|p| !is_word_char(p));
        let token = at_boundary.then(|| matching_suffix(rest)).flatten();

        if let Some(len) = token {
            prev = rest[..len].chars().next_back();
            rest = &rest[len..];
        } else {
            out.push(c);
            prev = Some(c);
            rest = &rest[c.len_utf8()..];
        }
    }

    out
}

fn matching_suffix(rest: &str) -> Option<usize> {
    ENTITY_SUFFIXES
        .iter()
        .filter(|suffix| rest.get(..suffix.len()).is_some_and(|head| head.eq_ignore_ascii_case(suffix)))
        .map(|suffix| suffix.len())
        .find(|&len| rest[len..].chars().next().is_none_or(|next| !is_word_char(next)))
}
