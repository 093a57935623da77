//! Phone-number normalization: the strict emitted form, the loose matching key,
//! the last-digits comparison key, and free-text extraction.
//!
//! The strict and loose levels are intentionally separate functions. The strict
//! normalizer decides whether a value *is* a phone number and rewrites it into the
//! single emitted notation; the loose key never rejects anything and exists only so
//! differently-prefixed renditions of the same subscriber collapse to one identity.

use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::Regex;

use crate::constants::phone::{CANONICAL_MARKER, COUNTRY_CODE, SUFFIX_KEY_LEN};
use crate::types::{CanonicalKey, SuffixKey};

static SHAPE_PLUS_INTL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+2519\d{8}$").expect("shape pattern compiles"));
static SHAPE_INTL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^2519\d{8}$").expect("shape pattern compiles"));
static SHAPE_LOCAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^09\d{8}$").expect("shape pattern compiles"));
static SHAPE_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^9\d{8}$").expect("shape pattern compiles"));
static FREE_TEXT_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\+251|251|0)?9\d{8}").expect("scan pattern compiles"));

/// Rewrite a raw value into the canonical emitted form `+2519XXXXXXXX`.
///
/// Whitespace and hyphens are stripped first, then exactly four input shapes are
/// accepted: `+2519XXXXXXXX`, `2519XXXXXXXX`, `09XXXXXXXX`, and `9XXXXXXXX`.
/// Anything else returns `None` and is discarded by callers; free text routinely
/// contains numeric substrings that are not phone numbers, so this is not an error.
pub fn strict_normalize(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '-')
        .collect();

    if SHAPE_PLUS_INTL.is_match(&cleaned) {
        return Some(cleaned);
    }
    if SHAPE_INTL.is_match(&cleaned) {
        return Some(format!("+{cleaned}"));
    }
    if SHAPE_LOCAL.is_match(&cleaned) {
        return Some(format!("{COUNTRY_CODE}{}", &cleaned[1..]));
    }
    if SHAPE_BARE.is_match(&cleaned) {
        return Some(format!("{COUNTRY_CODE}{cleaned}"));
    }
    None
}

/// Reduce a raw value to its digit-suffix identity key.
///
/// All non-digit characters are stripped and the key starts at the first `9`, so
/// `+251911223344`, `251911223344`, `0911223344`, and `911223344` all collapse to
/// `911223344`. A digit string without any `9` is used verbatim, and a value with
/// no digits at all is returned unchanged. Total and idempotent; never fails.
pub fn loose_canonical(raw: &str) -> CanonicalKey {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return raw.to_string();
    }
    match digits.find(CANONICAL_MARKER) {
        Some(index) => digits[index..].to_string(),
        None => digits,
    }
}

/// Last-8-character key used by the three-way comparison; values shorter than
/// eight characters are used whole.
pub fn suffix_key(value: &str) -> SuffixKey {
    let start = value
        .char_indices()
        .rev()
        .nth(SUFFIX_KEY_LEN - 1)
        .map(|(index, _)| index)
        .unwrap_or(0);
    value[start..].to_string()
}

/// Scan arbitrary cell text for phone-number substrings and collect the
/// strict-normalized forms, deduplicated in first-seen order.
pub fn extract_phones<I, S>(cells: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut found: IndexSet<String> = IndexSet::new();
    for cell in cells {
        for candidate in FREE_TEXT_PHONE.find_iter(cell.as_ref()) {
            if let Some(normalized) = strict_normalize(candidate.as_str()) {
                found.insert(normalized);
            }
        }
    }
    found.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_accepts_exactly_four_shapes() {
        for raw in ["+251911223344", "251911223344", "0911223344", "911223344"] {
            assert_eq!(strict_normalize(raw).as_deref(), Some("+251911223344"), "{raw}");
        }
        assert_eq!(strict_normalize("112233"), None);
        assert_eq!(strict_normalize("0811223344"), None);
        assert_eq!(strict_normalize("25191122334"), None);
        assert_eq!(strict_normalize("+2519112233445"), None);
        assert_eq!(strict_normalize("hello"), None);
    }

    #[test]
    fn strict_strips_spaces_and_hyphens() {
        assert_eq!(
            strict_normalize(" 09 11 22-33-44 ").as_deref(),
            Some("+251911223344")
        );
        assert_eq!(
            strict_normalize("+251-91-122-3344").as_deref(),
            Some("+251911223344")
        );
    }

    #[test]
    fn strict_is_idempotent() {
        let once = strict_normalize("0911223344").expect("valid shape");
        assert_eq!(strict_normalize(&once).as_deref(), Some(once.as_str()));
    }

    #[test]
    fn loose_collapses_prefix_variants() {
        for raw in ["+251911223344", "251911223344", "0911223344", "911223344"] {
            assert_eq!(loose_canonical(raw), "911223344", "{raw}");
        }
    }

    #[test]
    fn loose_is_idempotent() {
        for raw in ["+251 91-122-3344", "0812345670", "ticket 77", "no digits here", ""] {
            let once = loose_canonical(raw);
            assert_eq!(loose_canonical(&once), once, "{raw}");
        }
    }

    #[test]
    fn loose_without_nine_keeps_all_digits() {
        assert_eq!(loose_canonical("0812345670"), "0812345670");
        assert_eq!(loose_canonical("TCK-0044"), "0044");
    }

    #[test]
    fn loose_without_digits_returns_input() {
        assert_eq!(loose_canonical("n/a"), "n/a");
    }

    #[test]
    fn suffix_takes_last_eight() {
        assert_eq!(suffix_key("+251911223344"), "11223344");
        assert_eq!(suffix_key("0911223344"), "11223344");
        assert_eq!(suffix_key("1234"), "1234");
    }

    #[test]
    fn extract_finds_embedded_numbers() {
        let cells = [
            "winner 0911223344 confirmed",
            "dial +251922334455 or 922334455",
            "order 123456 is not a phone",
        ];
        assert_eq!(
            extract_phones(cells),
            vec!["+251911223344".to_string(), "+251922334455".to_string()]
        );
    }

    #[test]
    fn extract_dedups_in_first_seen_order() {
        let cells = ["0911223344", "+251911223344", "0922334455"];
        assert_eq!(
            extract_phones(cells),
            vec!["+251911223344".to_string(), "+251922334455".to_string()]
        );
    }
}
