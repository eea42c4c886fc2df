//! Structural detection of bare GS1 keys.
//!
//! A candidate is tested against the checksum-bearing key types first, in the
//! fixed order SSCC, GTIN, GLN, GRAI, GSRN, GDTI, GSIN. The first type whose
//! length and check digit both match wins. If the candidate has the shape of
//! a checksum-bearing key (right length, numeric where the check digit is
//! computed) but no check digit matched, detection fails: a check-digit
//! mismatch is never reinterpreted as a free-form key. Only candidates that
//! have no checksum-bearing shape at all fall through to the permissive
//! types GIAI and GINC (1 to 30 characters, no check digit).

use crate::model::IdentifierType;
use crate::validate::check_digit::is_valid_check_digit;

/// Checksum-bearing types in detection priority order.
pub const CHECKSUM_PRIORITY: [IdentifierType; 7] = [
    IdentifierType::Sscc,
    IdentifierType::Gtin,
    IdentifierType::Gln,
    IdentifierType::Grai,
    IdentifierType::Gsrn,
    IdentifierType::Gdti,
    IdentifierType::Gsin,
];

/// Types without a check digit, tried last.
pub const PERMISSIVE_PRIORITY: [IdentifierType; 2] = [IdentifierType::Giai, IdentifierType::Ginc];

/// Maximum length of GIAI and GINC values.
pub const MAX_FREE_FORM_LEN: usize = 30;

const GTIN_LENGTHS: [usize; 4] = [8, 12, 13, 14];

/// Returns the part of `value` covered by the check digit for `kind`, if the
/// length rule for `kind` is satisfied.
fn checked_part(kind: IdentifierType, value: &str) -> Option<&str> {
    let len = value.len();
    match kind {
        IdentifierType::Sscc | IdentifierType::Gsrn => (len == 18).then_some(value),
        IdentifierType::Gtin => GTIN_LENGTHS.contains(&len).then_some(value),
        IdentifierType::Gln => (len == 13).then_some(value),
        IdentifierType::Gsin => (len == 17).then_some(value),
        IdentifierType::Grai => value.get(..14),
        IdentifierType::Gdti if len >= 14 => value.get(..13),
        IdentifierType::Gdti | IdentifierType::Giai | IdentifierType::Ginc => None,
    }
}

/// Returns true if `value` has the shape of a checksum-bearing `kind`:
/// the length rule holds and the checked part is all digits.
fn has_shape(kind: IdentifierType, value: &str) -> bool {
    checked_part(kind, value).is_some_and(|part| part.bytes().all(|b| b.is_ascii_digit()))
}

/// Checks `value` against the rules of one specific key type.
///
/// `value` is used as given; callers trim it first if needed.
pub fn validate_as(kind: IdentifierType, value: &str) -> bool {
    if kind.has_check_digit() {
        return checked_part(kind, value).is_some_and(is_valid_check_digit);
    }
    (1..=MAX_FREE_FORM_LEN).contains(&value.chars().count())
}

/// Detects which GS1 key type a bare candidate string is.
///
/// Surrounding whitespace is ignored. Returns `None` when no rule matches.
pub fn detect(candidate: &str) -> Option<IdentifierType> {
    let value = candidate.trim();

    let mut shaped = false;
    for kind in CHECKSUM_PRIORITY {
        if validate_as(kind, value) {
            return Some(kind);
        }
        shaped |= has_shape(kind, value);
    }
    if shaped {
        return None;
    }

    PERMISSIVE_PRIORITY
        .into_iter()
        .find(|kind| validate_as(*kind, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upc_a_is_gtin() {
        assert_eq!(detect("036000291452"), Some(IdentifierType::Gtin));
    }

    #[test]
    fn test_gtin_lengths() {
        assert_eq!(detect("96385074"), Some(IdentifierType::Gtin));
        assert_eq!(detect("4006381333931"), Some(IdentifierType::Gtin));
        assert_eq!(detect("12345678901231"), Some(IdentifierType::Gtin));
    }

    #[test]
    fn test_sscc_valid_and_invalid() {
        assert_eq!(detect("123456789012345675"), Some(IdentifierType::Sscc));
        assert_eq!(detect("123456789012345678"), None);
    }

    #[test]
    fn test_sscc_wins_over_gsrn() {
        // Same structural rule; SSCC comes first.
        assert_eq!(detect("106141411234567897"), Some(IdentifierType::Sscc));
        assert!(validate_as(IdentifierType::Gsrn, "106141411234567897"));
    }

    #[test]
    fn test_gtin_wins_over_gln() {
        assert!(validate_as(IdentifierType::Gln, "4006381333931"));
        assert_eq!(detect("4006381333931"), Some(IdentifierType::Gtin));
    }

    #[test]
    fn test_grai_with_serial() {
        // 14-digit prefix with a valid check digit, then an alphanumeric serial.
        assert_eq!(detect("12345678901231ABC"), Some(IdentifierType::Grai));
    }

    #[test]
    fn test_gdti_with_serial() {
        // First 13 digits check out, first 14 do not.
        let value = "4006381333931X42";
        assert!(!validate_as(IdentifierType::Grai, value));
        assert_eq!(detect(value), Some(IdentifierType::Gdti));
    }

    #[test]
    fn test_gsin() {
        // 17 digits with a valid check digit
        assert_eq!(detect("12345678901234560"), Some(IdentifierType::Gsin));
    }

    #[test]
    fn test_free_form_fallback() {
        assert_eq!(detect("ABC-123"), Some(IdentifierType::Giai));
        assert_eq!(detect("12345"), Some(IdentifierType::Giai));
        assert_eq!(detect(&"A".repeat(30)), Some(IdentifierType::Giai));
        assert_eq!(detect(&"A".repeat(31)), None);
        assert_eq!(detect("   "), None);
        assert_eq!(detect(""), None);
        // Free-form keys are bounded by length only.
        assert_eq!(detect("ASSET_7"), Some(IdentifierType::Giai));
        assert_eq!(detect("A#1"), Some(IdentifierType::Giai));
    }

    #[test]
    fn test_check_digit_mismatch_is_a_miss() {
        // 13 digits with a wrong check digit must not become a GIAI.
        assert_eq!(detect("4006381333932"), None);
        // 8 digits, wrong check digit
        assert_eq!(detect("96385075"), None);
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(detect("  036000291452\n"), Some(IdentifierType::Gtin));
    }

    #[test]
    fn test_validate_as_free_form() {
        assert!(validate_as(IdentifierType::Ginc, "CONSIGNMENT-1"));
        assert!(!validate_as(IdentifierType::Ginc, ""));
    }
}
