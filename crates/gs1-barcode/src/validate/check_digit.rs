//! GS1 mod-10 weighted check digit.
//!
//! Digits are weighted from the right: the rightmost digit of the body has
//! weight 3, the next weight 1, alternating. The check digit brings the
//! weighted sum up to the next multiple of ten.

/// Computes the check digit for a body of ASCII digits.
///
/// Returns `None` if `digits` contains anything other than `0-9`. An empty
/// body yields `Some(0)`.
pub fn calculate_check_digit(digits: &str) -> Option<u8> {
    let mut sum: u32 = 0;
    for (i, byte) in digits.bytes().rev().enumerate() {
        if !byte.is_ascii_digit() {
            return None;
        }
        let digit = (byte - b'0') as u32;
        sum += if i % 2 == 0 { digit * 3 } else { digit };
    }
    Some(((10 - sum % 10) % 10) as u8)
}

/// Returns true if the last character of `code` is the correct check digit
/// for the characters before it.
///
/// Empty or non-numeric input is simply invalid.
pub fn is_valid_check_digit(code: &str) -> bool {
    let Some((&last, body)) = code.as_bytes().split_last() else {
        return false;
    };
    if !last.is_ascii_digit() {
        return false;
    }
    // `last` is ASCII, so `body` ends on a char boundary.
    let body = &code[..body.len()];
    calculate_check_digit(body) == Some(last - b'0')
}

/// Appends the computed check digit to a body of digits.
pub fn append_check_digit(digits: &str) -> Option<String> {
    let check = calculate_check_digit(digits)?;
    let mut code = String::with_capacity(digits.len() + 1);
    code.push_str(digits);
    code.push(char::from(b'0' + check));
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_check_digits() {
        // UPC-A 036000291452
        assert_eq!(calculate_check_digit("03600029145"), Some(2));
        // GTIN-14 12345678901231
        assert_eq!(calculate_check_digit("1234567890123"), Some(1));
        // EAN-13 4006381333931
        assert_eq!(calculate_check_digit("400638133393"), Some(1));
        // SSCC 106141411234567897
        assert_eq!(calculate_check_digit("10614141123456789"), Some(7));
        assert_eq!(calculate_check_digit(""), Some(0));
    }

    #[test]
    fn test_rightmost_weight_is_three() {
        assert_eq!(calculate_check_digit("1"), Some(7));
        assert_eq!(calculate_check_digit("10"), Some(9));
    }

    #[test]
    fn test_is_valid() {
        assert!(is_valid_check_digit("036000291452"));
        assert!(is_valid_check_digit("12345678901231"));
        assert!(is_valid_check_digit("123456789012345675"));
        assert!(!is_valid_check_digit("123456789012345678"));
        assert!(!is_valid_check_digit("036000291453"));
    }

    #[test]
    fn test_malformed_input_is_invalid() {
        assert!(!is_valid_check_digit(""));
        assert!(!is_valid_check_digit("03600029145X"));
        assert!(!is_valid_check_digit("0360A0291452"));
        assert!(!is_valid_check_digit("03600029145é"));
        assert!(calculate_check_digit("12a").is_none());
    }

    #[test]
    fn test_append() {
        assert_eq!(append_check_digit("03600029145").as_deref(), Some("036000291452"));
        assert!(append_check_digit("12-3").is_none());
    }
}
