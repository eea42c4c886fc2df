//! Bracketed human-readable element strings: `(01)12345678901231(10)ABC123`.
//!
//! Values may contain parentheses, so a value only ends where the next
//! `(AI)` group with a registered AI begins. Whitespace around groups and
//! values is ignored.

use crate::codec::element::{ElementField, ElementString, check_ai_syntax};
use crate::error::{DecodeError, EncodeError};
use crate::registry::{self, MAX_AI_LEN, MIN_AI_LEN};

/// Returns true if `data` starts with an `(AI)` group, ignoring leading
/// whitespace.
pub fn is_bracketed(data: &str) -> bool {
    ai_group_len(data.trim_start()).is_some()
}

/// Returns the byte length of an `(AI)` group at the start of `s` if the AI
/// is registered.
fn ai_group_len(s: &str) -> Option<usize> {
    let inner = s.strip_prefix('(')?;
    let close = inner.find(')')?;
    let ai = &inner[..close];
    let well_formed =
        (MIN_AI_LEN..=MAX_AI_LEN).contains(&ai.len()) && ai.bytes().all(|b| b.is_ascii_digit());
    (well_formed && registry::is_known(ai)).then_some(close + 2)
}

/// Finds the start of the next `(AI)` group in `s`.
fn next_group(s: &str) -> Option<usize> {
    s.match_indices('(')
        .map(|(i, _)| i)
        .find(|i| ai_group_len(&s[*i..]).is_some())
}

/// Parses a bracketed element string.
///
/// Fixed-length AIs must carry exactly their data length. The result has no
/// symbology since the bracketed form is never scanned from a symbol.
pub fn parse_bracketed(input: &str) -> Result<ElementString, DecodeError> {
    let mut pos = input.len() - input.trim_start().len();
    if input[pos..].trim_end().is_empty() {
        return Err(DecodeError::EmptyElementString);
    }

    let mut fields = Vec::new();
    while pos < input.len() {
        let rest = &input[pos..];
        let skipped = rest.len() - rest.trim_start().len();
        pos += skipped;
        let rest = &input[pos..];
        if rest.is_empty() {
            break;
        }

        let Some(inner) = rest.strip_prefix('(') else {
            return Err(DecodeError::MalformedBrackets {
                position: pos,
                context: "expected '('",
            });
        };
        let Some(close) = inner.find(')') else {
            return Err(DecodeError::MalformedBrackets {
                position: pos,
                context: "unclosed '('",
            });
        };
        let code = &inner[..close];
        let Some(ai) = registry::lookup(code) else {
            return Err(DecodeError::UnknownAi {
                position: pos + 1,
                found: code.to_string(),
            });
        };

        let value_start = pos + close + 2;
        let tail = &input[value_start..];
        let value_end = value_start + next_group(tail).unwrap_or(tail.len());
        let value = input[value_start..value_end].trim();

        if value.is_empty() {
            return Err(DecodeError::EmptyField {
                ai: ai.code.clone(),
            });
        }
        if let Some(expected) = ai.data_length() {
            let actual = value.chars().count();
            if actual != expected {
                return Err(DecodeError::FieldLengthMismatch {
                    ai: ai.code.clone(),
                    expected,
                    actual,
                });
            }
        }

        fields.push(ElementField {
            ai: ai.code.clone(),
            value: value.to_string(),
            position: pos,
        });
        pos = value_end;
    }

    Ok(ElementString {
        symbology: None,
        fields,
    })
}

/// Formats (AI, value) pairs as `(01) 12345678901231 (10) ABC123`.
pub fn format_bracketed<'a, I>(fields: I) -> Result<String, EncodeError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut out = String::new();
    for (ai, value) in fields {
        check_ai_syntax(ai)?;
        if !out.is_empty() {
            out.push(' ');
        }
        out.push('(');
        out.push_str(ai);
        out.push_str(") ");
        out.push_str(value);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compact() {
        let element = parse_bracketed("(01)12345678901231(10)ABC123(21)SN42").unwrap();
        let pairs: Vec<_> = element.pairs().collect();
        assert_eq!(
            pairs,
            [("01", "12345678901231"), ("10", "ABC123"), ("21", "SN42")]
        );
        assert_eq!(element.symbology, None);
        assert_eq!(element.fields[1].position, 18);
    }

    #[test]
    fn test_parse_spaced() {
        let element = parse_bracketed("  (01) 12345678901231 (17) 250101\n").unwrap();
        assert_eq!(element.get("01"), Some("12345678901231"));
        assert_eq!(element.get("17"), Some("250101"));
    }

    #[test]
    fn test_parenthesis_inside_value() {
        // "(X)" is not an AI group, so it stays part of the lot number.
        let element = parse_bracketed("(10)LOT(X)1(21)S").unwrap();
        assert_eq!(element.get("10"), Some("LOT(X)1"));
        assert_eq!(element.get("21"), Some("S"));
    }

    #[test]
    fn test_fixed_length_enforced() {
        let err = parse_bracketed("(01)1234567890123").unwrap_err();
        assert_eq!(
            err,
            DecodeError::FieldLengthMismatch {
                ai: "01".to_string(),
                expected: 14,
                actual: 13
            }
        );
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(
            parse_bracketed("01)123"),
            Err(DecodeError::MalformedBrackets { position: 0, .. })
        ));
        assert!(matches!(
            parse_bracketed("(01"),
            Err(DecodeError::MalformedBrackets { .. })
        ));
        assert_eq!(
            parse_bracketed("(05)X"),
            Err(DecodeError::UnknownAi {
                position: 1,
                found: "05".to_string()
            })
        );
        assert_eq!(
            parse_bracketed("(10)(21)X"),
            Err(DecodeError::EmptyField { ai: "10".to_string() })
        );
        assert_eq!(parse_bracketed("   "), Err(DecodeError::EmptyElementString));
    }

    #[test]
    fn test_is_bracketed() {
        assert!(is_bracketed("(01)12345678901231"));
        assert!(is_bracketed(" (3103)000250"));
        assert!(!is_bracketed("(ab)123"));
        assert!(!is_bracketed("0112345678901231"));
    }

    #[test]
    fn test_format_then_parse() {
        let fields = [("01", "12345678901231"), ("10", "ABC123")];
        let text = format_bracketed(fields).unwrap();
        assert_eq!(text, "(01) 12345678901231 (10) ABC123");
        let element = parse_bracketed(&text).unwrap();
        assert_eq!(element.pairs().collect::<Vec<_>>(), fields);
    }
}
