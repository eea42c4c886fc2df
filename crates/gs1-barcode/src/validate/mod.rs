//! Check digits, key detection and semantic validation of parsed fields.
//!
//! Structural validation of element strings happens while parsing. This
//! module adds the GS1 key rules: a field carried under a key AI (`01`,
//! `00`, `414`, ...) must hold a value that is valid for that key type.

pub mod check_digit;
pub mod detect;

pub use check_digit::{append_check_digit, calculate_check_digit, is_valid_check_digit};
pub use detect::{detect, validate_as};

use crate::codec::ElementString;
use crate::error::ValidationError;
use crate::registry;

/// Validates the key fields of a parsed element string.
///
/// Fields under AIs that do not carry a GS1 key are not checked.
pub fn validate_element_string(element: &ElementString) -> Result<(), ValidationError> {
    validate_fields(element.pairs())
}

/// Validates (AI, value) pairs against the key rules of their AI.
pub fn validate_fields<'a, I>(fields: I) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    for (ai, value) in fields {
        if let Some(kind) = registry::identifier_for_ai(ai) {
            if !validate_as(kind, value) {
                return Err(ValidationError::InvalidIdentifier {
                    ai: ai.to_string(),
                    kind,
                    value: value.to_string(),
                });
            }
        }
    }
    Ok(())
}
