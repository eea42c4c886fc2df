//! GS1 element-string parsing and formatting.
//!
//! Wire format:
//!
//! ```text
//! [FNC1 prefix] AI value [GS] AI value [GS] ... AI value
//! ```
//!
//! - The prefix identifies the symbology (`]C1`, `]d2`, `]Q3`, `]e0`).
//! - Fixed-length AIs are followed by exactly their data length and never by
//!   a group separator.
//! - Variable-length AIs run to the next group separator (GS, 0x1D) or to the
//!   end of input. The formatter writes a separator after every
//!   variable-length field except the last one.

use log::{trace, warn};
use rustc_hash::FxHashMap;

use crate::codec::primitives::{Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::model::{GROUP_SEPARATOR, Symbology, UNKNOWN_SYMBOLOGY};
use crate::registry::{self, MAX_AI_LEN, MIN_AI_LEN};

/// One (AI, value) pair read from an element string.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementField {
    pub ai: String,
    pub value: String,
    /// Byte offset of the AI in the original input.
    pub position: usize,
}

/// A parsed element string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementString {
    /// Symbology detected from the FNC1 prefix, if any.
    pub symbology: Option<Symbology>,
    /// Fields in encounter order.
    pub fields: Vec<ElementField>,
}

impl ElementString {
    /// Returns the value of the first field with the given AI.
    pub fn get(&self, ai: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.ai == ai)
            .map(|f| f.value.as_str())
    }

    /// Returns (AI, value) pairs in encounter order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|f| (f.ai.as_str(), f.value.as_str()))
    }

    /// Returns an AI lookup map. For repeated AIs the first value wins.
    pub fn ai_map(&self) -> FxHashMap<&str, &str> {
        let mut map = FxHashMap::with_capacity_and_hasher(self.fields.len(), Default::default());
        for (ai, value) in self.pairs() {
            map.entry(ai).or_insert(value);
        }
        map
    }

    /// Returns the symbology name, or "unknown".
    pub fn type_name(&self) -> &'static str {
        self.symbology.map_or(UNKNOWN_SYMBOLOGY, Symbology::name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Options for parsing element strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParserConfig {
    /// Reject input that does not start with a known FNC1 prefix.
    ///
    /// When disabled, unprefixed input is parsed from its first character and
    /// classified as "unknown".
    pub require_fnc1: bool,
    /// Character terminating variable-length fields.
    pub group_separator: char,
    /// Check key fields (`01`, `00`, `414`, ...) against their key rules.
    pub verify_keys: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            require_fnc1: true,
            group_separator: GROUP_SEPARATOR,
            verify_keys: false,
        }
    }
}

impl ParserConfig {
    /// Creates the default (prefix required) configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that accepts unprefixed input.
    pub fn lenient() -> Self {
        Self {
            require_fnc1: false,
            ..Self::default()
        }
    }
}

/// Options for formatting element strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatterConfig {
    /// Symbology used when neither the call nor the barcode names one.
    pub default_symbology: Symbology,
    /// Character written after non-final variable-length fields.
    pub group_separator: char,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            default_symbology: Symbology::Gs1_128,
            group_separator: GROUP_SEPARATOR,
        }
    }
}

impl FormatterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks the target symbology: explicit override, then the symbology
    /// recorded on the barcode, then the configured default.
    pub fn resolve_symbology(
        &self,
        requested: Option<&str>,
        recorded: Option<Symbology>,
    ) -> Result<Symbology, EncodeError> {
        match requested {
            Some(name) => name.parse(),
            None => Ok(recorded.unwrap_or(self.default_symbology)),
        }
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Parses an element string that must start with an FNC1 prefix.
pub fn parse_element_string(input: &str) -> Result<ElementString, DecodeError> {
    parse_element_string_with_config(input, &ParserConfig::default())
}

/// Parses an element string with the given options.
pub fn parse_element_string_with_config(
    input: &str,
    config: &ParserConfig,
) -> Result<ElementString, DecodeError> {
    let (symbology, start) = match Symbology::detect(input) {
        Some(symbology) => (Some(symbology), symbology.fnc1_prefix().len()),
        None if config.require_fnc1 => {
            return Err(DecodeError::MissingFnc1 {
                found: input.chars().take(3).collect(),
            });
        }
        None => (None, 0),
    };

    let mut reader = Reader::with_separator(input, config.group_separator);
    reader.seek(start);
    if reader.is_empty() {
        return Err(DecodeError::EmptyElementString);
    }

    let mut fields = Vec::new();
    while !reader.is_empty() {
        let position = reader.position();
        let ai = reader.read_ai()?;
        let value = match ai.data_length() {
            Some(len) => {
                let value = reader.read_fixed(&ai.code, len)?;
                // Tolerate a separator some encoders put after fixed fields.
                reader.skip_separator();
                value
            }
            None => reader.read_variable(),
        };
        if value.is_empty() {
            return Err(DecodeError::EmptyField {
                ai: ai.code.clone(),
            });
        }
        trace!("parsed AI {} = {:?} at {}", ai.code, value, position);
        fields.push(ElementField {
            ai: ai.code.clone(),
            value: value.to_string(),
            position,
        });
    }

    let element = ElementString { symbology, fields };
    if config.verify_keys {
        crate::validate::validate_element_string(&element)?;
    }
    Ok(element)
}

// =============================================================================
// ENCODING
// =============================================================================

/// Returns an error unless `ai` is 2 to 4 ASCII digits.
pub(crate) fn check_ai_syntax(ai: &str) -> Result<(), EncodeError> {
    if (MIN_AI_LEN..=MAX_AI_LEN).contains(&ai.len()) && ai.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(EncodeError::InvalidAi { ai: ai.to_string() })
    }
}

/// Returns an error naming the first character of `value` outside the
/// encodable set.
pub(crate) fn check_encodable(ai: &str, value: &str) -> Result<(), EncodeError> {
    match value.chars().find(|ch| !registry::is_encodable(*ch)) {
        Some(ch) => Err(EncodeError::InvalidCharacter {
            ch,
            ai: ai.to_string(),
        }),
        None => Ok(()),
    }
}

/// Formats (AI, value) pairs as an element string for `symbology`.
pub fn format_element_string<'a, I>(fields: I, symbology: Symbology) -> Result<String, EncodeError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    format_element_string_with_config(fields, symbology, &FormatterConfig::default())
}

/// Formats (AI, value) pairs with the given options.
///
/// Over-long values of fixed-length AIs are truncated to the data length;
/// short values are written as they are.
pub fn format_element_string_with_config<'a, I>(
    fields: I,
    symbology: Symbology,
    config: &FormatterConfig,
) -> Result<String, EncodeError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut writer = Writer::with_capacity(64);
    writer.write_str(symbology.fnc1_prefix());

    let mut fields = fields.into_iter().peekable();
    while let Some((ai, value)) = fields.next() {
        check_ai_syntax(ai)?;
        check_encodable(ai, value)?;

        match registry::data_length(ai) {
            Some(len) => {
                let value = match value.char_indices().nth(len) {
                    Some((cut, _)) => {
                        warn!("truncating value of AI {ai} to {len} characters");
                        &value[..cut]
                    }
                    None => value,
                };
                writer.write_field(ai, value);
            }
            None => {
                writer.write_field(ai, value);
                if fields.peek().is_some() {
                    writer.write_separator(config.group_separator);
                }
            }
        }
    }

    Ok(writer.into_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GS: char = GROUP_SEPARATOR;

    fn pairs(element: &ElementString) -> Vec<(&str, &str)> {
        element.pairs().collect()
    }

    #[test]
    fn test_parse_gs1_128() {
        let input = format!("]C1011234567890123110ABC123{GS}21SN42");
        let element = parse_element_string(&input).unwrap();
        assert_eq!(element.symbology, Some(Symbology::Gs1_128));
        assert_eq!(element.type_name(), "gs1_128");
        assert_eq!(
            pairs(&element),
            [("01", "12345678901231"), ("10", "ABC123"), ("21", "SN42")]
        );
        assert_eq!(element.fields[0].position, 3);
        assert_eq!(element.fields[1].position, 19);
    }

    #[test]
    fn test_parse_datamatrix_sample() {
        let element = parse_element_string("]d201034531200000111719112510ABCD1234").unwrap();
        assert_eq!(element.symbology, Some(Symbology::Gs1DataMatrix));
        assert_eq!(
            pairs(&element),
            [("01", "03453120000011"), ("17", "191125"), ("10", "ABCD1234")]
        );
    }

    #[test]
    fn test_fixed_fields_consumed_by_length() {
        // The 14 zeros of AI 01 contain "01"/"00" sequences that must not be
        // read as AIs; the field ends after exactly 14 data characters.
        let element = parse_element_string_with_config(
            "0100000000000000104512345678",
            &ParserConfig::lenient(),
        )
        .unwrap();
        assert_eq!(element.symbology, None);
        assert_eq!(element.type_name(), "unknown");
        assert_eq!(pairs(&element), [("01", "00000000000000"), ("10", "4512345678")]);
    }

    #[test]
    fn test_consecutive_fixed_fields() {
        let input = "]C1011234567890123117250101";
        let element = parse_element_string(input).unwrap();
        assert_eq!(pairs(&element), [("01", "12345678901231"), ("17", "250101")]);
    }

    #[test]
    fn test_measure_field() {
        let element = parse_element_string("]C13103000250").unwrap();
        assert_eq!(pairs(&element), [("3103", "000250")]);
    }

    #[test]
    fn test_missing_prefix_rejected_by_default() {
        let err = parse_element_string("0112345678901231").unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingFnc1 {
                found: "011".to_string()
            }
        );
    }

    #[test]
    fn test_truncated_fixed_field() {
        let err = parse_element_string("]C1011234567890").unwrap_err();
        assert_eq!(
            err,
            DecodeError::TruncatedField {
                ai: "01".to_string(),
                expected: 14,
                available: 10
            }
        );
    }

    #[test]
    fn test_unknown_ai() {
        let err = parse_element_string("]C1011234567890123105X").unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnknownAi {
                position: 19,
                found: "05X".to_string()
            }
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_element_string("]C1"), Err(DecodeError::EmptyElementString));
        assert_eq!(
            parse_element_string_with_config("", &ParserConfig::lenient()),
            Err(DecodeError::EmptyElementString)
        );
    }

    #[test]
    fn test_empty_variable_value() {
        let input = format!("]C110{GS}21X");
        assert_eq!(
            parse_element_string(&input),
            Err(DecodeError::EmptyField { ai: "10".to_string() })
        );
    }

    #[test]
    fn test_separator_after_fixed_tolerated() {
        let input = format!("]C10112345678901231{GS}10LOT");
        let element = parse_element_string(&input).unwrap();
        assert_eq!(pairs(&element), [("01", "12345678901231"), ("10", "LOT")]);
    }

    #[test]
    fn test_verify_keys() {
        let config = ParserConfig {
            verify_keys: true,
            ..ParserConfig::default()
        };
        assert!(parse_element_string_with_config("]C10112345678901231", &config).is_ok());
        let err = parse_element_string_with_config("]C10112345678901232", &config).unwrap_err();
        assert!(matches!(err, DecodeError::Invalid(_)));
    }

    #[test]
    fn test_ai_map_first_wins() {
        let input = format!("]C110A{GS}10B");
        let element = parse_element_string(&input).unwrap();
        assert_eq!(element.len(), 2);
        assert_eq!(element.ai_map().get("10"), Some(&"A"));
        assert_eq!(element.get("10"), Some("A"));
    }

    #[test]
    fn test_format_separators() {
        let fields = [("01", "12345678901231"), ("10", "ABC123"), ("21", "SN42")];
        let out = format_element_string(fields, Symbology::Gs1_128).unwrap();
        assert_eq!(out, format!("]C1011234567890123110ABC123{GS}21SN42"));
    }

    #[test]
    fn test_format_separator_before_fixed_field() {
        // A variable field followed by a fixed one still needs a separator.
        let fields = [("10", "LOT"), ("17", "250101")];
        let out = format_element_string(fields, Symbology::Gs1DataMatrix).unwrap();
        assert_eq!(out, format!("]d210LOT{GS}17250101"));
    }

    #[test]
    fn test_format_truncates_fixed_value() {
        let fields = [("01", "123456789012315555")];
        let out = format_element_string(fields, Symbology::Gs1_128).unwrap();
        assert_eq!(out, "]C10112345678901231");
    }

    #[test]
    fn test_format_does_not_pad() {
        let out = format_element_string([("17", "2501")], Symbology::Gs1_128).unwrap();
        assert_eq!(out, "]C1172501");
    }

    #[test]
    fn test_format_rejects_newline() {
        let err = format_element_string([("10", "AB\nC")], Symbology::Gs1_128).unwrap_err();
        assert_eq!(
            err,
            EncodeError::InvalidCharacter {
                ch: '\n',
                ai: "10".to_string()
            }
        );
    }

    #[test]
    fn test_format_rejects_bad_ai() {
        let err = format_element_string([("1A", "X")], Symbology::Gs1_128).unwrap_err();
        assert_eq!(err, EncodeError::InvalidAi { ai: "1A".to_string() });
    }

    #[test]
    fn test_format_custom_separator() {
        let config = FormatterConfig {
            group_separator: '|',
            ..FormatterConfig::default()
        };
        let out = format_element_string_with_config(
            [("10", "A"), ("21", "B")],
            Symbology::Gs1QrCode,
            &config,
        )
        .unwrap();
        assert_eq!(out, "]Q310A|21B");
    }

    #[test]
    fn test_resolve_symbology_priority() {
        let config = FormatterConfig::default();
        assert_eq!(
            config.resolve_symbology(Some("gs1_qrcode"), Some(Symbology::Ean)),
            Ok(Symbology::Gs1QrCode)
        );
        assert_eq!(config.resolve_symbology(None, Some(Symbology::Ean)), Ok(Symbology::Ean));
        assert_eq!(config.resolve_symbology(None, None), Ok(Symbology::Gs1_128));
        assert!(matches!(
            config.resolve_symbology(Some("aztec"), None),
            Err(EncodeError::UnsupportedSymbology { .. })
        ));
    }

    #[test]
    fn test_roundtrip_is_idempotent() {
        let input = format!("]C1{}{}{GS}{}", "0112345678901231", "10ABC123", "21SN42");
        let parsed = parse_element_string(&input).unwrap();
        let formatted = format_element_string(parsed.pairs(), Symbology::Gs1_128).unwrap();
        assert_eq!(formatted, input);
        let reparsed = parse_element_string(&formatted).unwrap();
        assert_eq!(pairs(&reparsed), pairs(&parsed));
    }
}
