//! Generators producing new barcode values.
//!
//! - [`SerialNumberGenerator`]: prefix + zero-padded sequence number, drawn
//!   from a [`SequenceSource`]
//! - [`Gs1KeyGenerator`]: GS1 keys built from a company prefix and a
//!   reference, with the check digit computed

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use log::debug;
use rustc_hash::FxHashMap;

use crate::codec::element::check_encodable;
use crate::error::GenerateError;
use crate::model::{Barcode, BarcodeAttribute, BarcodeType, IdentifierType, STANDARD_GS1};
use crate::registry;
use crate::validate::{append_check_digit, detect::MAX_FREE_FORM_LEN};

/// Sequence key used when no prefix is given.
pub const DEFAULT_SEQUENCE_KEY: &str = "sequence_number";

// =============================================================================
// SEQUENCES
// =============================================================================

/// Source of per-key sequence numbers.
///
/// Generators read the next number with [`peek_next`](Self::peek_next) and
/// commit it with [`advance`](Self::advance) only once the value has been
/// built. `advance` must fail if the sequence moved in between.
pub trait SequenceSource: Send + Sync + fmt::Debug {
    /// Returns the number the next `advance` would commit.
    fn peek_next(&self, key: &str) -> u64;

    /// Commits `expected` and moves the sequence past it.
    fn advance(&self, key: &str, expected: u64) -> Result<(), GenerateError>;
}

/// Process-local sequences. Every key starts at `start` (0 by default).
#[derive(Debug, Default)]
pub struct InMemorySequence {
    start: u64,
    counters: Mutex<FxHashMap<String, u64>>,
}

impl InMemorySequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(start: u64) -> Self {
        Self {
            start,
            counters: Mutex::default(),
        }
    }
}

impl SequenceSource for InMemorySequence {
    fn peek_next(&self, key: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        counters.get(key).copied().unwrap_or(self.start)
    }

    fn advance(&self, key: &str, expected: u64) -> Result<(), GenerateError> {
        let mut counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        let current = counters.entry(key.to_string()).or_insert(self.start);
        if *current != expected {
            return Err(GenerateError::SequenceConflict {
                key: key.to_string(),
                expected,
                found: *current,
            });
        }
        *current += 1;
        Ok(())
    }
}

// =============================================================================
// SERIAL NUMBERS
// =============================================================================

/// Defaults for serial number generation. Per-request values win.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SerialConfig {
    pub prefix: Option<String>,
    /// Minimum digit count of the number; shorter numbers are zero-padded.
    pub pad_length: usize,
}

/// Generates `prefix + zero-padded sequence number` values.
///
/// Each prefix has its own sequence; without a prefix the sequence key is
/// [`DEFAULT_SEQUENCE_KEY`].
#[derive(Debug, Clone)]
pub struct SerialNumberGenerator {
    source: Arc<dyn SequenceSource>,
    config: SerialConfig,
}

impl Default for SerialNumberGenerator {
    fn default() -> Self {
        Self::new(Arc::new(InMemorySequence::new()), SerialConfig::default())
    }
}

impl SerialNumberGenerator {
    pub fn new(source: Arc<dyn SequenceSource>, config: SerialConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &SerialConfig {
        &self.config
    }

    pub fn generate(
        &self,
        prefix: Option<&str>,
        pad_length: Option<usize>,
    ) -> Result<Barcode, GenerateError> {
        let prefix = prefix.or(self.config.prefix.as_deref()).unwrap_or("");
        let width = pad_length.unwrap_or(self.config.pad_length);
        let key = if prefix.is_empty() {
            DEFAULT_SEQUENCE_KEY
        } else {
            prefix
        };

        let number = self.source.peek_next(key);
        let value = format!("{prefix}{number:0>width$}");
        self.source.advance(key, number)?;
        debug!("generated serial {value} from sequence {key:?}");

        let mut barcode = Barcode::new(value);
        barcode.kind = BarcodeType::Serial;
        barcode.metadata.insert("sequence", key);
        barcode.metadata.insert("sequence_number", number.to_string());
        Ok(barcode)
    }
}

// =============================================================================
// GS1 KEYS
// =============================================================================

/// Body length (company prefix + reference, check digit excluded) of each
/// checksum-bearing key.
fn body_lengths(kind: IdentifierType) -> &'static [usize] {
    match kind {
        IdentifierType::Gtin => &[7, 11, 12, 13],
        IdentifierType::Sscc | IdentifierType::Gsrn => &[17],
        IdentifierType::Gln | IdentifierType::Gdti => &[12],
        IdentifierType::Grai => &[13],
        IdentifierType::Gsin => &[16],
        IdentifierType::Giai | IdentifierType::Ginc => &[],
    }
}

fn body_lengths_text(kind: IdentifierType) -> &'static str {
    match kind {
        IdentifierType::Gtin => "7, 11, 12 or 13",
        IdentifierType::Sscc | IdentifierType::Gsrn => "17",
        IdentifierType::Gln | IdentifierType::Gdti => "12",
        IdentifierType::Grai => "13",
        IdentifierType::Gsin => "16",
        IdentifierType::Giai | IdentifierType::Ginc => "1 to 30",
    }
}

/// Builds GS1 keys from a company prefix and a reference.
///
/// - Checksum-bearing keys: the digits of prefix and reference form the body,
///   the check digit is appended.
/// - GRAI and GDTI may carry an optional serial after the check digit.
/// - GIAI and GINC have no check digit; the reference may be alphanumeric.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gs1KeyGenerator;

impl Gs1KeyGenerator {
    /// Returns only the key text.
    pub fn build_key(
        &self,
        kind: IdentifierType,
        company_prefix: &str,
        reference: &str,
        serial: Option<&str>,
    ) -> Result<String, GenerateError> {
        if company_prefix.is_empty() || !company_prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GenerateError::NonNumeric {
                field: "company prefix",
            });
        }

        let key = if kind.has_check_digit() {
            if !reference.bytes().all(|b| b.is_ascii_digit()) {
                return Err(GenerateError::NonNumeric { field: "reference" });
            }
            let body = format!("{company_prefix}{reference}");
            if !body_lengths(kind).contains(&body.len()) {
                return Err(GenerateError::InvalidKeyLength {
                    kind,
                    len: body.len(),
                    expected: body_lengths_text(kind),
                });
            }
            append_check_digit(&body).ok_or(GenerateError::NonNumeric { field: "reference" })?
        } else {
            format!("{company_prefix}{reference}")
        };

        let key = match serial {
            Some(serial) if matches!(kind, IdentifierType::Grai | IdentifierType::Gdti) => {
                if check_encodable(registry::ai_for(kind), serial).is_err() {
                    return Err(GenerateError::NonEncodable { field: "serial" });
                }
                format!("{key}{serial}")
            }
            Some(_) => return Err(GenerateError::UnexpectedSerial { kind }),
            None => key,
        };

        if !kind.has_check_digit() && check_encodable(registry::ai_for(kind), &key).is_err() {
            return Err(GenerateError::NonEncodable { field: "reference" });
        }
        let len = key.chars().count();
        if len > MAX_FREE_FORM_LEN {
            return Err(GenerateError::KeyTooLong {
                kind,
                len,
                max: MAX_FREE_FORM_LEN,
            });
        }
        Ok(key)
    }

    /// Builds a GS1 barcode carrying the key under its canonical AI.
    pub fn generate(
        &self,
        kind: IdentifierType,
        company_prefix: &str,
        reference: &str,
        serial: Option<&str>,
    ) -> Result<Barcode, GenerateError> {
        let key = self.build_key(kind, company_prefix, reference, serial)?;
        debug!("generated {kind} {key}");

        let ai = kind.ai();
        let mut attribute = BarcodeAttribute::new(ai, key.as_str()).with_kind(kind.name());
        if let Some(label) = registry::label(ai) {
            attribute = attribute.with_label(label);
        }

        let mut barcode = Barcode::new(key);
        barcode.standard = Some(STANDARD_GS1.to_string());
        barcode.kind = BarcodeType::Identifier(kind);
        barcode.push_attribute(attribute);
        barcode.metadata.insert("standard", STANDARD_GS1);
        Ok(barcode)
    }
}

// =============================================================================
// CHAIN
// =============================================================================

/// What to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GenerateRequest {
    /// A serial number; unset fields fall back to the generator's config.
    SerialNumber {
        prefix: Option<String>,
        pad_length: Option<usize>,
    },
    /// A GS1 key with computed check digit.
    Gs1Key {
        kind: IdentifierType,
        company_prefix: String,
        reference: String,
        serial: Option<String>,
    },
}

impl GenerateRequest {
    /// A serial number request using the generator defaults.
    pub fn serial() -> Self {
        GenerateRequest::SerialNumber {
            prefix: None,
            pad_length: None,
        }
    }

    /// Request type name ("sequence_number" or "gs1_key").
    pub fn type_name(&self) -> &'static str {
        match self {
            GenerateRequest::SerialNumber { .. } => DEFAULT_SEQUENCE_KEY,
            GenerateRequest::Gs1Key { .. } => "gs1_key",
        }
    }
}

/// One of the built-in generators.
#[derive(Debug, Clone)]
pub enum Generator {
    Serial(SerialNumberGenerator),
    Gs1Key(Gs1KeyGenerator),
}

impl Generator {
    pub fn name(&self) -> &'static str {
        match self {
            Generator::Serial(_) => "serial_number",
            Generator::Gs1Key(_) => "gs1_key",
        }
    }

    pub fn supports(&self, request: &GenerateRequest) -> bool {
        matches!(
            (self, request),
            (Generator::Serial(_), GenerateRequest::SerialNumber { .. })
                | (Generator::Gs1Key(_), GenerateRequest::Gs1Key { .. })
        )
    }

    pub fn generate(&self, request: &GenerateRequest) -> Result<Barcode, GenerateError> {
        match (self, request) {
            (Generator::Serial(g), GenerateRequest::SerialNumber { prefix, pad_length }) => {
                g.generate(prefix.as_deref(), *pad_length)
            }
            (
                Generator::Gs1Key(g),
                GenerateRequest::Gs1Key {
                    kind,
                    company_prefix,
                    reference,
                    serial,
                },
            ) => g.generate(*kind, company_prefix, reference, serial.as_deref()),
            _ => Err(GenerateError::NoGenerator),
        }
    }
}

/// Ordered generators; the first one that supports the request runs.
#[derive(Debug, Clone)]
pub struct GeneratorChain {
    generators: Vec<Generator>,
}

impl Default for GeneratorChain {
    fn default() -> Self {
        Self::new(vec![
            Generator::Serial(SerialNumberGenerator::default()),
            Generator::Gs1Key(Gs1KeyGenerator),
        ])
    }
}

impl GeneratorChain {
    pub fn new(generators: Vec<Generator>) -> Self {
        Self { generators }
    }

    /// The default chain drawing serial numbers from `source`.
    pub fn with_sequence(source: Arc<dyn SequenceSource>, config: SerialConfig) -> Self {
        Self::new(vec![
            Generator::Serial(SerialNumberGenerator::new(source, config)),
            Generator::Gs1Key(Gs1KeyGenerator),
        ])
    }

    pub fn supports(&self, request: &GenerateRequest) -> bool {
        self.generators.iter().any(|g| g.supports(request))
    }

    pub fn generate(&self, request: &GenerateRequest) -> Result<Barcode, GenerateError> {
        let generator = self
            .generators
            .iter()
            .find(|g| g.supports(request))
            .ok_or(GenerateError::NoGenerator)?;
        debug!("{} request handled by {} generator", request.type_name(), generator.name());
        generator.generate(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::validate::{detect, validate_as};

    #[test]
    fn test_serial_sequence() {
        let generator = SerialNumberGenerator::default();
        let first = generator.generate(Some("SN"), Some(4)).unwrap();
        let second = generator.generate(Some("SN"), Some(4)).unwrap();
        assert_eq!(first.value, "SN0000");
        assert_eq!(second.value, "SN0001");
        assert_eq!(first.kind, BarcodeType::Serial);
        assert_eq!(second.metadata.get_text("sequence"), Some("SN"));
        assert_eq!(second.metadata.get_text("sequence_number"), Some("1"));

        // Separate prefixes have separate sequences.
        assert_eq!(generator.generate(Some("LOT"), None).unwrap().value, "LOT0");
        assert_eq!(generator.generate(None, Some(3)).unwrap().value, "000");
        assert_eq!(generator.generate(None, None).unwrap().value, "1");
    }

    #[test]
    fn test_serial_config_defaults() {
        let config = SerialConfig {
            prefix: Some("PAL".to_string()),
            pad_length: 6,
        };
        let generator =
            SerialNumberGenerator::new(Arc::new(InMemorySequence::starting_at(41)), config);
        assert_eq!(generator.generate(None, None).unwrap().value, "PAL000041");
        assert_eq!(generator.generate(None, Some(2)).unwrap().value, "PAL42");
    }

    #[test]
    fn test_number_wider_than_padding() {
        let generator = SerialNumberGenerator::new(
            Arc::new(InMemorySequence::starting_at(12345)),
            SerialConfig::default(),
        );
        assert_eq!(generator.generate(None, Some(3)).unwrap().value, "12345");
    }

    #[test]
    fn test_stale_advance_conflicts() {
        let sequence = InMemorySequence::new();
        let seen = sequence.peek_next("k");
        sequence.advance("k", seen).unwrap();
        let err = sequence.advance("k", seen).unwrap_err();
        assert_eq!(
            err,
            GenerateError::SequenceConflict {
                key: "k".to_string(),
                expected: 0,
                found: 1
            }
        );
        assert_eq!(err.code(), ErrorCode::SequenceConflict);
    }

    #[test]
    fn test_gtin_key() {
        let barcode = Gs1KeyGenerator.generate(IdentifierType::Gtin, "0360002", "9145", None).unwrap();
        assert_eq!(barcode.value, "036000291452");
        assert_eq!(barcode.kind, BarcodeType::Identifier(IdentifierType::Gtin));
        assert!(barcode.is_gs1());
        let attribute = barcode.attribute("01").unwrap();
        assert_eq!(attribute.value, "036000291452");
        assert_eq!(attribute.kind.as_deref(), Some("GTIN"));
        assert_eq!(detect(&barcode.value), Some(IdentifierType::Gtin));
    }

    #[test]
    fn test_sscc_key() {
        let key = Gs1KeyGenerator
            .build_key(IdentifierType::Sscc, "1061414", "1123456789", None)
            .unwrap();
        assert_eq!(key, "106141411234567897");
        assert!(validate_as(IdentifierType::Sscc, &key));
    }

    #[test]
    fn test_grai_with_serial() {
        let key = Gs1KeyGenerator
            .build_key(IdentifierType::Grai, "0123456", "789012", Some("A-1"))
            .unwrap();
        assert_eq!(key.len(), 17);
        assert!(key.ends_with("A-1"));
        assert!(validate_as(IdentifierType::Grai, &key));
    }

    #[test]
    fn test_free_form_keys() {
        let key = Gs1KeyGenerator
            .build_key(IdentifierType::Giai, "0614141", "ASSET-7", None)
            .unwrap();
        assert_eq!(key, "0614141ASSET-7");
        let err = Gs1KeyGenerator
            .build_key(IdentifierType::Ginc, "0614141", &"X".repeat(24), None)
            .unwrap_err();
        assert_eq!(
            err,
            GenerateError::KeyTooLong {
                kind: IdentifierType::Ginc,
                len: 31,
                max: 30
            }
        );
    }

    #[test]
    fn test_key_errors() {
        assert_eq!(
            Gs1KeyGenerator.build_key(IdentifierType::Gtin, "03A", "1", None),
            Err(GenerateError::NonNumeric {
                field: "company prefix"
            })
        );
        assert!(matches!(
            Gs1KeyGenerator.build_key(IdentifierType::Gln, "0614141", "12", None),
            Err(GenerateError::InvalidKeyLength { len: 9, .. })
        ));
        assert_eq!(
            Gs1KeyGenerator.build_key(IdentifierType::Gtin, "0360002", "9145", Some("1")),
            Err(GenerateError::UnexpectedSerial {
                kind: IdentifierType::Gtin
            })
        );
        assert_eq!(
            Gs1KeyGenerator.build_key(IdentifierType::Gdti, "0614141", "00001", Some("a#b")),
            Err(GenerateError::NonEncodable { field: "serial" })
        );
    }

    #[test]
    fn test_chain_dispatch() {
        let chain = GeneratorChain::default();
        let serial = chain.generate(&GenerateRequest::serial()).unwrap();
        assert_eq!(serial.value, "0");

        let request = GenerateRequest::Gs1Key {
            kind: IdentifierType::Gln,
            company_prefix: "400638".to_string(),
            reference: "133393".to_string(),
            serial: None,
        };
        assert_eq!(request.type_name(), "gs1_key");
        assert_eq!(chain.generate(&request).unwrap().value, "4006381333931");

        let serial_only = GeneratorChain::new(vec![Generator::Serial(SerialNumberGenerator::default())]);
        assert!(!serial_only.supports(&request));
        assert_eq!(serial_only.generate(&request), Err(GenerateError::NoGenerator));
    }
}
