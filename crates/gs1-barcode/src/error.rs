//! Error types for GS1 decoding, encoding, validation and generation.

use thiserror::Error;

use crate::model::IdentifierType;

/// Error categories shared by every error type in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// E001: Unsupported standard, symbology or output format
    Unsupported,
    /// E002: Value does not match any (or the requested) identifier type
    NoIdentifierMatch,
    /// E003: Fixed-length field is truncated or has the wrong length
    MalformedField,
    /// E004: Value contains a character outside the encodable set
    InvalidCharacter,
    /// E005: Malformed element string or key body
    MalformedInput,
    /// E006: No decoder/encoder/formatter/generator accepted the input
    NoHandler,
    /// E007: Sequence state changed between peek and advance
    SequenceConflict,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::Unsupported => "E001",
            ErrorCode::NoIdentifierMatch => "E002",
            ErrorCode::MalformedField => "E003",
            ErrorCode::InvalidCharacter => "E004",
            ErrorCode::MalformedInput => "E005",
            ErrorCode::NoHandler => "E006",
            ErrorCode::SequenceConflict => "E007",
        }
    }
}

/// Error while decoding scanned data into a barcode.
///
/// Decode errors are soft failures: a decoder chain reacts to them by trying
/// the next decoder.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    // === E001 ===
    #[error("[E001] unsupported standard: {standard}")]
    UnsupportedStandard { standard: String },

    // === E002 ===
    #[error("[E002] {value:?} does not match any GS1 identifier type")]
    NoIdentifierMatch { value: String },

    #[error("[E002] {0}")]
    Invalid(#[from] ValidationError),

    // === E003 ===
    #[error("[E003] AI {ai} needs {expected} characters but only {available} remain")]
    TruncatedField {
        ai: String,
        expected: usize,
        available: usize,
    },

    #[error("[E003] AI {ai} expects {expected} characters, found {actual}")]
    FieldLengthMismatch {
        ai: String,
        expected: usize,
        actual: usize,
    },

    // === E005 ===
    #[error("[E005] missing FNC1 prefix, input starts with {found:?}")]
    MissingFnc1 { found: String },

    #[error("[E005] element string has no fields")]
    EmptyElementString,

    #[error("[E005] unknown application identifier at position {position}: {found:?}")]
    UnknownAi { position: usize, found: String },

    #[error("[E005] AI {ai} has an empty value")]
    EmptyField { ai: String },

    #[error("[E005] malformed bracketed element string at position {position}: {context}")]
    MalformedBrackets {
        position: usize,
        context: &'static str,
    },

    // === E006 ===
    #[error("[E006] no decoder supports the given data")]
    NoDecoder,
}

impl DecodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::UnsupportedStandard { .. } => ErrorCode::Unsupported,
            DecodeError::NoIdentifierMatch { .. } | DecodeError::Invalid(_) => {
                ErrorCode::NoIdentifierMatch
            }
            DecodeError::TruncatedField { .. } | DecodeError::FieldLengthMismatch { .. } => {
                ErrorCode::MalformedField
            }
            DecodeError::NoDecoder => ErrorCode::NoHandler,
            _ => ErrorCode::MalformedInput,
        }
    }
}

/// Error while formatting or encoding a barcode.
///
/// Encode errors are hard failures: they point at invalid caller data or
/// configuration and are never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("[E001] unsupported symbology: {symbol}")]
    UnsupportedSymbology { symbol: String },

    #[error("[E001] unsupported standard: {standard}")]
    UnsupportedStandard { standard: String },

    #[error("[E001] unsupported output format: {format}")]
    UnsupportedFormat { format: String },

    #[error("[E004] invalid character {ch:?} in value of AI {ai}")]
    InvalidCharacter { ch: char, ai: String },

    #[error("[E005] invalid application identifier {ai:?} (expected 2 to 4 digits)")]
    InvalidAi { ai: String },

    #[error("[E006] no formatter supports the barcode")]
    NoFormatter,

    #[error("[E006] no encoder supports symbol {symbol}")]
    NoEncoder { symbol: String },
}

impl EncodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            EncodeError::UnsupportedSymbology { .. }
            | EncodeError::UnsupportedStandard { .. }
            | EncodeError::UnsupportedFormat { .. } => ErrorCode::Unsupported,
            EncodeError::InvalidCharacter { .. } => ErrorCode::InvalidCharacter,
            EncodeError::InvalidAi { .. } => ErrorCode::MalformedInput,
            EncodeError::NoFormatter | EncodeError::NoEncoder { .. } => ErrorCode::NoHandler,
        }
    }
}

/// Error during semantic validation of parsed fields.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("AI {ai} carries an invalid {kind}: {value:?}")]
    InvalidIdentifier {
        ai: String,
        kind: IdentifierType,
        value: String,
    },
}

/// Error while generating a new barcode value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    #[error("[E005] {field} must contain only digits")]
    NonNumeric { field: &'static str },

    #[error("[E004] {field} contains characters outside the encodable set")]
    NonEncodable { field: &'static str },

    #[error("[E005] {kind} keys do not take a serial component")]
    UnexpectedSerial { kind: IdentifierType },

    #[error("[E005] {kind} body has {len} digits, expected {expected}")]
    InvalidKeyLength {
        kind: IdentifierType,
        len: usize,
        expected: &'static str,
    },

    #[error("[E005] {kind} value is {len} characters long (max {max})")]
    KeyTooLong {
        kind: IdentifierType,
        len: usize,
        max: usize,
    },

    #[error("[E006] no generator supports the request")]
    NoGenerator,

    #[error("[E007] sequence {key:?} moved: expected {expected}, found {found}")]
    SequenceConflict {
        key: String,
        expected: u64,
        found: u64,
    },
}

impl GenerateError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            GenerateError::NoGenerator => ErrorCode::NoHandler,
            GenerateError::SequenceConflict { .. } => ErrorCode::SequenceConflict,
            GenerateError::NonEncodable { .. } => ErrorCode::InvalidCharacter,
            _ => ErrorCode::MalformedInput,
        }
    }
}
