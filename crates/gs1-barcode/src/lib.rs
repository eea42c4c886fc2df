//! GS1 barcode abstraction layer.
//!
//! This crate decodes scanned barcode text into structured barcodes, formats
//! them back into GS1 element strings, prepares symbol payloads for external
//! renderers and generates new barcode values.
//!
//! # Overview
//!
//! The core is the GS1 element-string codec:
//! - **Check digits**: the GS1 mod-10 weighted check digit
//! - **Key detection**: classify a bare string as GTIN, SSCC, GLN, GRAI, GIAI,
//!   GSRN, GDTI, GINC or GSIN
//! - **AI registry**: known application identifiers, fixed-length table,
//!   encodable character set
//! - **Parsing and formatting**: FNC1-prefixed element strings with group
//!   separators, and the bracketed human-readable form
//!
//! # Quick Start
//!
//! ```rust
//! use gs1_barcode::codec::{format_element_string, parse_element_string};
//! use gs1_barcode::model::Symbology;
//!
//! let scanned = "]C1011234567890123110ABC123\u{1d}21SN42";
//! let element = parse_element_string(scanned).unwrap();
//! assert_eq!(element.get("01"), Some("12345678901231"));
//! assert_eq!(element.get("21"), Some("SN42"));
//!
//! let formatted = format_element_string(element.pairs(), Symbology::Gs1_128).unwrap();
//! assert_eq!(formatted, scanned);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Barcodes, attributes, metadata, key types, symbologies
//! - [`registry`]: Application identifier tables
//! - [`validate`]: Check digits and key detection
//! - [`codec`]: Element-string parsing and formatting
//! - [`decode`], [`format`], [`encode`], [`generate`]: Ordered chains of
//!   built-in implementations
//! - [`processor`]: Facade over all chains
//! - [`error`]: Error types
//!
//! # Logging
//!
//! The crate logs through the `log` facade and never installs a logger.
//! Chains log their selection at `debug`, the parser logs each field at
//! `trace`, and the formatter warns when it truncates a fixed-length value.

pub mod codec;
pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
pub mod generate;
pub mod model;
pub mod processor;
pub mod registry;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{ElementString, format_element_string, parse_element_string};
pub use decode::DecoderChain;
pub use encode::{EncodedPayload, EncoderChain};
pub use error::{DecodeError, EncodeError, ErrorCode, GenerateError, ValidationError};
pub use format::FormatterChain;
pub use generate::{GenerateRequest, GeneratorChain};
pub use model::{Barcode, BarcodeAttribute, BarcodeType, Context, IdentifierType, Symbology};
pub use processor::BarcodeProcessor;
pub use validate::{calculate_check_digit, detect, is_valid_check_digit};
