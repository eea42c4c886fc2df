//! Data model types.
//!
//! This module contains the core types for representing barcodes:
//! - Barcodes and their attributes
//! - Insertion-ordered metadata
//! - GS1 identification key types
//! - Symbologies and their FNC1 prefixes
//! - Per-call context hints
//! - Builders (ergonomic construction)

pub mod barcode;
pub mod builder;
pub mod context;
pub mod identifier;
pub mod metadata;
pub mod symbology;

pub use barcode::{Barcode, BarcodeAttribute, BarcodeType, STANDARD_GS1};
pub use builder::{AttributeBuilder, BarcodeBuilder};
pub use context::Context;
pub use identifier::IdentifierType;
pub use metadata::{Metadata, MetadataValue};
pub use symbology::{GROUP_SEPARATOR, Symbology, UNKNOWN_SYMBOLOGY};
