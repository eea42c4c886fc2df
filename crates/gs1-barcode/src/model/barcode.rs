//! Structured barcode produced by decoders and generators.
//!
//! A barcode is populated by exactly one decoder or generator and then
//! handed to formatters and encoders. Attributes and metadata keep the order
//! in which they were added; formatting emits attributes in that order.

use std::fmt;

use crate::model::{IdentifierType, Metadata, Symbology};

/// The standard name used for GS1 barcodes.
pub const STANDARD_GS1: &str = "GS1";

/// What kind of data a barcode carries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BarcodeType {
    #[default]
    Unknown,
    /// A bare GS1 key without AI framing.
    Identifier(IdentifierType),
    /// A multi-field AI element string.
    ElementString,
    /// A generated serial number.
    Serial,
    /// Anything else, named by the producer (e.g., "Code128").
    Other(String),
}

impl BarcodeType {
    /// Returns the display name ("" for unknown).
    pub fn name(&self) -> &str {
        match self {
            BarcodeType::Unknown => "",
            BarcodeType::Identifier(kind) => kind.name(),
            BarcodeType::ElementString => "ElementString",
            BarcodeType::Serial => "Serial",
            BarcodeType::Other(name) => name,
        }
    }
}

/// One data element of a barcode, usually keyed by its AI.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BarcodeAttribute {
    /// The application identifier (or scheme label).
    pub code: String,
    pub value: String,
    /// Human-readable description.
    pub label: Option<String>,
    /// Classification, e.g. the identifier type carried under this AI.
    pub kind: Option<String>,
    pub metadata: Metadata,
}

impl BarcodeAttribute {
    /// Creates an attribute with no label, kind or metadata.
    pub fn new(code: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            value: value.into(),
            label: None,
            kind: None,
            metadata: Metadata::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

/// A decoded or generated barcode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Barcode {
    /// The raw or generated text.
    pub value: String,
    /// Standard name, e.g. "GS1".
    pub standard: Option<String>,
    pub kind: BarcodeType,
    /// Detected or requested symbology.
    pub symbol: Option<Symbology>,
    /// Attributes in insertion order.
    pub attributes: Vec<BarcodeAttribute>,
    pub metadata: Metadata,
}

impl Barcode {
    /// Creates an empty barcode holding `value`.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Starts a [`BarcodeBuilder`](crate::model::BarcodeBuilder).
    pub fn builder() -> crate::model::BarcodeBuilder {
        crate::model::BarcodeBuilder::new()
    }

    /// Appends an attribute and returns it for further adjustment.
    pub fn add_attribute(
        &mut self,
        code: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut BarcodeAttribute {
        self.attributes.push(BarcodeAttribute::new(code, value));
        let last = self.attributes.len() - 1;
        &mut self.attributes[last]
    }

    pub fn push_attribute(&mut self, attribute: BarcodeAttribute) {
        self.attributes.push(attribute);
    }

    /// Returns the first attribute with the given code.
    pub fn attribute(&self, code: &str) -> Option<&BarcodeAttribute> {
        self.attributes.iter().find(|a| a.code == code)
    }

    /// Removes every attribute with the given code, returning how many were removed.
    pub fn remove_attribute(&mut self, code: &str) -> usize {
        let before = self.attributes.len();
        self.attributes.retain(|a| a.code != code);
        before - self.attributes.len()
    }

    /// Returns (code, value) pairs in attribute order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|a| (a.code.as_str(), a.value.as_str()))
    }

    /// Returns true if the standard is GS1 (case-insensitive).
    pub fn is_gs1(&self) -> bool {
        self.standard
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case(STANDARD_GS1))
    }
}

impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_order_and_lookup() {
        let mut barcode = Barcode::new("]C10112345678901231");
        barcode.add_attribute("01", "12345678901231").label = Some("GTIN".to_string());
        barcode.add_attribute("10", "ABC123");
        barcode.add_attribute("10", "DUP");

        let codes: Vec<_> = barcode.fields().map(|(c, _)| c).collect();
        assert_eq!(codes, ["01", "10", "10"]);
        assert_eq!(barcode.attribute("10").unwrap().value, "ABC123");
        assert_eq!(barcode.attribute("01").unwrap().label.as_deref(), Some("GTIN"));

        assert_eq!(barcode.remove_attribute("10"), 2);
        assert_eq!(barcode.attributes.len(), 1);
    }

    #[test]
    fn test_is_gs1() {
        let mut barcode = Barcode::new("x");
        assert!(!barcode.is_gs1());
        barcode.standard = Some("gs1".to_string());
        assert!(barcode.is_gs1());
        barcode.standard = Some("ISO/IEC 15420".to_string());
        assert!(!barcode.is_gs1());
    }

    #[test]
    fn test_type_names() {
        assert_eq!(BarcodeType::Identifier(IdentifierType::Sscc).name(), "SSCC");
        assert_eq!(BarcodeType::Other("Code128".to_string()).name(), "Code128");
        assert_eq!(BarcodeType::Unknown.name(), "");
    }
}
