//! Builder API for ergonomic Barcode construction.
//!
//! # Example
//!
//! ```rust
//! use gs1_barcode::model::{BarcodeBuilder, BarcodeType, Symbology};
//!
//! let barcode = BarcodeBuilder::new()
//!     .value("]C10112345678901231")
//!     .gs1()
//!     .kind(BarcodeType::ElementString)
//!     .symbol(Symbology::Gs1_128)
//!     .attribute_with("01", "12345678901231", |a| a
//!         .label("Global Trade Item Number (GTIN)")
//!         .kind("GTIN")
//!     )
//!     .attribute("10", "ABC123")
//!     .build();
//!
//! assert_eq!(barcode.attributes.len(), 2);
//! ```

use crate::model::{
    Barcode, BarcodeAttribute, BarcodeType, Metadata, MetadataValue, STANDARD_GS1, Symbology,
};

/// Builder for constructing a [`Barcode`].
#[derive(Debug, Clone, Default)]
pub struct BarcodeBuilder {
    barcode: Barcode,
}

impl BarcodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the barcode value.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.barcode.value = value.into();
        self
    }

    /// Sets the standard name.
    pub fn standard(mut self, standard: impl Into<String>) -> Self {
        self.barcode.standard = Some(standard.into());
        self
    }

    /// Shortcut for `.standard("GS1")`.
    pub fn gs1(self) -> Self {
        self.standard(STANDARD_GS1)
    }

    pub fn kind(mut self, kind: BarcodeType) -> Self {
        self.barcode.kind = kind;
        self
    }

    pub fn symbol(mut self, symbol: Symbology) -> Self {
        self.barcode.symbol = Some(symbol);
        self
    }

    /// Appends an attribute with no label or metadata.
    pub fn attribute(mut self, code: impl Into<String>, value: impl Into<String>) -> Self {
        self.barcode.push_attribute(BarcodeAttribute::new(code, value));
        self
    }

    /// Appends an attribute configured by a builder function.
    pub fn attribute_with<F>(mut self, code: impl Into<String>, value: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(AttributeBuilder) -> AttributeBuilder,
    {
        let builder = f(AttributeBuilder::new(code, value));
        self.barcode.push_attribute(builder.build());
        self
    }

    /// Appends (code, value) pairs as plain attributes.
    pub fn attributes<I, C, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (C, V)>,
        C: Into<String>,
        V: Into<String>,
    {
        for (code, value) in fields {
            self.barcode.push_attribute(BarcodeAttribute::new(code, value));
        }
        self
    }

    /// Adds or replaces a metadata entry.
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.barcode.metadata.insert(key, value);
        self
    }

    pub fn build(self) -> Barcode {
        self.barcode
    }
}

/// Builder for a single [`BarcodeAttribute`].
#[derive(Debug, Clone)]
pub struct AttributeBuilder {
    attribute: BarcodeAttribute,
}

impl AttributeBuilder {
    pub fn new(code: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute: BarcodeAttribute::new(code, value),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.attribute.label = Some(label.into());
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.attribute.kind = Some(kind.into());
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.attribute.metadata.insert(key, value);
        self
    }

    /// Replaces all metadata at once.
    pub fn metadata_map(mut self, metadata: Metadata) -> Self {
        self.attribute.metadata = metadata;
        self
    }

    pub fn build(self) -> BarcodeAttribute {
        self.attribute
    }
}
