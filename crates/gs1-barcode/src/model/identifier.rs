//! GS1 identification key types.

use std::fmt;

/// A GS1 identification key type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IdentifierType {
    /// Global Trade Item Number (8, 12, 13 or 14 digits)
    Gtin,
    /// Serial Shipping Container Code (18 digits)
    Sscc,
    /// Global Location Number (13 digits)
    Gln,
    /// Global Returnable Asset Identifier (14 digits + optional serial)
    Grai,
    /// Global Individual Asset Identifier (up to 30 characters)
    Giai,
    /// Global Service Relation Number (18 digits)
    Gsrn,
    /// Global Document Type Identifier (13 digits + optional serial)
    Gdti,
    /// Global Identification Number for Consignment (up to 30 characters)
    Ginc,
    /// Global Shipment Identification Number (17 digits)
    Gsin,
}

impl IdentifierType {
    /// Every key type, in declaration order.
    pub const ALL: [IdentifierType; 9] = [
        IdentifierType::Gtin,
        IdentifierType::Sscc,
        IdentifierType::Gln,
        IdentifierType::Grai,
        IdentifierType::Giai,
        IdentifierType::Gsrn,
        IdentifierType::Gdti,
        IdentifierType::Ginc,
        IdentifierType::Gsin,
    ];

    /// Returns the upper-case GS1 acronym (e.g., "GTIN").
    pub fn name(self) -> &'static str {
        match self {
            IdentifierType::Gtin => "GTIN",
            IdentifierType::Sscc => "SSCC",
            IdentifierType::Gln => "GLN",
            IdentifierType::Grai => "GRAI",
            IdentifierType::Giai => "GIAI",
            IdentifierType::Gsrn => "GSRN",
            IdentifierType::Gdti => "GDTI",
            IdentifierType::Ginc => "GINC",
            IdentifierType::Gsin => "GSIN",
        }
    }

    /// Parses an acronym, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<IdentifierType> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Returns the canonical application identifier for this key type.
    pub fn ai(self) -> &'static str {
        crate::registry::ai_for(self)
    }

    /// Returns true if the key carries a mod-10 check digit.
    pub fn has_check_digit(self) -> bool {
        !matches!(self, IdentifierType::Giai | IdentifierType::Ginc)
    }
}

impl fmt::Display for IdentifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_roundtrip() {
        for kind in IdentifierType::ALL {
            assert_eq!(IdentifierType::from_name(kind.name()), Some(kind));
        }
        assert_eq!(IdentifierType::from_name(" gtin "), Some(IdentifierType::Gtin));
        assert_eq!(IdentifierType::from_name("EAN"), None);
    }

    #[test]
    fn test_check_digit_bearing() {
        assert!(IdentifierType::Gtin.has_check_digit());
        assert!(IdentifierType::Gdti.has_check_digit());
        assert!(!IdentifierType::Giai.has_check_digit());
        assert!(!IdentifierType::Ginc.has_check_digit());
    }
}
