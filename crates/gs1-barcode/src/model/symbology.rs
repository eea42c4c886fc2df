//! Symbologies that carry GS1 element strings and their FNC1 prefixes.
//!
//! A scanner reports GS1 data with a symbology identifier in front of it
//! (`]C1` for GS1-128, `]d2` for GS1 DataMatrix, ...). The parser strips it to
//! classify the symbol and the formatter emits it again.

use std::fmt;
use std::str::FromStr;

use crate::error::EncodeError;

/// ASCII group separator (GS, 0x1D) terminating variable-length fields.
pub const GROUP_SEPARATOR: char = '\u{1d}';

/// Classification used when no FNC1 prefix was recognized.
pub const UNKNOWN_SYMBOLOGY: &str = "unknown";

/// A symbology able to carry a GS1 element string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(non_camel_case_types)]
pub enum Symbology {
    Gs1_128,
    Gs1DataMatrix,
    Gs1QrCode,
    Ean,
}

impl Symbology {
    /// All symbologies, in prefix matching order.
    pub const ALL: [Symbology; 4] = [
        Symbology::Gs1DataMatrix,
        Symbology::Gs1_128,
        Symbology::Gs1QrCode,
        Symbology::Ean,
    ];

    /// Returns the symbology name (e.g., "gs1_128").
    pub fn name(self) -> &'static str {
        match self {
            Symbology::Gs1_128 => "gs1_128",
            Symbology::Gs1DataMatrix => "gs1_datamatrix",
            Symbology::Gs1QrCode => "gs1_qrcode",
            Symbology::Ean => "ean",
        }
    }

    /// Returns the symbology identifier that marks GS1 data in this symbol.
    pub fn fnc1_prefix(self) -> &'static str {
        match self {
            Symbology::Gs1_128 => "]C1",
            Symbology::Gs1DataMatrix => "]d2",
            Symbology::Gs1QrCode => "]Q3",
            Symbology::Ean => "]e0",
        }
    }

    /// Parses a symbology name.
    ///
    /// Case is ignored and `-` is treated like `_`, so both "gs1_128" and
    /// "GS1-128" are accepted. "GS1-QR" and "GS1-DataMatrix" are aliases.
    pub fn from_name(name: &str) -> Option<Symbology> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "gs1_128" => Some(Symbology::Gs1_128),
            "gs1_datamatrix" => Some(Symbology::Gs1DataMatrix),
            "gs1_qrcode" | "gs1_qr" => Some(Symbology::Gs1QrCode),
            "ean" | "gs1_ean" => Some(Symbology::Ean),
            _ => None,
        }
    }

    /// Detects the symbology from the FNC1 prefix at the start of `data`.
    pub fn detect(data: &str) -> Option<Symbology> {
        Self::ALL
            .into_iter()
            .find(|symbology| data.starts_with(symbology.fnc1_prefix()))
    }

    /// Splits a recognized FNC1 prefix off `data`.
    pub fn strip_prefix(data: &str) -> Option<(Symbology, &str)> {
        let symbology = Self::detect(data)?;
        Some((symbology, &data[symbology.fnc1_prefix().len()..]))
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Symbology {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbology::from_name(s).ok_or_else(|| EncodeError::UnsupportedSymbology {
            symbol: s.to_string(),
        })
    }
}
