//! Encoders preparing the symbol payload for an external renderer.
//!
//! An encoder picks the GS1 symbology for a requested symbol, formats the
//! barcode for it and returns the text the renderer has to draw. Rendering
//! to pixels or vectors is left to the caller.

use log::debug;

use crate::error::EncodeError;
use crate::format::FormatterChain;
use crate::model::{Barcode, Context, STANDARD_GS1, Symbology};

/// Output formats a renderer is expected to produce.
pub const OUTPUT_FORMATS: &[&str] = &["PNG", "SVG", "PDF"];

/// Text ready to be rendered as a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncodedPayload {
    /// Symbol requested by the caller, upper-cased (e.g. "QR").
    pub symbol: String,
    /// Symbology the payload was formatted for.
    pub symbology: Symbology,
    /// Requested output format, upper-cased.
    pub format: Option<String>,
    pub data: String,
}

/// One of the built-in encoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoder {
    /// QR codes, payload formatted as GS1 QR.
    Qr,
    /// Linear symbols (Code 128, EAN-13, UPC), payload formatted as GS1-128.
    Linear,
}

impl Encoder {
    pub fn name(self) -> &'static str {
        match self {
            Encoder::Qr => "qr",
            Encoder::Linear => "linear",
        }
    }

    /// Symbols this encoder accepts, upper case.
    pub fn symbols(self) -> &'static [&'static str] {
        match self {
            Encoder::Qr => &["QR"],
            Encoder::Linear => &["CODE128", "EAN-13", "UPC"],
        }
    }

    fn symbology(self) -> Symbology {
        match self {
            Encoder::Qr => Symbology::Gs1QrCode,
            Encoder::Linear => Symbology::Gs1_128,
        }
    }

    /// Checks standard, symbol and output format, reporting the first
    /// mismatch.
    fn check(self, barcode: &Barcode, symbol: &str, ctx: &Context) -> Result<(), EncodeError> {
        if let Some(standard) = &barcode.standard {
            if !standard.eq_ignore_ascii_case(STANDARD_GS1) {
                return Err(EncodeError::UnsupportedStandard {
                    standard: standard.clone(),
                });
            }
        }
        if !self.symbols().iter().any(|s| s.eq_ignore_ascii_case(symbol)) {
            return Err(EncodeError::UnsupportedSymbology {
                symbol: symbol.to_string(),
            });
        }
        if let Some(format) = &ctx.format {
            if !OUTPUT_FORMATS.iter().any(|f| f.eq_ignore_ascii_case(format)) {
                return Err(EncodeError::UnsupportedFormat {
                    format: format.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn supports(self, barcode: &Barcode, symbol: &str, ctx: &Context) -> bool {
        self.check(barcode, symbol, ctx).is_ok()
    }

    /// Formats `barcode` for this encoder's symbology.
    ///
    /// The context format names the output image format and is not passed
    /// on to the formatters.
    pub fn encode(
        self,
        barcode: &Barcode,
        symbol: &str,
        ctx: &Context,
        formatters: &FormatterChain,
    ) -> Result<EncodedPayload, EncodeError> {
        self.check(barcode, symbol, ctx)?;
        let symbology = self.symbology();
        let format_ctx = Context {
            standard: ctx.standard.clone(),
            symbol: Some(symbology.name().to_string()),
            format: None,
        };
        let data = formatters.format(barcode, &format_ctx)?;
        Ok(EncodedPayload {
            symbol: symbol.to_ascii_uppercase(),
            symbology,
            format: ctx.format.as_deref().map(str::to_ascii_uppercase),
            data,
        })
    }
}

/// Ordered encoders; the first one that supports the request encodes it.
#[derive(Debug, Clone)]
pub struct EncoderChain {
    encoders: Vec<Encoder>,
}

impl Default for EncoderChain {
    fn default() -> Self {
        Self::new(vec![Encoder::Qr, Encoder::Linear])
    }
}

impl EncoderChain {
    pub fn new(encoders: Vec<Encoder>) -> Self {
        Self { encoders }
    }

    pub fn encoders(&self) -> &[Encoder] {
        &self.encoders
    }

    pub fn supports(&self, barcode: &Barcode, symbol: &str, ctx: &Context) -> bool {
        self.encoders.iter().any(|e| e.supports(barcode, symbol, ctx))
    }

    pub fn encode(
        &self,
        barcode: &Barcode,
        symbol: &str,
        ctx: &Context,
        formatters: &FormatterChain,
    ) -> Result<EncodedPayload, EncodeError> {
        let encoder = self
            .encoders
            .iter()
            .find(|e| e.supports(barcode, symbol, ctx))
            .ok_or_else(|| EncodeError::NoEncoder {
                symbol: symbol.to_string(),
            })?;
        debug!("encoding {symbol} with {} encoder", encoder.name());
        encoder.encode(barcode, symbol, ctx, formatters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GROUP_SEPARATOR;

    fn gtin_lot() -> Barcode {
        Barcode::builder()
            .value("]C1011234567890123110LOT")
            .gs1()
            .symbol(Symbology::Gs1_128)
            .attributes([("01", "12345678901231"), ("10", "LOT"), ("21", "S1")])
            .build()
    }

    #[test]
    fn test_qr_payload() {
        let payload = EncoderChain::default()
            .encode(&gtin_lot(), "qr", &Context::new().with_format("svg"), &FormatterChain::default())
            .unwrap();
        assert_eq!(payload.symbol, "QR");
        assert_eq!(payload.symbology, Symbology::Gs1QrCode);
        assert_eq!(payload.format.as_deref(), Some("SVG"));
        assert_eq!(payload.data, format!("]Q3011234567890123110LOT{GROUP_SEPARATOR}21S1"));
    }

    #[test]
    fn test_linear_payload() {
        for symbol in ["CODE128", "ean-13", "UPC"] {
            let payload = EncoderChain::default()
                .encode(&gtin_lot(), symbol, &Context::new(), &FormatterChain::default())
                .unwrap();
            assert_eq!(payload.symbology, Symbology::Gs1_128);
            assert!(payload.data.starts_with("]C101"));
        }
    }

    #[test]
    fn test_plain_barcode_without_standard() {
        let barcode = Barcode::new("SN-0042");
        let payload = EncoderChain::default()
            .encode(&barcode, "CODE128", &Context::new(), &FormatterChain::default())
            .unwrap();
        assert_eq!(payload.data, "SN-0042");
    }

    #[test]
    fn test_rejections() {
        let mut other = gtin_lot();
        other.standard = Some("HIBC".to_string());
        assert_eq!(
            Encoder::Qr.encode(&other, "QR", &Context::new(), &FormatterChain::default()),
            Err(EncodeError::UnsupportedStandard {
                standard: "HIBC".to_string()
            })
        );
        assert!(matches!(
            Encoder::Qr.encode(&gtin_lot(), "CODE128", &Context::new(), &FormatterChain::default()),
            Err(EncodeError::UnsupportedSymbology { .. })
        ));
        assert!(matches!(
            Encoder::Linear.encode(
                &gtin_lot(),
                "CODE128",
                &Context::new().with_format("GIF"),
                &FormatterChain::default()
            ),
            Err(EncodeError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_no_encoder() {
        let chain = EncoderChain::default();
        assert!(!chain.supports(&gtin_lot(), "PDF417", &Context::new()));
        assert_eq!(
            chain.encode(&gtin_lot(), "PDF417", &Context::new(), &FormatterChain::default()),
            Err(EncodeError::NoEncoder {
                symbol: "PDF417".to_string()
            })
        );
    }
}
