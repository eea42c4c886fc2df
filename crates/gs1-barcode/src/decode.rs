//! Decoders turning scanned text into [`Barcode`]s.
//!
//! The set of decoders is closed. A [`DecoderChain`] tries them in order:
//! the element-string decoder for data with FNC1 prefix or bracket framing,
//! then the bare single-identifier decoder. A decode error from one decoder
//! is recoverable and the chain moves on to the next one.

use log::debug;

use crate::codec::{
    ElementString, ParserConfig, is_bracketed, parse_bracketed, parse_element_string_with_config,
};
use crate::error::DecodeError;
use crate::model::{
    Barcode, BarcodeAttribute, BarcodeType, Context, MetadataValue, STANDARD_GS1, Symbology,
};
use crate::registry;
use crate::validate::detect;

/// Standards accepted by the element-string decoder.
pub const ELEMENT_STRING_STANDARDS: &[&str] = &[STANDARD_GS1];

/// Standards accepted by the single-identifier decoder.
pub const SIMPLE_IDENTIFIER_STANDARDS: &[&str] = &[
    STANDARD_GS1,
    "ISO/IEC 15420",
    "ISO/IEC 15424",
    "ISO/IEC 15434",
    "ISO/IEC 16022",
    "ISO/IEC 18004",
];

/// Builds the attribute for one parsed field: AI label from the registry,
/// and the key type when the AI carries a GS1 key.
fn field_attribute(ai: &str, value: &str) -> BarcodeAttribute {
    let mut attribute = BarcodeAttribute::new(ai, value);
    if let Some(label) = registry::label(ai) {
        attribute = attribute.with_label(label);
    }
    if let Some(kind) = registry::identifier_for_ai(ai) {
        attribute = attribute.with_kind(kind.name());
    }
    attribute
}

/// Returns true if `data` carries an FNC1 prefix or starts with an `(AI)`
/// group. Framed data belongs to the element-string decoder only.
fn is_framed(data: &str) -> bool {
    Symbology::detect(data.trim_start()).is_some() || is_bracketed(data)
}

fn record_context(barcode: &mut Barcode, ctx: &Context) {
    barcode.standard = Some(STANDARD_GS1.to_string());
    barcode.metadata.insert("standard", STANDARD_GS1);
    if let Some(format) = &ctx.format {
        barcode.metadata.insert("format", format.as_str());
    }
}

// =============================================================================
// ELEMENT STRINGS
// =============================================================================

/// Decodes multi-field element strings, prefixed (`]C1...`) or bracketed
/// (`(01)...(10)...`).
#[derive(Debug, Clone, Default)]
pub struct ElementStringDecoder {
    pub config: ParserConfig,
}

impl ElementStringDecoder {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn supports(&self, data: &str, ctx: &Context) -> bool {
        ctx.accepts_standard(ELEMENT_STRING_STANDARDS) && is_framed(data)
    }

    /// Parses `data` and returns the element string without building a barcode.
    pub fn parse(&self, data: &str) -> Result<ElementString, DecodeError> {
        if Symbology::detect(data).is_none() && is_bracketed(data) {
            parse_bracketed(data)
        } else {
            parse_element_string_with_config(data, &self.config)
        }
    }

    pub fn decode(&self, data: &str, ctx: &Context) -> Result<Barcode, DecodeError> {
        if !ctx.accepts_standard(ELEMENT_STRING_STANDARDS) {
            return Err(DecodeError::UnsupportedStandard {
                standard: ctx.standard.clone().unwrap_or_default(),
            });
        }
        let element = self.parse(data)?;

        let mut barcode = Barcode::new(data);
        barcode.kind = BarcodeType::ElementString;
        barcode.symbol = element.symbology;
        barcode.attributes = element
            .pairs()
            .map(|(ai, value)| field_attribute(ai, value))
            .collect();

        barcode.metadata.insert("raw", data);
        barcode.metadata.insert(
            "ais",
            MetadataValue::Fields(
                element
                    .pairs()
                    .map(|(ai, value)| (ai.to_string(), value.to_string()))
                    .collect(),
            ),
        );
        if let Some(symbology) = element.symbology {
            barcode.metadata.insert("symbol", symbology.name());
        }
        record_context(&mut barcode, ctx);
        Ok(barcode)
    }
}

// =============================================================================
// BARE IDENTIFIERS
// =============================================================================

/// Decodes a bare GS1 key (no AI framing) such as a GTIN or SSCC.
///
/// Framed data is never taken for a bare key, so a malformed element string
/// surfaces its parse error instead of decoding as a GIAI. GTIN-8, GTIN-12
/// and GTIN-13 keys are carried unpadded under AI 01.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleIdentifierDecoder;

impl SimpleIdentifierDecoder {
    pub fn supports(&self, data: &str, ctx: &Context) -> bool {
        ctx.accepts_standard(SIMPLE_IDENTIFIER_STANDARDS)
            && !is_framed(data)
            && detect(data).is_some()
    }

    /// Builds a barcode with a single attribute keyed by the key's canonical
    /// AI. The stored value is trimmed; metadata `raw` keeps the input as is.
    pub fn decode(&self, data: &str, ctx: &Context) -> Result<Barcode, DecodeError> {
        if !ctx.accepts_standard(SIMPLE_IDENTIFIER_STANDARDS) {
            return Err(DecodeError::UnsupportedStandard {
                standard: ctx.standard.clone().unwrap_or_default(),
            });
        }
        let value = data.trim();
        if is_framed(value) {
            return Err(DecodeError::NoIdentifierMatch {
                value: value.to_string(),
            });
        }
        let kind = detect(value).ok_or_else(|| DecodeError::NoIdentifierMatch {
            value: value.to_string(),
        })?;

        let mut barcode = Barcode::new(value);
        barcode.kind = BarcodeType::Identifier(kind);
        barcode.push_attribute(field_attribute(kind.ai(), value));
        barcode.metadata.insert("raw", data);
        if let Some(symbol) = &ctx.symbol {
            barcode.symbol = Symbology::from_name(symbol);
            barcode.metadata.insert("symbol", symbol.as_str());
        }
        record_context(&mut barcode, ctx);
        Ok(barcode)
    }
}

// =============================================================================
// CHAIN
// =============================================================================

/// One of the built-in decoders.
#[derive(Debug, Clone)]
pub enum Decoder {
    ElementString(ElementStringDecoder),
    SimpleIdentifier(SimpleIdentifierDecoder),
}

impl Decoder {
    pub fn name(&self) -> &'static str {
        match self {
            Decoder::ElementString(_) => "element_string",
            Decoder::SimpleIdentifier(_) => "simple_identifier",
        }
    }

    fn standards(&self) -> &'static [&'static str] {
        match self {
            Decoder::ElementString(_) => ELEMENT_STRING_STANDARDS,
            Decoder::SimpleIdentifier(_) => SIMPLE_IDENTIFIER_STANDARDS,
        }
    }

    pub fn supports(&self, data: &str, ctx: &Context) -> bool {
        match self {
            Decoder::ElementString(d) => d.supports(data, ctx),
            Decoder::SimpleIdentifier(d) => d.supports(data, ctx),
        }
    }

    pub fn decode(&self, data: &str, ctx: &Context) -> Result<Barcode, DecodeError> {
        match self {
            Decoder::ElementString(d) => d.decode(data, ctx),
            Decoder::SimpleIdentifier(d) => d.decode(data, ctx),
        }
    }
}

/// Ordered decoders; the first one that supports the data and decodes it
/// without error wins.
#[derive(Debug, Clone)]
pub struct DecoderChain {
    decoders: Vec<Decoder>,
}

impl Default for DecoderChain {
    fn default() -> Self {
        Self::new(vec![
            Decoder::ElementString(ElementStringDecoder::default()),
            Decoder::SimpleIdentifier(SimpleIdentifierDecoder),
        ])
    }
}

impl DecoderChain {
    pub fn new(decoders: Vec<Decoder>) -> Self {
        Self { decoders }
    }

    pub fn decoders(&self) -> &[Decoder] {
        &self.decoders
    }

    pub fn supports(&self, data: &str, ctx: &Context) -> bool {
        self.decoders.iter().any(|d| d.supports(data, ctx))
    }

    /// Decodes `data` with the first capable decoder.
    ///
    /// If every capable decoder fails, the last error is returned. If none
    /// is capable, the error is `UnsupportedStandard` when no decoder accepts
    /// the requested standard and `NoDecoder` otherwise.
    pub fn decode(&self, data: &str, ctx: &Context) -> Result<Barcode, DecodeError> {
        let mut last_error = None;
        for decoder in self.decoders.iter().filter(|d| d.supports(data, ctx)) {
            match decoder.decode(data, ctx) {
                Ok(barcode) => {
                    debug!("decoded {:?} with {} decoder", data, decoder.name());
                    return Ok(barcode);
                }
                Err(err) => {
                    debug!("{} decoder rejected {:?}: {}", decoder.name(), data, err);
                    last_error = Some(err);
                }
            }
        }
        if let Some(err) = last_error {
            return Err(err);
        }

        let standard_known = self
            .decoders
            .iter()
            .any(|d| ctx.accepts_standard(d.standards()));
        match &ctx.standard {
            Some(standard) if !standard_known => Err(DecodeError::UnsupportedStandard {
                standard: standard.clone(),
            }),
            _ => Err(DecodeError::NoDecoder),
        }
    }
}
