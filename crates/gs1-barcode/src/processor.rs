//! Single entry point bundling the decoder, formatter, encoder and
//! generator chains.

use crate::decode::DecoderChain;
use crate::encode::{EncodedPayload, EncoderChain};
use crate::error::{DecodeError, EncodeError, GenerateError};
use crate::format::FormatterChain;
use crate::generate::{GenerateRequest, GeneratorChain};
use crate::model::{Barcode, Context};

/// Facade over the four chains.
///
/// # Example
///
/// ```rust
/// use gs1_barcode::{BarcodeProcessor, Context};
///
/// let processor = BarcodeProcessor::default();
/// let barcode = processor.decode("036000291452", &Context::new()).unwrap();
/// assert_eq!(barcode.attributes[0].code, "01");
///
/// // The UPC-A key is carried unpadded, not widened to GTIN-14.
/// let payload = processor.encode(&barcode, "QR", &Context::new()).unwrap();
/// assert_eq!(payload.data, "]Q301036000291452");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BarcodeProcessor {
    decoders: DecoderChain,
    formatters: FormatterChain,
    encoders: EncoderChain,
    generators: GeneratorChain,
}

impl BarcodeProcessor {
    pub fn new(
        decoders: DecoderChain,
        formatters: FormatterChain,
        encoders: EncoderChain,
        generators: GeneratorChain,
    ) -> Self {
        Self {
            decoders,
            formatters,
            encoders,
            generators,
        }
    }

    pub fn with_decoders(mut self, decoders: DecoderChain) -> Self {
        self.decoders = decoders;
        self
    }

    pub fn with_formatters(mut self, formatters: FormatterChain) -> Self {
        self.formatters = formatters;
        self
    }

    pub fn with_encoders(mut self, encoders: EncoderChain) -> Self {
        self.encoders = encoders;
        self
    }

    pub fn with_generators(mut self, generators: GeneratorChain) -> Self {
        self.generators = generators;
        self
    }

    /// Decodes scanned text.
    pub fn decode(&self, data: &str, ctx: &Context) -> Result<Barcode, DecodeError> {
        self.decoders.decode(data, ctx)
    }

    /// Formats a barcode as text (element string, label or plain value).
    pub fn format(&self, barcode: &Barcode, ctx: &Context) -> Result<String, EncodeError> {
        self.formatters.format(barcode, ctx)
    }

    /// Prepares the payload for rendering `barcode` as `symbol`.
    pub fn encode(
        &self,
        barcode: &Barcode,
        symbol: &str,
        ctx: &Context,
    ) -> Result<EncodedPayload, EncodeError> {
        self.encoders.encode(barcode, symbol, ctx, &self.formatters)
    }

    /// Generates a new barcode.
    pub fn generate(&self, request: &GenerateRequest) -> Result<Barcode, GenerateError> {
        self.generators.generate(request)
    }
}
