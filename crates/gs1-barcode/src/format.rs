//! Formatters turning a [`Barcode`] back into text.

use log::debug;

use crate::codec::{FormatterConfig, format_bracketed, format_element_string_with_config};
use crate::error::EncodeError;
use crate::model::{Barcode, Context};

/// Context format selecting the human-readable label formatter.
pub const LABEL_FORMAT: &str = "label";

/// One of the built-in formatters.
#[derive(Debug, Clone)]
pub enum Formatter {
    /// FNC1-prefixed element string for GS1 barcodes with attributes.
    /// Values are emitted as stored, so GTIN-8, GTIN-12 and GTIN-13 keys
    /// under AI 01 stay unpadded.
    ElementString(FormatterConfig),
    /// Human-readable `(01) 12345678901231 (10) ABC` text, selected with
    /// the "label" format.
    ReadableLabel,
    /// The barcode value as is. Supports every barcode.
    Plain,
}

impl Formatter {
    pub fn name(&self) -> &'static str {
        match self {
            Formatter::ElementString(_) => "element_string",
            Formatter::ReadableLabel => "readable_label",
            Formatter::Plain => "plain",
        }
    }

    /// The element-string formatter does not look at the symbology here; an
    /// unknown one is reported by [`Formatter::format`].
    pub fn supports(&self, barcode: &Barcode, ctx: &Context) -> bool {
        let gs1_fields = barcode.is_gs1() && !barcode.attributes.is_empty();
        match self {
            Formatter::ElementString(_) => gs1_fields && !ctx.format_is(LABEL_FORMAT),
            Formatter::ReadableLabel => gs1_fields && ctx.format_is(LABEL_FORMAT),
            Formatter::Plain => true,
        }
    }

    pub fn format(&self, barcode: &Barcode, ctx: &Context) -> Result<String, EncodeError> {
        match self {
            Formatter::ElementString(config) => {
                let symbology = config.resolve_symbology(ctx.symbol.as_deref(), barcode.symbol)?;
                format_element_string_with_config(barcode.fields(), symbology, config)
            }
            Formatter::ReadableLabel => format_bracketed(barcode.fields()),
            Formatter::Plain => Ok(barcode.value.clone()),
        }
    }
}

/// Ordered formatters; the first one that supports the barcode formats it.
///
/// Format errors are not retried with the next formatter.
#[derive(Debug, Clone)]
pub struct FormatterChain {
    formatters: Vec<Formatter>,
}

impl Default for FormatterChain {
    fn default() -> Self {
        Self::with_config(FormatterConfig::default())
    }
}

impl FormatterChain {
    pub fn new(formatters: Vec<Formatter>) -> Self {
        Self { formatters }
    }

    /// The default chain with a custom element-string configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self::new(vec![
            Formatter::ElementString(config),
            Formatter::ReadableLabel,
            Formatter::Plain,
        ])
    }

    pub fn formatters(&self) -> &[Formatter] {
        &self.formatters
    }

    pub fn supports(&self, barcode: &Barcode, ctx: &Context) -> bool {
        self.formatters.iter().any(|f| f.supports(barcode, ctx))
    }

    pub fn format(&self, barcode: &Barcode, ctx: &Context) -> Result<String, EncodeError> {
        let formatter = self
            .formatters
            .iter()
            .find(|f| f.supports(barcode, ctx))
            .ok_or(EncodeError::NoFormatter)?;
        debug!("formatting barcode with {} formatter", formatter.name());
        formatter.format(barcode, ctx)
    }
}
