//! Per-call hints passed to decoders, formatters and encoders.

use crate::model::STANDARD_GS1;

/// Optional hints for a single decode, format or encode call.
///
/// - `standard`: restricts which standard the data may be read as
/// - `symbol`: symbology name, overrides the one recorded on a barcode
/// - `format`: output selector, e.g. "label" for human-readable text or
///   "PNG" for an encoder target
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Context {
    pub standard: Option<String>,
    pub symbol: Option<String>,
    pub format: Option<String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortcut for a context restricted to the GS1 standard.
    pub fn gs1() -> Self {
        Self::new().with_standard(STANDARD_GS1)
    }

    pub fn with_standard(mut self, standard: impl Into<String>) -> Self {
        self.standard = Some(standard.into());
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Returns true if no standard is requested or the requested one is in
    /// `supported` (ASCII case-insensitive).
    pub fn accepts_standard(&self, supported: &[&str]) -> bool {
        match self.standard.as_deref() {
            Some(standard) => supported
                .iter()
                .any(|s| s.eq_ignore_ascii_case(standard.trim())),
            None => true,
        }
    }

    /// Returns true if the requested format equals `format`, ignoring case.
    pub fn format_is(&self, format: &str) -> bool {
        self.format
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case(format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_standard() {
        assert!(Context::new().accepts_standard(&[STANDARD_GS1]));
        assert!(Context::gs1().accepts_standard(&[STANDARD_GS1]));
        assert!(Context::new().with_standard("gs1").accepts_standard(&[STANDARD_GS1]));
        assert!(!Context::new().with_standard("EAN.UCC").accepts_standard(&[STANDARD_GS1]));
    }

    #[test]
    fn test_format_is() {
        let ctx = Context::new().with_format("Label");
        assert!(ctx.format_is("label"));
        assert!(!Context::new().format_is("label"));
    }
}
