//! GS1 element-string encoding and decoding.
//!
//! Two textual forms are supported:
//! - the scanned form: FNC1 prefix, AIs, values and group separators
//! - the bracketed human-readable form: `(01)12345678901231(10)ABC123`

pub mod bracketed;
pub mod element;
pub mod primitives;

pub use bracketed::{format_bracketed, is_bracketed, parse_bracketed};
pub use element::{
    ElementField, ElementString, FormatterConfig, ParserConfig, format_element_string,
    format_element_string_with_config, parse_element_string, parse_element_string_with_config,
};
pub use primitives::{Reader, Writer};
