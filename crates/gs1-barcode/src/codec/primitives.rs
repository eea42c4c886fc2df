//! Cursor-style reading and writing of element-string fields.

use crate::error::DecodeError;
use crate::model::GROUP_SEPARATOR;
use crate::registry::{self, ApplicationIdentifier, MAX_AI_LEN};

// =============================================================================
// DECODING
// =============================================================================

/// Reader over an element string.
///
/// Positions are byte offsets into the string the reader was created from,
/// so errors point into the caller's original input.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a str,
    pos: usize,
    separator: char,
}

impl<'a> Reader<'a> {
    /// Creates a reader using the ASCII group separator.
    pub fn new(data: &'a str) -> Self {
        Self::with_separator(data, GROUP_SEPARATOR)
    }

    /// Creates a reader with a custom field separator.
    pub fn with_separator(data: &'a str, separator: char) -> Self {
        Self {
            data,
            pos: 0,
            separator,
        }
    }

    /// Moves the cursor to `pos`, which must be a char boundary.
    pub fn seek(&mut self, pos: usize) {
        debug_assert!(self.data.is_char_boundary(pos));
        self.pos = pos.min(self.data.len());
    }

    /// Returns the current position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the unread part of the input.
    pub fn remaining(&self) -> &'a str {
        &self.data[self.pos..]
    }

    /// Returns true if all input has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Skips a group separator at the cursor, if there is one.
    pub fn skip_separator(&mut self) -> bool {
        if self.remaining().starts_with(self.separator) {
            self.pos += self.separator.len_utf8();
            true
        } else {
            false
        }
    }

    /// Reads the longest registered AI at the cursor.
    pub fn read_ai(&mut self) -> Result<&'static ApplicationIdentifier, DecodeError> {
        let rest = self.remaining();
        match registry::match_prefix(rest) {
            Some(ai) => {
                self.pos += ai.code.len();
                Ok(ai)
            }
            None => Err(DecodeError::UnknownAi {
                position: self.pos,
                found: rest.chars().take(MAX_AI_LEN).collect(),
            }),
        }
    }

    /// Reads exactly `len` characters as the value of fixed-length `ai`.
    ///
    /// Running out of input, or meeting a group separator inside the field,
    /// is a truncated field.
    pub fn read_fixed(&mut self, ai: &str, len: usize) -> Result<&'a str, DecodeError> {
        let rest = self.remaining();
        let end = match rest.char_indices().nth(len) {
            Some((end, _)) => end,
            None => {
                let available = rest.chars().count();
                if available < len {
                    return Err(DecodeError::TruncatedField {
                        ai: ai.to_string(),
                        expected: len,
                        available,
                    });
                }
                rest.len()
            }
        };
        let value = &rest[..end];
        if let Some(offset) = value.find(self.separator) {
            return Err(DecodeError::TruncatedField {
                ai: ai.to_string(),
                expected: len,
                available: value[..offset].chars().count(),
            });
        }
        self.pos += end;
        Ok(value)
    }

    /// Reads a variable-length value up to the next separator or end of input.
    ///
    /// The separator itself is consumed but not returned.
    pub fn read_variable(&mut self) -> &'a str {
        let rest = self.remaining();
        let end = rest.find(self.separator).unwrap_or(rest.len());
        self.pos += end;
        self.skip_separator();
        &rest[..end]
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for building element strings.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: String,
}

impl Writer {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self { buf: String::new() }
    }

    /// Creates a new writer with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
        }
    }

    /// Returns the written string.
    pub fn into_string(self) -> String {
        self.buf
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes raw text (e.g., an FNC1 prefix).
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    /// Writes an AI immediately followed by its value.
    #[inline]
    pub fn write_field(&mut self, ai: &str, value: &str) {
        self.buf.push_str(ai);
        self.buf.push_str(value);
    }

    #[inline]
    pub fn write_separator(&mut self, separator: char) {
        self.buf.push(separator);
    }
}
