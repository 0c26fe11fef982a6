//! Streaming field tokenizer for the tagvalue wire format.
//!
//! [`FieldTokenizer`] pulls one `tag=value` field at a time from the
//! mirrored input stream. Reading a field is split in two: `next_field`
//! decodes the integer tag eagerly, but the value token stays on the wire
//! until one of the typed accessors on [`RawField`] consumes it. The
//! accumulator decides per tag whether the value is text, a decimal, or
//! noise to skip.
//!
//! Syntactic corruption is fatal here: a non-numeric tag, a value that
//! fails decimal parsing, or end of input in the middle of a field aborts
//! the run. Recovery happens only at message granularity, and only for
//! semantic duplicate-tag violations detected downstream.
//!
//! # Example
//!
//! ```
//! use fix_highlow_reporter::{FieldTag, FieldTokenizer};
//!
//! let mut tok = FieldTokenizer::new(&b"44=10.5\n"[..]);
//! let mut field = tok.next_field().unwrap().unwrap();
//! assert_eq!(field.tag(), FieldTag::Price);
//! assert_eq!(field.read_as_decimal().unwrap().to_string(), "10.5");
//! ```

use std::io::Read;

use rust_decimal::Decimal;

use crate::delimiter::DelimiterTable;
use crate::error::{FixError, Result};
use crate::tee::TeeReader;
use crate::types::FieldTag;

/// Streaming tokenizer over a mirrored input stream.
pub struct FieldTokenizer<R> {
    tee: TeeReader<R>,
    table: DelimiterTable,
    fields_decoded: u64,
}

impl<R: Read> FieldTokenizer<R> {
    /// Wrap a raw input stream.
    pub fn new(input: R) -> Self {
        Self {
            tee: TeeReader::new(input),
            table: DelimiterTable::new(),
            fields_decoded: 0,
        }
    }

    /// Pull the next field's tag from the stream.
    ///
    /// The field's value is left un-consumed; invoke a typed accessor on
    /// the returned [`RawField`] to read it.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(RawField))` - a field header was decoded
    /// * `Ok(None)` - clean end of input at a tag position
    /// * `Err(FixError::MalformedTag)` - the tag token is not a
    ///   non-negative integer (fatal)
    pub fn next_field(&mut self) -> Result<Option<RawField<'_, R>>> {
        let token = match self.read_token()? {
            Some(token) => token,
            None => return Ok(None),
        };

        let code: u32 = token
            .parse()
            .map_err(|_| FixError::MalformedTag(token.clone()))?;

        self.fields_decoded += 1;
        Ok(Some(RawField {
            tag: FieldTag::from_code(code),
            tokenizer: self,
        }))
    }

    /// Number of fields decoded so far.
    #[inline]
    pub fn fields_decoded(&self) -> u64 {
        self.fields_decoded
    }

    /// Access the underlying tee (diagnostic buffer operations).
    #[inline]
    pub fn tee(&self) -> &TeeReader<R> {
        &self.tee
    }

    /// Mutable access to the underlying tee.
    #[inline]
    pub fn tee_mut(&mut self) -> &mut TeeReader<R> {
        &mut self.tee
    }

    /// Consume boundary bytes until the next byte starts a token.
    fn skip_boundaries(&mut self) -> Result<()> {
        while let Some(byte) = self.tee.peek_byte()? {
            if !self.table.is_boundary(byte) {
                break;
            }
            self.tee.read_byte()?;
        }
        Ok(())
    }

    /// Read one token: skip leading boundaries, then accumulate bytes up
    /// to the next boundary. `None` means end of input before any token
    /// byte.
    fn read_token(&mut self) -> Result<Option<String>> {
        self.skip_boundaries()?;

        let mut token = Vec::new();
        while let Some(byte) = self.tee.peek_byte()? {
            if self.table.is_boundary(byte) {
                break;
            }
            self.tee.read_byte()?;
            token.push(byte);
        }

        if token.is_empty() {
            return Ok(None);
        }

        Ok(Some(String::from_utf8_lossy(&token).into_owned()))
    }
}

/// A decoded tag with exclusive access to its not-yet-consumed value.
///
/// Borrows the tokenizer for exactly one consumption step; the typed
/// accessors pull the value token off the wire, and the boundary helpers
/// let the caller fold terminator detection into the same step.
pub struct RawField<'t, R> {
    tag: FieldTag,
    tokenizer: &'t mut FieldTokenizer<R>,
}

impl<R: Read> RawField<'_, R> {
    /// The field's tag.
    #[inline]
    pub fn tag(&self) -> FieldTag {
        self.tag
    }

    /// Consume the value token as text.
    pub fn read_as_text(&mut self) -> Result<String> {
        self.tokenizer
            .read_token()?
            .ok_or(FixError::UnexpectedEof("a field value"))
    }

    /// Consume the value token as a decimal.
    pub fn read_as_decimal(&mut self) -> Result<Decimal> {
        let token = self.read_as_text()?;
        token.parse().map_err(|_| FixError::MalformedValue {
            tag: self.tag.code(),
            token,
        })
    }

    /// Consume and discard the value token.
    pub fn skip(&mut self) -> Result<()> {
        self.read_as_text().map(|_| ())
    }

    /// True if the next byte terminates the current message.
    pub fn at_message_boundary(&mut self) -> Result<bool> {
        let peeked = self.tokenizer.tee.peek_byte()?;
        Ok(matches!(peeked, Some(byte) if self.tokenizer.table.is_terminator(byte)))
    }

    /// Consume the message terminator.
    ///
    /// Call only after [`RawField::at_message_boundary`] returned true.
    pub fn consume_terminator(&mut self) -> Result<()> {
        self.tokenizer.tee.read_byte()?;
        Ok(())
    }

    /// Discard the rest of the current line without mirroring.
    ///
    /// Used once the message is condemned; see
    /// [`TeeReader::skip_line`](crate::TeeReader::skip_line).
    pub fn discard_line(&mut self) -> Result<()> {
        self.tokenizer.tee.skip_line()
    }
}
