//! Per-message state machine over the field stream.
//!
//! [`MessageAccumulator`] consumes one field per [`step`] call and decides
//! at each message boundary whether a well-formed order was found. It is
//! the only component that understands message semantics:
//!
//! - **Duplicate detection**: every tag code seen in the current message
//!   goes into a set; a repeat condemns the rest of the message. A
//!   duplicate is corruption of the *current message only*: state is
//!   cleared and the machine re-enters accumulation for the next message.
//! - **Field capture**: account (text), price (decimal), and the
//!   order-placement flag (`35=D`). Values of all other tags are consumed
//!   and discarded.
//! - **Boundary folding**: after each field the machine peeks for the
//!   message terminator, so end-of-message detection lives in the same
//!   step function that processes fields, with no second pass over the
//!   stream.
//!
//! [`step`]: MessageAccumulator::step
//!
//! # Example
//!
//! ```
//! use fix_highlow_reporter::{FieldTokenizer, MessageAccumulator, Outcome};
//!
//! let mut tok = FieldTokenizer::new(&b"1=ACME|35=D|44=10.5\n"[..]);
//! let mut acc = MessageAccumulator::new();
//!
//! let mut last = Outcome::Pending;
//! while let Some(field) = tok.next_field().unwrap() {
//!     last = acc.step(field).unwrap();
//! }
//! assert!(matches!(last, Outcome::Order { .. }));
//! ```

use std::io::Read;

use ahash::AHashSet;
use rust_decimal::Decimal;

use crate::error::Result;
use crate::tokenizer::RawField;
use crate::types::{FieldTag, Outcome, ORDER_PLACEMENT_TYPE};

/// State machine accumulating one message's fields.
#[derive(Debug, Default)]
pub struct MessageAccumulator {
    /// Tag codes seen in the current message
    discovered: AHashSet<u32>,

    /// Captured account identifier
    account: Option<String>,

    /// Captured order price
    price: Option<Decimal>,

    /// True once the message type field equals the order-placement code
    is_order: bool,
}

impl MessageAccumulator {
    /// Create a fresh accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one field and report the message's status.
    ///
    /// # Returns
    ///
    /// * `Outcome::Pending` - the message continues
    /// * `Outcome::Order` - terminator reached with type flag, account,
    ///   and price all present
    /// * `Outcome::Purge` - terminator reached without a usable order
    /// * `Outcome::DuplicateField` - the field's tag was already seen;
    ///   the rest of the line has been discarded and per-message state
    ///   cleared
    ///
    /// Errors are syntactic (malformed value, end of stream mid-field)
    /// and fatal to the run.
    pub fn step<R: Read>(&mut self, mut field: RawField<'_, R>) -> Result<Outcome> {
        let tag = field.tag();

        if !self.discovered.insert(tag.code()) {
            log::warn!(
                "duplicate tag {} within one message, discarding the rest of the line",
                tag.code()
            );
            // Pull the duplicate's value through the mirror so the
            // diagnostic dump ends with the complete offending field,
            // then throw away the condemned remainder outside it.
            field.read_as_text()?;
            field.discard_line()?;
            self.reset();
            return Ok(Outcome::DuplicateField);
        }

        match tag {
            FieldTag::Account => self.account = Some(field.read_as_text()?),
            FieldTag::MsgType => {
                if field.read_as_text()? == ORDER_PLACEMENT_TYPE {
                    self.is_order = true;
                }
            }
            FieldTag::Price => self.price = Some(field.read_as_decimal()?),
            FieldTag::Other(_) => field.skip()?,
        }

        if !field.at_message_boundary()? {
            return Ok(Outcome::Pending);
        }
        field.consume_terminator()?;

        let outcome = match (self.is_order, self.account.take(), self.price.take()) {
            (true, Some(account), Some(price)) => Outcome::Order { account, price },
            _ => Outcome::Purge,
        };
        self.reset();
        Ok(outcome)
    }

    /// True if any fields have been accumulated since the last boundary.
    ///
    /// End of input with `in_message()` true means the final message was
    /// never terminated.
    #[inline]
    pub fn in_message(&self) -> bool {
        !self.discovered.is_empty()
    }

    /// Clear all per-message state.
    fn reset(&mut self) {
        self.discovered.clear();
        self.account = None;
        self.price = None;
        self.is_order = false;
    }
}
