//! Byte-mirroring wrapper over the raw input stream.
//!
//! [`TeeReader`] sits beneath the tokenizer and copies every byte it hands
//! out into a mirror buffer, so the exact raw bytes of the message
//! currently being parsed stay recoverable for diagnostics. The buffer is
//! rewound at every message boundary; it is drained to the diagnostic sink
//! only when a message dies of a duplicate-field violation.
//!
//! Two invariants matter here:
//!
//! - Only *consuming* reads mirror. Peeking (used for terminator
//!   detection) must never duplicate a byte into the buffer.
//! - [`TeeReader::skip_line`] bypasses the mirror. It exists solely to
//!   throw away the condemned remainder of a duplicate-stricken message,
//!   whose bytes must not surface in any later dump.
//!
//! # Example
//!
//! ```
//! use fix_highlow_reporter::TeeReader;
//!
//! let mut tee = TeeReader::new(&b"ab"[..]);
//! assert_eq!(tee.peek_byte().unwrap(), Some(b'a'));
//! assert_eq!(tee.read_byte().unwrap(), Some(b'a'));
//! assert_eq!(tee.mirror(), b"a"); // the peek did not mirror twice
//! ```

use std::io::{Read, Write};

use crate::delimiter::MESSAGE_TERMINATOR;
use crate::error::Result;

/// Pass-through byte source with a diagnostic mirror buffer.
pub struct TeeReader<R> {
    /// Raw input stream
    inner: R,

    /// Byte fetched ahead by a peek, not yet consumed (and not mirrored)
    peeked: Option<u8>,

    /// Raw bytes of the message currently being parsed
    mirror: Vec<u8>,

    /// Total bytes consumed from the input
    bytes_read: u64,
}

impl<R: Read> TeeReader<R> {
    /// Wrap a raw input stream.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            peeked: None,
            mirror: Vec::new(),
            bytes_read: 0,
        }
    }

    /// Consume one byte, copying it into the mirror buffer first.
    ///
    /// Returns `Ok(None)` at end of input.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        let byte = match self.peeked.take() {
            Some(byte) => Some(byte),
            None => self.pull()?,
        };

        if let Some(byte) = byte {
            self.mirror.push(byte);
            self.bytes_read += 1;
        }

        Ok(byte)
    }

    /// Look at the next byte without consuming it.
    ///
    /// The byte is NOT copied into the mirror buffer until an actual
    /// `read_byte` consumes it.
    pub fn peek_byte(&mut self) -> Result<Option<u8>> {
        if self.peeked.is_none() {
            self.peeked = self.pull()?;
        }
        Ok(self.peeked)
    }

    /// Rewind the mirror buffer to empty.
    ///
    /// Called after a message is accepted or purged.
    #[inline]
    pub fn clear(&mut self) {
        self.mirror.clear();
    }

    /// Write the mirrored bytes to a diagnostic sink and rewind the buffer.
    ///
    /// Returns the number of bytes emitted.
    pub fn drain_diagnostics<W: Write>(&mut self, sink: &mut W) -> Result<usize> {
        let len = self.mirror.len();
        sink.write_all(&self.mirror)?;
        sink.flush()?;
        self.mirror.clear();
        Ok(len)
    }

    /// Consume raw input up to and including the next message terminator,
    /// without mirroring.
    ///
    /// Used to discard the remainder of a message that has already been
    /// condemned; those bytes never reach a diagnostic dump. Stops at end
    /// of input if no terminator follows.
    pub fn skip_line(&mut self) -> Result<()> {
        if let Some(byte) = self.peeked.take() {
            self.bytes_read += 1;
            if byte == MESSAGE_TERMINATOR {
                return Ok(());
            }
        }

        loop {
            match self.pull()? {
                None => return Ok(()),
                Some(byte) => {
                    self.bytes_read += 1;
                    if byte == MESSAGE_TERMINATOR {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// The raw bytes mirrored since the last rewind.
    #[inline]
    pub fn mirror(&self) -> &[u8] {
        &self.mirror
    }

    /// Total bytes consumed from the input.
    #[inline]
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Fetch one byte from the underlying stream.
    fn pull(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}
