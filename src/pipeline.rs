//! Pull-based pipeline driver.
//!
//! [`Pipeline`] wires the components together and runs the single pass
//! over the input: raw bytes → tee → tokenizer → accumulator →
//! aggregator. Everything is synchronous and single-threaded; the
//! aggregator end pulls one field at a time, so nothing is buffered
//! beyond the current token and the current message's mirror copy.
//!
//! The driver also owns the end-of-input policy: the run ends cleanly
//! only when input is exhausted at a message boundary. End of input with
//! a message still accumulating is a truncation failure, and any
//! syntactic corruption from the tokenizer propagates immediately; no
//! report is produced for a failed run.
//!
//! # Example
//!
//! ```
//! use fix_highlow_reporter::Pipeline;
//!
//! let input = &b"1=ACME|35=D|44=10.5\n1=ACME|35=D|44=12.0\n"[..];
//! let mut diagnostics = Vec::new();
//!
//! let summary = Pipeline::new(input, &mut diagnostics).run().unwrap();
//! assert_eq!(summary.accounts.len(), 1);
//! assert_eq!(summary.stats.orders_accepted, 2);
//! ```

use std::io::{Read, Write};

use indexmap::IndexMap;

use crate::accumulator::MessageAccumulator;
use crate::aggregator::HighLowAggregator;
use crate::error::{FixError, Result};
use crate::tokenizer::FieldTokenizer;
use crate::types::{AccountStat, Outcome};

/// Counters for one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Fields decoded from the stream
    pub fields_decoded: u64,

    /// Messages accepted as orders
    pub orders_accepted: u64,

    /// Messages purged (syntactically fine, not a usable order)
    pub messages_purged: u64,

    /// Messages discarded for duplicate-field violations
    pub duplicate_fields: u64,

    /// Total bytes consumed from the input
    pub bytes_consumed: u64,
}

impl PipelineStats {
    /// Total messages that reached a boundary decision.
    #[inline]
    pub fn messages_seen(&self) -> u64 {
        self.orders_accepted + self.messages_purged + self.duplicate_fields
    }
}

/// Terminal product of a successful run.
#[derive(Debug)]
pub struct PipelineSummary {
    /// Account → high/low statistic, in first-seen order
    pub accounts: IndexMap<String, AccountStat>,

    /// Run counters
    pub stats: PipelineStats,
}

/// Single-pass tagvalue pipeline.
pub struct Pipeline<R, W> {
    tokenizer: FieldTokenizer<R>,
    accumulator: MessageAccumulator,
    aggregator: HighLowAggregator,
    diag: W,
    stats: PipelineStats,
}

impl<R: Read, W: Write> Pipeline<R, W> {
    /// Build a pipeline over a raw input stream and a diagnostic sink.
    pub fn new(input: R, diag: W) -> Self {
        Self {
            tokenizer: FieldTokenizer::new(input),
            accumulator: MessageAccumulator::new(),
            aggregator: HighLowAggregator::new(),
            diag,
            stats: PipelineStats::default(),
        }
    }

    /// Consume the entire input and return the final mapping.
    ///
    /// # Returns
    ///
    /// * `Ok(PipelineSummary)` - input fully consumed, ended at a message
    ///   boundary
    /// * `Err(FixError::TruncatedMessage)` - input ended mid-message
    /// * `Err(_)` - malformed token or stream failure (fatal; nothing is
    ///   reported for the run)
    pub fn run(mut self) -> Result<PipelineSummary> {
        loop {
            let field = match self.tokenizer.next_field()? {
                Some(field) => field,
                None => break,
            };

            let outcome = self.accumulator.step(field)?;
            match outcome {
                Outcome::Pending => {}
                Outcome::Order { .. } => self.stats.orders_accepted += 1,
                Outcome::Purge => self.stats.messages_purged += 1,
                Outcome::DuplicateField => self.stats.duplicate_fields += 1,
            }

            self.aggregator
                .apply(outcome, self.tokenizer.tee_mut(), &mut self.diag)?;
        }

        if self.accumulator.in_message() {
            return Err(FixError::TruncatedMessage);
        }

        self.stats.fields_decoded = self.tokenizer.fields_decoded();
        self.stats.bytes_consumed = self.tokenizer.tee().bytes_read();

        log::debug!(
            "run complete: {} fields, {} orders, {} purged, {} duplicate-stricken, {} bytes",
            self.stats.fields_decoded,
            self.stats.orders_accepted,
            self.stats.messages_purged,
            self.stats.duplicate_fields,
            self.stats.bytes_consumed,
        );

        Ok(PipelineSummary {
            accounts: self.aggregator.into_accounts(),
            stats: self.stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn run(input: &[u8]) -> (Result<PipelineSummary>, Vec<u8>) {
        let mut diag = Vec::new();
        let result = Pipeline::new(input, &mut diag).run();
        (result, diag)
    }

    #[test]
    fn test_empty_input_is_clean() {
        let (result, diag) = run(b"");
        let summary = result.unwrap();
        assert!(summary.accounts.is_empty());
        assert_eq!(summary.stats.messages_seen(), 0);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_single_order() {
        let (result, diag) = run(b"1=ACME|35=D|44=10.5\n");
        let summary = result.unwrap();
        assert_eq!(summary.accounts.len(), 1);
        assert_eq!(summary.accounts["ACME"].high, Some(dec("10.5")));
        assert_eq!(summary.accounts["ACME"].low, Some(dec("10.5")));
        assert_eq!(summary.stats.orders_accepted, 1);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_stats_counters() {
        let input = b"1=ACME|35=D|44=10.5\n35=8|1=X|44=1\n1=A|1=A|35=D|44=2\n";
        let (result, _) = run(input);
        let stats = result.unwrap().stats;
        assert_eq!(stats.orders_accepted, 1);
        assert_eq!(stats.messages_purged, 1);
        assert_eq!(stats.duplicate_fields, 1);
        assert_eq!(stats.messages_seen(), 3);
        assert_eq!(stats.bytes_consumed, input.len() as u64);
    }

    #[test]
    fn test_truncated_final_message_fails() {
        let (result, _) = run(b"1=ACME|35=D|44=10.5\n1=FOO|35=D");
        assert!(matches!(result, Err(FixError::TruncatedMessage)));
    }

    #[test]
    fn test_trailing_newline_is_a_boundary() {
        let (result, _) = run(b"1=ACME|35=D|44=10.5\n");
        assert!(result.is_ok());
    }

    #[test]
    fn test_malformed_tag_aborts() {
        let (result, _) = run(b"1=ACME|35=D|44=1\nbogus=1\n");
        assert!(matches!(result, Err(FixError::MalformedTag(_))));
    }

    #[test]
    fn test_duplicate_then_clean_eof() {
        // The discard path completes the boundary even when the
        // condemned line is the last one.
        let (result, diag) = run(b"1=A|1=A|35=D|44=1\n");
        let summary = result.unwrap();
        assert!(summary.accounts.is_empty());
        assert_eq!(diag, b"1=A|1=A");
    }
}
