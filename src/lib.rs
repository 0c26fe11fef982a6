//! # fix-highlow-reporter
//!
//! Streaming reader for simplified FIX-style "tagvalue" records that
//! reports the per-account high and low order price observed.
//!
//! Input is line-oriented text: each message is a sequence of
//! `tag=value` fields separated by `|` and terminated by a newline. A
//! message whose type field is `35=D` and which carries an account
//! (tag 1) and a price (tag 44) is an order placement; everything else
//! is ignored. Messages that repeat a tag are treated as corrupt: their
//! raw bytes are dumped to a diagnostic channel and the rest of the line
//! is discarded, without disturbing subsequent messages.
//!
//! ## Quick Start
//!
//! ```
//! use fix_highlow_reporter::{Pipeline, ReportFormat};
//!
//! let input = &b"1=ACME|35=D|44=10.5\n1=ACME|35=D|44=12.0\n1=FOO|35=D|44=5\n"[..];
//! let mut diagnostics = Vec::new();
//!
//! let summary = Pipeline::new(input, &mut diagnostics).run().unwrap();
//!
//! let mut report = Vec::new();
//! ReportFormat::default()
//!     .render(&summary.accounts, &mut report)
//!     .unwrap();
//!
//! let text = String::from_utf8(report).unwrap();
//! assert!(text.contains("ACME        12.0    10.5"));
//! assert!(diagnostics.is_empty());
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`delimiter`] | Token-boundary classification (`\|`, `=`, whitespace) |
//! | [`tee`] | Byte-mirroring input wrapper for diagnostics |
//! | [`tokenizer`] | Field tokenizer with typed value accessors |
//! | [`accumulator`] | Per-message state machine (duplicate detection) |
//! | [`aggregator`] | Per-account high/low folding |
//! | [`pipeline`] | Single-pass driver wiring it all together |
//! | [`report`] | Fixed-width table and JSON rendering |
//!
//! ## Failure Policy
//!
//! Duplicate tags are recoverable and message-scoped; syntactic
//! corruption (non-numeric tag, bad decimal, end of input mid-field or
//! mid-message) is fatal to the run and suppresses the report. See
//! [`error`] for the taxonomy.

pub mod accumulator;
pub mod aggregator;
pub mod delimiter;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod tee;
pub mod tokenizer;
pub mod types;

// Re-exports - Core types
pub use error::{FixError, Result};
pub use types::{AccountStat, FieldTag, Outcome, ORDER_PLACEMENT_TYPE};

// Re-exports - Stream plumbing
pub use delimiter::{DelimiterTable, FIELD_SEPARATOR, MESSAGE_TERMINATOR, TAG_VALUE_SEPARATOR};
pub use tee::TeeReader;
pub use tokenizer::{FieldTokenizer, RawField};

// Re-exports - Processing
pub use accumulator::MessageAccumulator;
pub use aggregator::HighLowAggregator;
pub use pipeline::{Pipeline, PipelineStats, PipelineSummary};

// Re-exports - Rendering
pub use report::{render_json, ReportFormat};
