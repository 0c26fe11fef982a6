//! Folding message outcomes into per-account high/low statistics.
//!
//! [`HighLowAggregator`] consumes the accumulator's outcome stream and
//! owns the terminal product of the pipeline: an insertion-ordered map
//! from account to [`AccountStat`]. It also owns the diagnostic policy at
//! message boundaries: the tee's mirror is drained to the diagnostic
//! sink only for duplicate-field violations, and silently rewound for
//! everything else.

use std::io::{Read, Write};

use indexmap::IndexMap;

use crate::error::Result;
use crate::tee::TeeReader;
use crate::types::{AccountStat, Outcome};

/// Per-account high/low aggregator.
///
/// The map preserves insertion order, so the final report lists accounts
/// in first-seen order, deterministic for a given input.
#[derive(Debug, Default)]
pub struct HighLowAggregator {
    accounts: IndexMap<String, AccountStat>,
}

impl HighLowAggregator {
    /// Create an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one message outcome.
    ///
    /// * `Pending` - no-op (the message is still accumulating).
    /// * `Order` - fold the price into the account's statistic and rewind
    ///   the mirror.
    /// * `Purge` - rewind the mirror without draining; the message was
    ///   syntactically fine but not a usable order.
    /// * `DuplicateField` - drain the mirror (the raw bytes of the failed
    ///   message) to the diagnostic sink, which also rewinds it.
    pub fn apply<R: Read, W: Write>(
        &mut self,
        outcome: Outcome,
        tee: &mut TeeReader<R>,
        diag: &mut W,
    ) -> Result<()> {
        match outcome {
            Outcome::Pending => {}
            Outcome::Order { account, price } => {
                self.accounts.entry(account).or_default().update(price);
                tee.clear();
            }
            Outcome::Purge => tee.clear(),
            Outcome::DuplicateField => {
                let dumped = tee.drain_diagnostics(diag)?;
                log::debug!("dumped {dumped} bytes of a duplicate-stricken message");
            }
        }
        Ok(())
    }

    /// The accumulated per-account statistics.
    #[inline]
    pub fn accounts(&self) -> &IndexMap<String, AccountStat> {
        &self.accounts
    }

    /// Number of accounts with at least one accepted order.
    #[inline]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// True if no order has been accepted yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Consume the aggregator, yielding the account map.
    pub fn into_accounts(self) -> IndexMap<String, AccountStat> {
        self.accounts
    }
}
