//! Core data types for tagvalue messages and per-account statistics.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Message-type value that marks an order-placement message.
pub const ORDER_PLACEMENT_TYPE: &str = "D";

/// Semantic role of a field within a message.
///
/// Only three tags carry meaning for the report; every other non-negative
/// integer tag is recognized generically as [`FieldTag::Other`] and remains
/// subject to duplicate detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldTag {
    /// Account identifier (tag 1, text value)
    Account,
    /// Message type (tag 35, text value; `"D"` = order placement)
    MsgType,
    /// Order price (tag 44, decimal value)
    Price,
    /// Any other tag; value is consumed and discarded
    Other(u32),
}

impl FieldTag {
    /// Interpret a numeric tag code.
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => FieldTag::Account,
            35 => FieldTag::MsgType,
            44 => FieldTag::Price,
            other => FieldTag::Other(other),
        }
    }

    /// The numeric tag code.
    #[inline]
    pub fn code(self) -> u32 {
        match self {
            FieldTag::Account => 1,
            FieldTag::MsgType => 35,
            FieldTag::Price => 44,
            FieldTag::Other(code) => code,
        }
    }
}

/// Result of feeding one field to the [`MessageAccumulator`](crate::MessageAccumulator).
///
/// Exactly one of `Order`, `Purge`, or `DuplicateField` is produced per
/// message; `Pending` is produced for every field that does not end its
/// message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Mid-message; nothing to report yet.
    Pending,
    /// A complete order-placement message was recognized at the boundary.
    Order {
        /// Captured account identifier
        account: String,
        /// Captured order price
        price: Decimal,
    },
    /// Boundary reached without a usable order; discarded silently.
    Purge,
    /// A tag appeared twice within one message; the rest of the message
    /// was discarded and its raw bytes await the diagnostic dump.
    DuplicateField,
}

impl Outcome {
    /// True if this outcome ends a message (anything but `Pending`).
    #[inline]
    pub fn is_boundary(&self) -> bool {
        !matches!(self, Outcome::Pending)
    }
}

/// High/low price statistic for a single account.
///
/// Both bounds start unset and are folded in with [`AccountStat::update`];
/// a single accepted order is both the high and the low.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStat {
    /// Highest accepted order price
    pub high: Option<Decimal>,
    /// Lowest accepted order price
    pub low: Option<Decimal>,
}

impl AccountStat {
    /// Create an empty statistic.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one accepted price into the statistic.
    #[inline]
    pub fn update(&mut self, price: Decimal) {
        match self.high {
            Some(high) if high >= price => {}
            _ => self.high = Some(price),
        }
        match self.low {
            Some(low) if low <= price => {}
            _ => self.low = Some(price),
        }
    }

    /// Merge another statistic into this one.
    pub fn merge(&mut self, other: &AccountStat) {
        if let Some(high) = other.high {
            match self.high {
                Some(h) if h >= high => {}
                _ => self.high = Some(high),
            }
        }
        if let Some(low) = other.low {
            match self.low {
                Some(l) if l <= low => {}
                _ => self.low = Some(low),
            }
        }
    }

    /// Check if any price has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.high.is_none() && self.low.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_field_tag_from_code() {
        assert_eq!(FieldTag::from_code(1), FieldTag::Account);
        assert_eq!(FieldTag::from_code(35), FieldTag::MsgType);
        assert_eq!(FieldTag::from_code(44), FieldTag::Price);
        assert_eq!(FieldTag::from_code(54), FieldTag::Other(54));
        assert_eq!(FieldTag::from_code(0), FieldTag::Other(0));
    }

    #[test]
    fn test_field_tag_code_round_trip() {
        for code in [1u32, 35, 44, 0, 8, 9999] {
            assert_eq!(FieldTag::from_code(code).code(), code);
        }
    }

    #[test]
    fn test_outcome_is_boundary() {
        assert!(!Outcome::Pending.is_boundary());
        assert!(Outcome::Purge.is_boundary());
        assert!(Outcome::DuplicateField.is_boundary());
        assert!(Outcome::Order {
            account: "ACME".to_string(),
            price: dec("10.5"),
        }
        .is_boundary());
    }

    #[test]
    fn test_account_stat_single_order() {
        let mut stat = AccountStat::new();
        assert!(stat.is_empty());

        stat.update(dec("10.5"));
        assert_eq!(stat.high, Some(dec("10.5")));
        assert_eq!(stat.low, Some(dec("10.5")));
    }

    #[test]
    fn test_account_stat_fold_order_independent() {
        let mut up = AccountStat::new();
        up.update(dec("10.5"));
        up.update(dec("12.0"));

        let mut down = AccountStat::new();
        down.update(dec("12.0"));
        down.update(dec("10.5"));

        assert_eq!(up, down);
        assert_eq!(up.high, Some(dec("12.0")));
        assert_eq!(up.low, Some(dec("10.5")));
    }

    #[test]
    fn test_account_stat_high_ge_low() {
        let mut stat = AccountStat::new();
        for s in ["3", "1.25", "7.5", "2"] {
            stat.update(dec(s));
        }
        assert!(stat.high.unwrap() >= stat.low.unwrap());
    }

    #[test]
    fn test_account_stat_merge() {
        let mut a = AccountStat::new();
        a.update(dec("5"));

        let mut b = AccountStat::new();
        b.update(dec("2"));
        b.update(dec("9"));

        a.merge(&b);
        assert_eq!(a.high, Some(dec("9")));
        assert_eq!(a.low, Some(dec("2")));

        let empty = AccountStat::new();
        a.merge(&empty);
        assert_eq!(a.high, Some(dec("9")));
    }
}
