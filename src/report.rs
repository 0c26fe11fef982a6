//! Final report rendering.
//!
//! The renderer is a thin collaborator at the end of the pipeline: it
//! receives the finished account → (high, low) mapping and formats it,
//! either as the fixed-width table or as JSON for machine consumption.

use std::io::Write;

use indexmap::IndexMap;

use crate::error::{FixError, Result};
use crate::types::AccountStat;

/// Layout for the fixed-width report table.
#[derive(Debug, Clone)]
pub struct ReportFormat {
    /// Title line printed above the table
    pub title: String,

    /// Width of the account column
    pub account_width: usize,

    /// Width of each price column
    pub price_width: usize,
}

impl Default for ReportFormat {
    fn default() -> Self {
        Self {
            title: "High/Low Report:".to_string(),
            account_width: 12,
            price_width: 8,
        }
    }
}

impl ReportFormat {
    /// Set the title line.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the account column width.
    pub fn with_account_width(mut self, width: usize) -> Self {
        self.account_width = width;
        self
    }

    /// Set the price column width.
    pub fn with_price_width(mut self, width: usize) -> Self {
        self.price_width = width;
        self
    }

    /// Render the table: title, header, dash rule, one left-aligned row
    /// per account in map order.
    pub fn render<W: Write>(
        &self,
        accounts: &IndexMap<String, AccountStat>,
        out: &mut W,
    ) -> Result<()> {
        let aw = self.account_width;
        let pw = self.price_width;

        writeln!(out, "{}", self.title)?;
        writeln!(out, "{:<aw$}{:<pw$}Low", "Account", "High")?;
        writeln!(out, "{:-<1$}", "", aw + 2 * pw)?;

        for (account, stat) in accounts {
            if let (Some(high), Some(low)) = (stat.high, stat.low) {
                writeln!(out, "{account:<aw$}{:<pw$}{low}", high.to_string())?;
            }
        }

        out.flush()?;
        Ok(())
    }
}

/// Render the mapping as pretty-printed JSON.
pub fn render_json<W: Write>(accounts: &IndexMap<String, AccountStat>, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, accounts)
        .map_err(|e| FixError::generic(format!("JSON export failed: {e}")))?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn sample() -> IndexMap<String, AccountStat> {
        let mut accounts = IndexMap::new();
        let mut acme = AccountStat::new();
        acme.update(Decimal::from_str("10.5").unwrap());
        acme.update(Decimal::from_str("12.0").unwrap());
        accounts.insert("ACME".to_string(), acme);

        let mut foo = AccountStat::new();
        foo.update(Decimal::from_str("5").unwrap());
        accounts.insert("FOO".to_string(), foo);
        accounts
    }

    #[test]
    fn test_render_table() {
        let mut out = Vec::new();
        ReportFormat::default().render(&sample(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "High/Low Report:");
        assert_eq!(lines[1], "Account     High    Low");
        assert_eq!(lines[2], "----------------------------");
        assert_eq!(lines[3], "ACME        12.0    10.5");
        assert_eq!(lines[4], "FOO         5       5");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_render_empty_mapping() {
        let mut out = Vec::new();
        ReportFormat::default()
            .render(&IndexMap::new(), &mut out)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        // Header and rule only, no rows.
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_custom_widths() {
        let format = ReportFormat::default()
            .with_account_width(6)
            .with_price_width(5)
            .with_title("HL");

        let mut out = Vec::new();
        format.render(&sample(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "HL");
        assert_eq!(lines[1], "AccountHigh Low");
        assert_eq!(lines[2], "----------------");
    }

    #[test]
    fn test_render_json() {
        let mut out = Vec::new();
        render_json(&sample(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"ACME\""));
        assert!(text.contains("\"12.0\""));
        assert!(text.contains("\"10.5\""));
        assert!(text.ends_with('\n'));
    }
}
