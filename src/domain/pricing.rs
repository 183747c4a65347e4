// src/domain/pricing.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;

/// Identifier of a priced detail, kept as the text the spreadsheet showed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DetailId(String);

impl DetailId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value when writing the number back reproduces the id exactly,
    /// so `007` or `1e3` stay text.
    pub fn as_number(&self) -> Option<f64> {
        self.0
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite() && n.to_string() == self.0)
    }

    /// Name safe to use as a zip entry (no path separators).
    pub fn file_stem(&self) -> String {
        self.0.replace(['/', '\\'], "_")
    }
}

impl fmt::Display for DetailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One input line: a total price covering `[start_date, end_date)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub detail_id: DetailId,
    pub period_price: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// One output line, one calendar day of a period.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRow {
    pub detail_id: DetailId,
    pub date: NaiveDate,
    pub daily_price: Decimal,
    pub active: bool,
    pub min_duration: String,
    pub max_duration: String,
    pub arrival_allowed: bool,
}

/// All daily rows of one conversion, in input order then day order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpandedTable {
    rows: Vec<DailyRow>,
}

impl ExpandedTable {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
        }
    }

    pub fn extend(&mut self, rows: Vec<DailyRow>) {
        self.rows.extend(rows);
    }

    pub fn rows(&self) -> &[DailyRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all daily prices, `None` if it does not fit a `Decimal`.
    pub fn total_price(&self) -> Option<Decimal> {
        self.rows
            .iter()
            .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(r.daily_price))
    }

    /// Rows grouped by detail id. Groups come in first-seen order and keep
    /// the table order inside each group.
    pub fn group_by_detail(&self) -> Vec<(&DetailId, Vec<&DailyRow>)> {
        let mut index: HashMap<&DetailId, usize> = HashMap::new();
        let mut groups: Vec<(&DetailId, Vec<&DailyRow>)> = Vec::new();

        for row in &self.rows {
            match index.get(&row.detail_id) {
                Some(&i) => groups[i].1.push(row),
                None => {
                    index.insert(&row.detail_id, groups.len());
                    groups.push((&row.detail_id, vec![row]));
                }
            }
        }

        groups
    }
}

impl From<Vec<DailyRow>> for ExpandedTable {
    fn from(rows: Vec<DailyRow>) -> Self {
        Self { rows }
    }
}
