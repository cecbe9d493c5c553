use std::fmt;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};

// ---------------------------------------------------------------------------
// RawRow – one row as read from the input file
// ---------------------------------------------------------------------------

/// A row before date parsing: the period label and the price, if numeric.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub period: String,
    pub price: Option<f64>,
}

impl RawRow {
    pub fn new(period: impl Into<String>, price: Option<f64>) -> Self {
        Self {
            period: period.into(),
            price,
        }
    }
}

// ---------------------------------------------------------------------------
// Period labels
// ---------------------------------------------------------------------------

/// Parse a monthly period label such as `2010M03` or `201003`.
///
/// Every `M` is stripped first, then the remainder must be exactly four year
/// digits followed by two month digits. Returns the first day of that month.
pub fn parse_period_label(label: &str) -> Option<NaiveDate> {
    let digits: String = label.trim().chars().filter(|&c| c != 'M').collect();
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = digits[..4].parse().ok()?;
    let month: u32 = digits[4..].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

// ---------------------------------------------------------------------------
// Observation – one monthly price
// ---------------------------------------------------------------------------

/// One row of the price table after date parsing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub price: f64,
    /// Calendar year of `date`.
    pub year: i32,
    /// Month of `date`, 1–12.
    pub month: u32,
}

impl Observation {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self {
            date,
            price,
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {:.2}", self.date.format("%Y-%m"), self.price)
    }
}

// ---------------------------------------------------------------------------
// PriceTable – the complete loaded table
// ---------------------------------------------------------------------------

/// All observations of one input file, in file order.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    pub observations: Vec<Observation>,
    /// Rows discarded because of an unparseable period or price.
    pub dropped: usize,
    /// File the table was read from, if any.
    pub source: Option<PathBuf>,
}

impl PriceTable {
    /// Parse raw rows, dropping those with an invalid period label or no price.
    pub fn from_rows(rows: Vec<RawRow>) -> Self {
        let total = rows.len();
        let observations: Vec<Observation> = rows
            .into_iter()
            .filter_map(|row| {
                let date = parse_period_label(&row.period)?;
                let price = row.price.filter(|p| p.is_finite())?;
                Some(Observation::new(date, price))
            })
            .collect();
        let dropped = total - observations.len();
        PriceTable {
            observations,
            dropped,
            source: None,
        }
    }

    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the table holds no observations.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Earliest and latest year present.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let first = self.observations.iter().map(|o| o.year).min()?;
        let last = self.observations.iter().map(|o| o.year).max()?;
        Some((first, last))
    }

    /// The first `n` observations, like a dataframe `head()`.
    pub fn head(&self, n: usize) -> &[Observation] {
        &self.observations[..n.min(self.observations.len())]
    }
}
