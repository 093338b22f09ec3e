use super::record::Record;
use super::uk::{tax_year_end, tax_year_start};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub const ALL: &str = "All";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LabelError {
    #[error("invalid tax year label '{0}', expected 'All' or 'YYYY/YYYY'")]
    Invalid(String),
}

/// Tax year selector: everything, or the span 6 April `start` to 5 April `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    All,
    Span { start: i32, end: i32 },
}

impl Label {
    /// Inclusive date bounds of a span. `None` for `All`.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            Label::All => None,
            Label::Span { start, end } => Some((tax_year_start(start)?, tax_year_end(end)?)),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::All => write!(f, "{}", ALL),
            Label::Span { start, end } => write!(f, "{}/{}", start, end),
        }
    }
}

impl FromStr for Label {
    type Err = LabelError;

    /// Anything without a `/` selects everything.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some((start, end)) = s.split_once('/') else {
            return Ok(Label::All);
        };
        let invalid = || LabelError::Invalid(s.to_string());
        let start = start.trim().parse::<i32>().map_err(|_| invalid())?;
        let end = end.trim().parse::<i32>().map_err(|_| invalid())?;
        let label = Label::Span { start, end };
        if label.bounds().is_none() {
            return Err(invalid());
        }
        Ok(label)
    }
}

/// Selector options for a record set: `All`, then one label per pair of adjacent calendar years
/// that both appear in the data. A year with no records breaks the chain, so no label spans it.
pub fn tax_year_labels(records: &[Record]) -> Vec<Label> {
    let years: BTreeSet<i32> = records.iter().filter_map(|r| r.date.year()).collect();
    let years: Vec<i32> = years.into_iter().collect();

    let mut labels = vec![Label::All];
    labels.extend(
        years
            .windows(2)
            .filter(|pair| pair[1] == pair[0] + 1)
            .map(|pair| Label::Span {
                start: pair[0],
                end: pair[1],
            }),
    );
    log::debug!("Years {:?} give labels {:?}", years, labels);
    labels
}
