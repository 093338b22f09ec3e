use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// On-disk date format (DD/MM/YY)
pub const DISK_DATE_FORMAT: &str = "%d/%m/%y";
/// Date format accepted when adding an entry
pub const ENTRY_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EntryError {
    #[error("Please fill in all fields ({0} is empty).")]
    MissingField(&'static str),
    #[error("Amount must be a number: '{0}'")]
    InvalidAmount(String),
    #[error("Amount is out of range: '{0}'")]
    AmountOutOfRange(String),
}

/// Why an amount failed to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountError {
    NotANumber,
    /// Numeric text too large or too precise for a `Decimal`
    OutOfRange,
}

/// Date of an income record. Unparseable text is kept as-is so it can be written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordDate {
    Valid(NaiveDate),
    Invalid(String),
}

impl RecordDate {
    /// Parse a date read from the CSV file.
    ///
    /// `DD/MM/YY` is the stored format; ISO dates are accepted as a fallback for files written
    /// by hand or by older versions.
    pub fn parse_stored(s: &str) -> Self {
        let s = s.trim();
        NaiveDate::parse_from_str(s, DISK_DATE_FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(s, ENTRY_DATE_FORMAT))
            .map(RecordDate::Valid)
            .unwrap_or_else(|_| RecordDate::Invalid(s.to_string()))
    }

    /// Parse a date typed into the add-entry form (`YYYY-MM-DD`).
    pub fn parse_entry(s: &str) -> Self {
        let s = s.trim();
        NaiveDate::parse_from_str(s, ENTRY_DATE_FORMAT)
            .map(RecordDate::Valid)
            .unwrap_or_else(|_| RecordDate::Invalid(s.to_string()))
    }

    pub fn valid(&self) -> Option<NaiveDate> {
        match self {
            RecordDate::Valid(date) => Some(*date),
            RecordDate::Invalid(_) => None,
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.valid().map(|d| d.year())
    }

    /// Text written to the CSV file
    pub fn to_stored(&self) -> String {
        match self {
            RecordDate::Valid(date) => date.format(DISK_DATE_FORMAT).to_string(),
            RecordDate::Invalid(raw) => raw.clone(),
        }
    }
}

impl fmt::Display for RecordDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordDate::Valid(date) => write!(f, "{}", date.format(ENTRY_DATE_FORMAT)),
            RecordDate::Invalid(raw) => write!(f, "{} (invalid)", raw),
        }
    }
}

/// Amount of an income record. Text that is not a usable number is kept so it can be written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordAmount {
    Valid(Decimal),
    Invalid(String),
}

impl RecordAmount {
    /// Parse an amount read from the CSV file.
    pub fn parse_stored(s: &str) -> Self {
        let s = s.trim();
        parse_amount(s)
            .map(RecordAmount::Valid)
            .unwrap_or_else(|_| RecordAmount::Invalid(s.to_string()))
    }

    pub fn valid(&self) -> Option<Decimal> {
        match self {
            RecordAmount::Valid(amount) => Some(*amount),
            RecordAmount::Invalid(_) => None,
        }
    }

    /// Text written to the CSV file
    pub fn to_stored(&self) -> String {
        match self {
            RecordAmount::Valid(amount) => amount.to_string(),
            RecordAmount::Invalid(raw) => raw.clone(),
        }
    }
}

impl From<Decimal> for RecordAmount {
    fn from(amount: Decimal) -> Self {
        RecordAmount::Valid(amount)
    }
}

/// A single income entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub amount: RecordAmount,
    pub date: RecordDate,
    pub source: String,
}

impl Record {
    pub fn new(
        amount: impl Into<RecordAmount>,
        date: RecordDate,
        source: impl Into<String>,
    ) -> Self {
        Record {
            amount: amount.into(),
            date,
            source: source.into(),
        }
    }
}

/// Parse an amount, accepting plain decimals ("150.50") and scientific notation ("1.5e2")
pub fn parse_amount(s: &str) -> Result<Decimal, AmountError> {
    let s = s.trim();
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|_| {
            if is_numeric(s) {
                AmountError::OutOfRange
            } else {
                AmountError::NotANumber
            }
        })
}

// Digits with an optional sign, point and exponent, e.g. "1e30" or "123456789012345678901234567890"
fn is_numeric(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
        && s
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'))
        && s.parse::<f64>().is_ok()
}

/// Raw add-entry form input
#[derive(Debug, Clone)]
pub struct NewEntry<'a> {
    pub amount: &'a str,
    pub date: &'a str,
    pub source: &'a str,
}

impl NewEntry<'_> {
    /// Validate the form: every field non-empty and the amount numeric.
    pub fn validate(&self) -> Result<Record, EntryError> {
        let amount = self.amount.trim();
        let date = self.date.trim();
        let source = self.source.trim();

        for (name, value) in [("Amount", amount), ("Date", date), ("Source", source)] {
            if value.is_empty() {
                return Err(EntryError::MissingField(name));
            }
        }

        let amount = parse_amount(amount).map_err(|err| match err {
            AmountError::NotANumber => EntryError::InvalidAmount(amount.to_string()),
            AmountError::OutOfRange => EntryError::AmountOutOfRange(amount.to_string()),
        })?;
        let date = RecordDate::parse_entry(date);
        if let RecordDate::Invalid(raw) = &date {
            log::warn!("Date '{}' is not YYYY-MM-DD, storing it as invalid", raw);
        }

        Ok(Record::new(amount, date, source))
    }
}
