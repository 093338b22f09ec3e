use chrono::{Datelike, NaiveDate};

/// UK Tax Year (runs 6 April to 5 April)
/// The year value represents the end year (e.g., 2025 = 2024/2025 tax year)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaxYear(pub i32);

impl TaxYear {
    /// Create a tax year from a date
    pub fn from_date(date: NaiveDate) -> Self {
        let year = date.year();
        if (date.month(), date.day()) >= (4, 6) {
            TaxYear(year + 1)
        } else {
            TaxYear(year)
        }
    }
}

impl std::fmt::Display for TaxYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.0 - 1, self.0)
    }
}

/// 6 April of `year`, or `None` when the year is outside chrono's range.
pub fn tax_year_start(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 4, 6)
}

/// 5 April of `year`, or `None` when the year is outside chrono's range.
pub fn tax_year_end(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 4, 5)
}
