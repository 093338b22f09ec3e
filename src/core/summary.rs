use super::record::{Record, RecordAmount};
use rust_decimal::Decimal;

pub const TOTAL_INCOME: &str = "Total Income";
pub const ENTRIES: &str = "Entries";
/// Shown in place of a total that does not fit in a `Decimal`
pub const OUT_OF_RANGE: &str = "out of range";

/// Aggregates over a selection of records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    /// Sum of the valid amounts. Meaningless when `overflow` is set.
    pub total: Decimal,
    /// Every selected record, including those with an unparsed amount
    pub entries: usize,
    pub overflow: bool,
}

/// One labelled line of the summary table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub label: &'static str,
    pub value: String,
}

impl Summary {
    pub fn of<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut summary = Summary::default();
        for record in records {
            summary.entries += 1;
            let Some(amount) = record.amount.valid() else {
                continue;
            };
            match summary.total.checked_add(amount) {
                Some(total) => summary.total = total,
                None => summary.overflow = true,
            }
        }
        if summary.overflow {
            log::warn!(
                "Total of {} entries exceeds the largest representable amount",
                summary.entries
            );
        }
        summary
    }

    /// Total formatted as pounds, or `out of range` after an overflow
    pub fn total_gbp(&self) -> String {
        if self.overflow {
            OUT_OF_RANGE.to_string()
        } else {
            format_gbp(self.total)
        }
    }

    pub fn rows(&self) -> Vec<SummaryRow> {
        vec![
            SummaryRow {
                label: TOTAL_INCOME,
                value: self.total_gbp(),
            },
            SummaryRow {
                label: ENTRIES,
                value: self.entries.to_string(),
            },
        ]
    }
}

/// Format as pounds with thousands separators, e.g. `£1,234.50` or `-£5.00`
pub fn format_gbp(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let formatted = format!("{:.2}", rounded.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{}£{}.{}", sign, grouped, fraction)
}

/// Amount cell for display: pounds when valid, otherwise the raw text marked invalid
pub fn format_amount(amount: &RecordAmount) -> String {
    match amount {
        RecordAmount::Valid(amount) => format_gbp(*amount),
        RecordAmount::Invalid(raw) => format!("{} (invalid)", raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::filter_records;
    use crate::core::label::Label;
    use crate::core::record::{RecordAmount, RecordDate};
    use rust_decimal_macros::dec;

    fn record(amount: Decimal, date: &str) -> Record {
        Record::new(amount, RecordDate::parse_entry(date), "Client")
    }

    #[test]
    fn empty_selection_totals_zero() {
        let records: Vec<Record> = Vec::new();
        let summary = Summary::of(&records);
        assert_eq!(summary.total, Decimal::ZERO);
        assert_eq!(summary.entries, 0);
        assert_eq!(summary.rows()[0].value, "£0.00");
    }

    #[test]
    fn totals_amounts() {
        let records = vec![
            record(dec!(150.50), "2025-01-10"),
            record(dec!(49.50), "2025-02-10"),
        ];
        let summary = Summary::of(&records);
        assert_eq!(summary.total, dec!(200.00));
        assert_eq!(summary.entries, 2);
    }

    #[test]
    fn filtered_total_does_not_exceed_full_total() {
        let records = vec![
            record(dec!(100), "2023-05-01"),
            record(dec!(200), "2024-03-01"),
            record(dec!(300), "2024-06-01"),
        ];
        let full = Summary::of(&records);
        let selected = filter_records(
            &records,
            &Label::Span {
                start: 2023,
                end: 2024,
            },
        );
        let partial = Summary::of(selected);
        assert_eq!(partial.total, dec!(300));
        assert!(partial.total <= full.total);
    }

    #[test]
    fn rows_are_labelled() {
        let records = vec![record(dec!(150.50), "2025-01-10")];
        assert_eq!(
            Summary::of(&records).rows(),
            vec![
                SummaryRow {
                    label: "Total Income",
                    value: "£150.50".to_string()
                },
                SummaryRow {
                    label: "Entries",
                    value: "1".to_string()
                },
            ]
        );
    }

    #[test]
    fn unparsed_amounts_count_but_do_not_total() {
        let records = vec![
            record(dec!(100), "2023-05-01"),
            Record::new(
                RecordAmount::Invalid("£200".into()),
                RecordDate::parse_entry("2023-06-01"),
                "Client",
            ),
        ];
        let summary = Summary::of(&records);
        assert_eq!(summary.total, dec!(100));
        assert_eq!(summary.entries, 2);
        assert!(!summary.overflow);
    }

    #[test]
    fn overflowing_total_is_reported_not_panicked() {
        let records = vec![
            record(Decimal::MAX, "2023-05-01"),
            record(dec!(1), "2023-06-01"),
        ];
        let summary = Summary::of(&records);
        assert!(summary.overflow);
        assert_eq!(summary.entries, 2);
        assert_eq!(summary.rows()[0].value, "out of range");

        let largest = vec![record(Decimal::MAX, "2023-05-01")];
        let summary = Summary::of(&largest);
        assert!(!summary.overflow);
        assert_eq!(
            summary.total_gbp(),
            "£79,228,162,514,264,337,593,543,950,335.00"
        );
    }

    #[test]
    fn amount_cells() {
        assert_eq!(format_amount(&RecordAmount::Valid(dec!(1234.5))), "£1,234.50");
        assert_eq!(
            format_amount(&RecordAmount::Invalid("£200".into())),
            "£200 (invalid)"
        );
    }

    #[test]
    fn gbp_formatting() {
        assert_eq!(format_gbp(dec!(0)), "£0.00");
        assert_eq!(format_gbp(dec!(5)), "£5.00");
        assert_eq!(format_gbp(dec!(999.999)), "£1,000.00");
        assert_eq!(format_gbp(dec!(1234.5)), "£1,234.50");
        assert_eq!(format_gbp(dec!(35096)), "£35,096.00");
        assert_eq!(format_gbp(dec!(1234567.891)), "£1,234,567.89");
        assert_eq!(format_gbp(dec!(-5)), "-£5.00");
        assert_eq!(format_gbp(dec!(-0.001)), "£0.00");
    }
}
