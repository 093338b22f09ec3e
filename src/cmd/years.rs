//! Years command - the tax year labels available for the income file

use super::open_store;
use crate::core::{filter_records, tax_year_labels, Record, Summary};
use crate::core::summary::OUT_OF_RANGE;
use clap::Args;
use serde::Serialize;
use std::path::Path;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct YearsCommand {
    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct YearRow {
    #[tabled(rename = "Tax Year")]
    label: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Entries")]
    entries: usize,
    #[tabled(rename = "Total")]
    total: String,
}

impl YearsCommand {
    pub fn exec(&self, file: &Path) -> anyhow::Result<()> {
        let store = open_store(file);
        let rows = year_rows(store.records(), self.json);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            let table = Table::new(rows)
                .with(Style::rounded())
                .with(Modify::new(Columns::new(3..)).with(Alignment::right()))
                .to_string();
            println!("{}", table);
        }
        Ok(())
    }
}

fn year_rows(records: &[Record], json: bool) -> Vec<YearRow> {
    tax_year_labels(records)
        .into_iter()
        .map(|label| {
            let summary = Summary::of(filter_records(records, &label));
            let (from, to) = match label.bounds() {
                Some((start, end)) => (start.to_string(), end.to_string()),
                None if json => (String::new(), String::new()),
                None => ("-".to_string(), "-".to_string()),
            };
            YearRow {
                label: label.to_string(),
                from,
                to,
                entries: summary.entries,
                total: if !json {
                    summary.total_gbp()
                } else if summary.overflow {
                    OUT_OF_RANGE.to_string()
                } else {
                    format!("{:.2}", summary.total)
                },
            }
        })
        .collect()
}
