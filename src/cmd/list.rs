//! List command - income records for a tax year with a running total

use super::{join_labels, open_store, print_summary_table, selected_label, summary_lines, SummaryLine};
use crate::core::{filter_records, format_amount, tax_year_labels, Label, Record, Summary, TaxYear};
use crate::store::write_records;
use clap::Args;
use schemars::JsonSchema;
use serde::Serialize;
use std::io;
use std::path::Path;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct ListCommand {
    /// Tax year to show ("All", or e.g. 2023/2024)
    #[arg(short, long)]
    year: Option<Label>,

    /// Output as CSV instead of formatted table
    #[arg(long, conflicts_with = "json")]
    csv: bool,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

/// Row for the records table
#[derive(Debug, Clone, Tabled)]
pub struct RecordRow {
    #[tabled(rename = "#")]
    pub row_num: usize,

    #[tabled(rename = "Amount")]
    pub amount: String,

    #[tabled(rename = "Date")]
    pub date: String,

    #[tabled(rename = "Source")]
    pub source: String,

    #[tabled(rename = "Tax Year")]
    pub tax_year: String,
}

/// JSON output of the list command
#[derive(Debug, Serialize, JsonSchema)]
pub struct ListOutput {
    /// Selected tax year label
    pub tax_year: String,
    /// Tax year labels available for this file
    pub labels: Vec<String>,
    pub records: Vec<RecordOutput>,
    pub summary: Vec<SummaryLine>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct RecordOutput {
    /// Exact decimal amount, or the text found in the file when it is not a number
    pub amount: String,
    pub amount_valid: bool,
    /// ISO date, or the text found in the file when it is not a date
    pub date: String,
    pub date_valid: bool,
    pub source: String,
    /// Tax year containing the date, e.g. 2024/2025
    pub tax_year: Option<String>,
}

impl From<&Record> for RecordOutput {
    fn from(record: &Record) -> Self {
        let valid = record.date.valid();
        RecordOutput {
            amount: record.amount.to_stored(),
            amount_valid: record.amount.valid().is_some(),
            date: valid
                .map(|d| d.to_string())
                .unwrap_or_else(|| record.date.to_stored()),
            date_valid: valid.is_some(),
            source: record.source.clone(),
            tax_year: valid.map(|d| TaxYear::from_date(d).to_string()),
        }
    }
}

impl ListCommand {
    pub fn exec(&self, file: &Path) -> anyhow::Result<()> {
        let store = open_store(file);
        let labels = tax_year_labels(store.records());
        let label = selected_label(self.year, &labels);
        let selected = filter_records(store.records(), &label);
        let summary = Summary::of(selected.iter().copied());

        if self.csv {
            let records: Vec<Record> = selected.into_iter().cloned().collect();
            write_records(&records, io::stdout())?;
        } else if self.json {
            let output = ListOutput {
                tax_year: label.to_string(),
                labels: labels.iter().map(ToString::to_string).collect(),
                records: selected.iter().map(|r| RecordOutput::from(*r)).collect(),
                summary: summary_lines(&summary),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            print_table(&selected);
            print_summary_table(&summary);
            println!("Tax years: {} (showing {})", join_labels(&labels), label);
        }
        Ok(())
    }
}

fn print_table(records: &[&Record]) {
    if records.is_empty() {
        println!("No income recorded for this selection");
        return;
    }

    let rows: Vec<RecordRow> = records
        .iter()
        .enumerate()
        .map(|(i, r)| RecordRow {
            row_num: i + 1,
            amount: format_amount(&r.amount),
            date: r.date.to_string(),
            source: r.source.clone(),
            tax_year: r
                .date
                .valid()
                .map(|d| TaxYear::from_date(d).to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::one(1)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
}
