//! Summary command - totals for the selected tax year

use super::{open_store, print_summary_table, selected_label, summary_lines, SummaryLine};
use crate::core::{filter_records, tax_year_labels, Label, Summary};
use clap::Args;
use serde::Serialize;
use std::path::Path;

#[derive(Args, Debug)]
pub struct SummaryCommand {
    /// Tax year to total ("All", or e.g. 2023/2024)
    #[arg(short, long)]
    year: Option<Label>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct SummaryOutput {
    tax_year: String,
    summary: Vec<SummaryLine>,
}

impl SummaryCommand {
    pub fn exec(&self, file: &Path) -> anyhow::Result<()> {
        let store = open_store(file);
        let labels = tax_year_labels(store.records());
        let label = selected_label(self.year, &labels);
        let summary = Summary::of(filter_records(store.records(), &label));

        if self.json {
            let output = SummaryOutput {
                tax_year: label.to_string(),
                summary: summary_lines(&summary),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!();
            println!("INCOME SUMMARY ({})", label);
            println!();
            print_summary_table(&summary);
        }
        Ok(())
    }
}
