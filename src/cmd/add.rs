//! Add command - record a new income entry and save the file

use super::{open_store, print_summary_table};
use crate::core::record::ENTRY_DATE_FORMAT;
use crate::core::{format_amount, NewEntry, Summary};
use chrono::Local;
use clap::Args;
use std::path::Path;

#[derive(Args, Debug)]
pub struct AddCommand {
    /// Amount received (e.g. 150.50)
    #[arg(short, long, allow_hyphen_values = true)]
    amount: String,

    /// Date received, YYYY-MM-DD (defaults to today)
    #[arg(short, long)]
    date: Option<String>,

    /// Who paid (client, platform, employer)
    #[arg(short, long)]
    source: String,
}

impl AddCommand {
    pub fn exec(&self, file: &Path) -> anyhow::Result<()> {
        let today = Local::now().date_naive().format(ENTRY_DATE_FORMAT).to_string();
        let entry = NewEntry {
            amount: &self.amount,
            date: self.date.as_deref().unwrap_or(&today),
            source: &self.source,
        };
        // validate before touching the file
        let record = entry.validate()?;

        let mut store = open_store(file);
        let message = format!(
            "Added {} from {} on {}",
            format_amount(&record.amount),
            record.source,
            record.date
        );
        store.add(record)?;

        println!("{} (saved to {})", message, store.path().display());
        print_summary_table(&Summary::of(store.records()));
        Ok(())
    }
}
