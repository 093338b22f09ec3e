pub mod add;
pub mod list;
pub mod schema;
pub mod summary;
pub mod years;

use crate::core::{Label, Summary};
use crate::store::RecordStore;
use schemars::JsonSchema;
use serde::Serialize;
use std::path::Path;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

/// Open the income file, reporting a failed load on stderr. The command carries on empty.
pub fn open_store(path: &Path) -> RecordStore {
    let store = RecordStore::open(path);
    if let Some(notice) = store.notice() {
        eprintln!("Error: {}", notice);
    }
    store
}

/// Resolve the `--year` selector against the labels present in the data
pub fn selected_label(year: Option<Label>, labels: &[Label]) -> Label {
    let label = year.unwrap_or(Label::All);
    if !labels.contains(&label) {
        log::warn!(
            "{} is not one of the available tax years ({})",
            label,
            join_labels(labels)
        );
    }
    label
}

pub fn join_labels(labels: &[Label]) -> String {
    labels
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Summary line for JSON output
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SummaryLine {
    pub label: String,
    pub value: String,
}

pub fn summary_lines(summary: &Summary) -> Vec<SummaryLine> {
    summary
        .rows()
        .into_iter()
        .map(|row| SummaryLine {
            label: row.label.to_string(),
            value: row.value,
        })
        .collect()
}

#[derive(Tabled)]
struct SummaryTableRow {
    #[tabled(rename = "Summary")]
    label: &'static str,
    #[tabled(rename = "Amount")]
    value: String,
}

pub fn print_summary_table(summary: &Summary) {
    let rows: Vec<SummaryTableRow> = summary
        .rows()
        .into_iter()
        .map(|row| SummaryTableRow {
            label: row.label,
            value: row.value,
        })
        .collect();
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
}
