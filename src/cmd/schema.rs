//! Schema command - print expected input formats

use super::list::ListOutput;
use crate::core::record::DISK_DATE_FORMAT;
use crate::store::CsvRecord;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema, csv-header or csv-fields
    #[arg(value_enum, default_value = "csv-fields")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for `list --json` output
    JsonSchema,
    /// CSV header row with column names
    CsvHeader,
    /// CSV column descriptions
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => {
                let schema = schema_for!(ListOutput);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::CsvHeader => println!("{}", CsvRecord::csv_header().join(",")),
            SchemaFormat::CsvFields => print_csv_fields(),
        }
        Ok(())
    }
}

fn print_csv_fields() {
    println!("CSV Input Format");
    println!("================");
    println!();
    for field in CsvRecord::csv_schema() {
        let req = if field.required { "required" } else { "optional" };
        println!("{:10} ({:8})  {}", field.name, req, field.description);
    }
    println!();
    println!("Dates are stored as {} (e.g. 10/01/25). Other columns are ignored.", DISK_DATE_FORMAT);
}
