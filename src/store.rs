//! CSV-backed record store

use crate::core::record::{Record, RecordAmount, RecordDate};
use incometrack_derive::CsvSchema;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{} does not exist", .0.display())]
    MissingFile(PathBuf),
    #[error("{path} has incorrect columns (missing: {})", .missing.join(", "))]
    Schema { path: String, missing: Vec<String> },
    #[error("refusing to overwrite {path}: {reason}")]
    NotWritable { path: String, reason: String },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Column description produced by `#[derive(CsvSchema)]`
#[derive(Debug, Clone, Copy)]
pub struct CsvField {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// One row of the income file
#[derive(Debug, Clone, Serialize, CsvSchema)]
pub struct CsvRecord {
    /// Income amount in GBP (e.g. 150.50)
    #[serde(rename = "Amount")]
    pub amount: String,
    /// Date received, DD/MM/YY
    #[serde(rename = "Date")]
    pub date: String,
    /// Who paid (client, platform, employer)
    #[serde(rename = "Source")]
    pub source: String,
}

impl From<&Record> for CsvRecord {
    fn from(record: &Record) -> Self {
        CsvRecord {
            amount: record.amount.to_stored(),
            date: record.date.to_stored(),
            source: record.source.clone(),
        }
    }
}

/// Read income rows from CSV. `name` identifies the source in errors.
pub fn read_records<R: Read>(reader: R, name: &str) -> Result<Vec<Record>, StoreError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Ok(Vec::new());
    }
    // extra columns are ignored
    let position = |column: &str| headers.iter().position(|h| h == column);
    let (amount_col, date_col, source_col) =
        match (position("Amount"), position("Date"), position("Source")) {
            (Some(amount), Some(date), Some(source)) => (amount, date, source),
            _ => {
                let missing = CsvRecord::csv_header()
                    .into_iter()
                    .filter(|column| position(*column).is_none())
                    .map(String::from)
                    .collect();
                return Err(StoreError::Schema {
                    path: name.to_string(),
                    missing,
                });
            }
        };

    let mut records = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        // header is line 1
        let line = i + 2;
        let row = result?;
        // short rows keep what they have, missing cells read as empty
        let cell = |col: usize| row.get(col).unwrap_or("");

        let amount = RecordAmount::parse_stored(cell(amount_col));
        if let RecordAmount::Invalid(raw) = &amount {
            log::warn!(
                "{}:{}: amount '{}' is not a number, leaving it out of totals",
                name,
                line,
                raw
            );
        }
        let date = RecordDate::parse_stored(cell(date_col));
        if let RecordDate::Invalid(raw) = &date {
            log::warn!("{}:{}: unrecognised date '{}'", name, line, raw);
        }
        records.push(Record::new(amount, date, cell(source_col)));
    }
    Ok(records)
}

/// Write income rows as CSV, header first even when there are no records.
pub fn write_records<W: Write>(records: &[Record], writer: W) -> Result<(), StoreError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(CsvRecord::csv_header())?;
    for record in records {
        wtr.serialize(CsvRecord::from(record))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Owns the in-memory income records and the file they came from
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    records: Vec<Record>,
    notice: Option<StoreError>,
}

impl RecordStore {
    /// Load records from `path`.
    pub fn load(path: &Path) -> Result<Vec<Record>, StoreError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::MissingFile(path.to_path_buf()))
            }
            Err(err) => return Err(err.into()),
        };
        read_records(BufReader::new(file), &path.display().to_string())
    }

    /// Open the store at `path`. Never fails: a missing file is an empty store, any other load
    /// error leaves the store empty with the error kept as a notice.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = RecordStore {
            path: path.into(),
            records: Vec::new(),
            notice: None,
        };
        store.reload();
        store
    }

    /// Re-read the file, replacing everything held in memory.
    pub fn reload(&mut self) {
        self.notice = None;
        match Self::load(&self.path) {
            Ok(records) => {
                log::info!(
                    "Read {} records from {}",
                    records.len(),
                    self.path.display()
                );
                self.replace(records);
            }
            Err(StoreError::MissingFile(path)) => {
                log::info!("{} does not exist yet, starting empty", path.display());
                self.replace(Vec::new());
            }
            Err(err) => {
                log::error!("Failed to load {}: {}", self.path.display(), err);
                self.replace(Vec::new());
                self.notice = Some(err);
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Load error to show the user, if the last load failed
    pub fn notice(&self) -> Option<&StoreError> {
        self.notice.as_ref()
    }

    pub fn append(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn replace(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    /// Append a record and persist. If the write fails the record is dropped again.
    pub fn add(&mut self, record: Record) -> Result<(), StoreError> {
        self.append(record);
        if let Err(err) = self.persist() {
            self.records.pop();
            return Err(err);
        }
        Ok(())
    }

    /// Write every record back to the file.
    ///
    /// Refused when the last load failed, so an unreadable file is never replaced by a
    /// partial one.
    pub fn persist(&self) -> Result<(), StoreError> {
        if let Some(notice) = &self.notice {
            return Err(StoreError::NotWritable {
                path: self.path.display().to_string(),
                reason: notice.to_string(),
            });
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        write_records(&self.records, BufWriter::new(file))?;
        log::info!(
            "Wrote {} records to {}",
            self.records.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn date(y: i32, m: u32, d: u32) -> RecordDate {
        RecordDate::Valid(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn reads_rows_and_ignores_extra_columns() {
        let csv = "Source,Amount,Notes,Date\nClient A,150.50,first,10/01/25\nClient B,20,,01/05/23\n";
        let records = read_records(csv.as_bytes(), "test.csv").unwrap();
        assert_eq!(
            records,
            vec![
                Record::new(dec!(150.50), date(2025, 1, 10), "Client A"),
                Record::new(dec!(20), date(2023, 5, 1), "Client B"),
            ]
        );
    }

    #[test]
    fn missing_columns_is_schema_error() {
        let csv = "Amount,When,Source\n10,01/05/23,Client\n";
        match read_records(csv.as_bytes(), "test.csv") {
            Err(StoreError::Schema { path, missing }) => {
                assert_eq!(path, "test.csv");
                assert_eq!(missing, vec!["Date".to_string()]);
            }
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn empty_and_header_only_files_load_empty() {
        assert!(read_records("".as_bytes(), "empty.csv").unwrap().is_empty());
        assert!(read_records("Amount,Date,Source\n".as_bytes(), "header.csv")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn malformed_cells_are_kept_as_text() {
        let csv = "Amount,Date,Source\n10,not a date,Client A\nabc,01/05/23,Client B\n,01/05/23,Client C\n5,01/05/23\n";
        let records = read_records(csv.as_bytes(), "test.csv").unwrap();
        assert_eq!(
            records,
            vec![
                Record::new(
                    dec!(10),
                    RecordDate::Invalid("not a date".to_string()),
                    "Client A"
                ),
                Record::new(
                    RecordAmount::Invalid("abc".to_string()),
                    date(2023, 5, 1),
                    "Client B"
                ),
                Record::new(
                    RecordAmount::Invalid(String::new()),
                    date(2023, 5, 1),
                    "Client C"
                ),
                Record::new(dec!(5), date(2023, 5, 1), ""),
            ]
        );
    }

    #[test]
    fn add_keeps_rows_with_unparsed_amounts() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("income.csv");
        fs::write(
            &path,
            "Amount,Date,Source\n100,01/05/23,Client A\n£200,01/06/23,Client B\n300,01/07/23\n",
        )
        .unwrap();

        let mut store = RecordStore::open(&path);
        assert!(store.notice().is_none());
        assert_eq!(store.records().len(), 3);

        store
            .add(Record::new(dec!(5), date(2025, 1, 10), "New"))
            .unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Amount,Date,Source\n100,01/05/23,Client A\n£200,01/06/23,Client B\n300,01/07/23,\n5,10/01/25,New\n"
        );
    }

    #[test]
    fn non_utf8_row_blocks_persist() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("income.csv");
        let mut contents = b"Amount,Date,Source\n100,01/05/23,Client A\n200,01/06/23,".to_vec();
        contents.extend_from_slice(&[0xff, 0xfe, b'\n']);
        fs::write(&path, &contents).unwrap();

        let mut store = RecordStore::open(&path);
        assert!(matches!(store.notice(), Some(StoreError::Csv(_))));
        assert!(matches!(
            store.add(Record::new(dec!(1), date(2025, 1, 1), "Client")),
            Err(StoreError::NotWritable { .. })
        ));
        assert_eq!(fs::read(&path).unwrap(), contents);
    }

    #[test]
    fn written_file_uses_short_dates_and_keeps_invalid_text() {
        let records = vec![
            Record::new(dec!(150.50), date(2025, 1, 10), "Client A"),
            Record::new(dec!(7), RecordDate::Invalid("sometime".into()), "Client B"),
            Record::new(
                RecordAmount::Invalid("1,000".into()),
                date(2025, 2, 1),
                "Client C",
            ),
        ];
        let mut out = Vec::new();
        write_records(&records, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Amount,Date,Source\n150.50,10/01/25,Client A\n7,sometime,Client B\n\"1,000\",01/02/25,Client C\n"
        );
    }

    #[test]
    fn empty_store_writes_header() {
        let mut out = Vec::new();
        write_records(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Amount,Date,Source\n");
    }

    #[test]
    fn missing_file_opens_empty_without_notice() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("income.csv");
        assert!(matches!(
            RecordStore::load(&path),
            Err(StoreError::MissingFile(_))
        ));

        let store = RecordStore::open(&path);
        assert!(store.records().is_empty());
        assert!(store.notice().is_none());
    }

    #[test]
    fn append_and_persist_then_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("income.csv");

        let mut store = RecordStore::open(&path);
        store.append(Record::new(dec!(150.50), date(2025, 1, 10), "Client A"));
        store.persist().unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Amount,Date,Source\n150.50,10/01/25,Client A\n"
        );

        let mut reopened = RecordStore::open(&path);
        assert_eq!(reopened.records(), store.records());

        reopened.replace(Vec::new());
        reopened.reload();
        assert_eq!(reopened.records().len(), 1);
    }

    #[test]
    fn schema_error_is_a_notice_and_blocks_persist() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("income.csv");
        fs::write(&path, "Value,Day\n10,01/05/23\n").unwrap();

        let mut store = RecordStore::open(&path);
        assert!(store.records().is_empty());
        assert!(matches!(store.notice(), Some(StoreError::Schema { .. })));

        assert!(matches!(
            store.add(Record::new(dec!(1), date(2025, 1, 1), "Client")),
            Err(StoreError::NotWritable { .. })
        ));
        assert!(store.records().is_empty());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Value,Day\n10,01/05/23\n"
        );
    }
}
