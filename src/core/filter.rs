use super::label::Label;
use super::record::Record;

/// Records falling in the selected tax year, in their original order.
///
/// `All` returns every record. A span keeps records dated between 6 April of its start year and
/// 5 April of its end year inclusive; records with an invalid date never match a span.
pub fn filter_records<'a>(records: &'a [Record], label: &Label) -> Vec<&'a Record> {
    let Some((start, end)) = label.bounds() else {
        return records.iter().collect();
    };

    let selected: Vec<&Record> = records
        .iter()
        .filter(|r| r.date.valid().is_some_and(|d| start <= d && d <= end))
        .collect();
    log::debug!(
        "{}: {} of {} records between {} and {}",
        label,
        selected.len(),
        records.len(),
        start,
        end
    );
    selected
}
