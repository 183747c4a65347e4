mod cells;
mod ingest_error;
mod workbook;

pub use ingest_error::IngestError;
pub use workbook::{first_sheet, read_records, SourcedRecord, REQUIRED_COLUMNS};

use crate::domain::{expand_all, ExpandedTable, PriceRecord};

/// Reads an uploaded workbook and expands every record into daily rows.
///
/// Fails fast: a missing column, an unreadable cell or a bad date range
/// aborts the whole conversion.
pub fn convert_input_to_table(bytes: &[u8]) -> Result<ExpandedTable, IngestError> {
    let range = first_sheet(bytes)?;
    let sourced = read_records(&range)?;
    tracing::debug!(records = sourced.len(), "parsed input workbook");

    let records: Vec<PriceRecord> = sourced.iter().map(|s| s.record.clone()).collect();
    let table = expand_all(&records).map_err(|(i, source)| IngestError::Expand {
        row: sourced[i].row,
        source,
    })?;

    tracing::info!(
        records = records.len(),
        daily_rows = table.len(),
        "expanded period prices"
    );
    Ok(table)
}
