// ingest/workbook.rs

use crate::domain::{DetailId, PriceRecord};
use crate::ingest::cells;
use crate::ingest::IngestError;
use calamine::{Data, Range, Reader, Xlsx};
use rust_decimal::Decimal;
use std::io::Cursor;

pub const COL_DETAIL_ID: &str = "iddetail";
pub const COL_PERIOD_PRICE: &str = "prixperiode";
pub const COL_START_DATE: &str = "datedebut";
pub const COL_END_DATE: &str = "datefin";

pub const REQUIRED_COLUMNS: [&str; 4] = [
    COL_DETAIL_ID,
    COL_PERIOD_PRICE,
    COL_START_DATE,
    COL_END_DATE,
];

/// A parsed record with the spreadsheet row it came from (header is row 1).
#[derive(Debug, Clone, PartialEq)]
pub struct SourcedRecord {
    pub row: usize,
    pub record: PriceRecord,
}

/// Positions of the required columns in the header row.
struct ColumnMap {
    detail_id: usize,
    period_price: usize,
    start_date: usize,
    end_date: usize,
}

impl ColumnMap {
    fn from_header(header: &[Data]) -> Result<Self, IngestError> {
        let names: Vec<String> = header
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();
        let find = |wanted: &str| names.iter().position(|n| n == wanted);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .into_iter()
            .filter(|&c| find(c).is_none())
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(IngestError::MissingColumns(missing));
        }

        let position = |wanted: &str| find(wanted).ok_or(IngestError::EmptyWorkbook);
        Ok(Self {
            detail_id: position(COL_DETAIL_ID)?,
            period_price: position(COL_PERIOD_PRICE)?,
            start_date: position(COL_START_DATE)?,
            end_date: position(COL_END_DATE)?,
        })
    }
}

/// Opens an uploaded xlsx and returns the range of its first worksheet.
pub fn first_sheet(bytes: &[u8]) -> Result<Range<Data>, IngestError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e: calamine::XlsxError| IngestError::Workbook(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(IngestError::EmptyWorkbook)?;

    workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| IngestError::Workbook(e.to_string()))
}

/// Validates the header and parses every non-blank data row.
pub fn read_records(range: &Range<Data>) -> Result<Vec<SourcedRecord>, IngestError> {
    let mut rows = range.rows();
    let header = rows.next().ok_or(IngestError::EmptyWorkbook)?;
    let columns = ColumnMap::from_header(header)?;

    let mut records = Vec::with_capacity(range.height().saturating_sub(1));
    for (i, row_cells) in rows.enumerate() {
        if row_cells.iter().all(cells::is_blank) {
            continue;
        }
        // +2: one for the header, one for 1-based numbering.
        let row = i + 2;
        records.push(SourcedRecord {
            row,
            record: parse_row(row_cells, &columns, row)?,
        });
    }

    Ok(records)
}

fn parse_row(
    row_cells: &[Data],
    columns: &ColumnMap,
    row: usize,
) -> Result<PriceRecord, IngestError> {
    let detail_id = required(row_cells, columns.detail_id, COL_DETAIL_ID, row)
        .and_then(|c| convert(c, COL_DETAIL_ID, row, cells::detail_id_text))?;

    let period_price = required(row_cells, columns.period_price, COL_PERIOD_PRICE, row)
        .and_then(|c| convert(c, COL_PERIOD_PRICE, row, cells::price))?;
    if period_price < Decimal::ZERO {
        return Err(IngestError::NegativePrice {
            row,
            value: period_price.to_string(),
        });
    }
    if period_price > Decimal::from(cells::MAX_PERIOD_PRICE) {
        return Err(IngestError::PriceTooLarge {
            row,
            value: period_price.to_string(),
            max: cells::MAX_PERIOD_PRICE,
        });
    }

    let start_date = required(row_cells, columns.start_date, COL_START_DATE, row)
        .and_then(|c| convert(c, COL_START_DATE, row, cells::date))?;
    let end_date = required(row_cells, columns.end_date, COL_END_DATE, row)
        .and_then(|c| convert(c, COL_END_DATE, row, cells::date))?;

    Ok(PriceRecord {
        detail_id: DetailId::new(detail_id),
        period_price,
        start_date,
        end_date,
    })
}

fn required<'a>(
    row_cells: &'a [Data],
    index: usize,
    column: &'static str,
    row: usize,
) -> Result<&'a Data, IngestError> {
    row_cells
        .get(index)
        .filter(|c| !cells::is_blank(c))
        .ok_or(IngestError::EmptyCell { row, column })
}

fn convert<T>(
    cell: &Data,
    column: &'static str,
    row: usize,
    parse: impl Fn(&Data) -> Option<T>,
) -> Result<T, IngestError> {
    parse(cell).ok_or_else(|| IngestError::InvalidCell {
        row,
        column,
        value: cell.to_string(),
    })
}
