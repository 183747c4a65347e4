use crate::domain::{expand, DailyRow, DetailId, ExpandedTable};
use crate::errors::{ResultResp, ServerError};
use calamine::{Data, Reader, Xlsx};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_xlsxwriter::Workbook;
use std::io::{Cursor, Read};
use std::str::FromStr;
use zip::ZipArchive;

/// A cell of a hand-built input workbook.
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Builds an xlsx upload with the given header and rows.
pub fn input_workbook(header: &[&str], rows: &[Vec<Cell>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in header.iter().enumerate() {
        worksheet.write_string(0, col as u16, *name).unwrap();
    }
    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(s) => worksheet.write_string(r, col as u16, *s).unwrap(),
                Cell::Number(n) => worksheet.write_number(r, col as u16, *n).unwrap(),
            };
        }
    }

    workbook.save_to_buffer().unwrap()
}

/// Standard upload: one row per (id, price, start, end).
pub fn price_upload(lines: &[(f64, &str, &str, &str)]) -> Vec<u8> {
    let rows: Vec<Vec<Cell>> = lines
        .iter()
        .map(|(id, price, start, end)| {
            vec![
                Cell::Number(*id),
                Cell::Text(*price),
                Cell::Text(*start),
                Cell::Text(*end),
            ]
        })
        .collect();
    input_workbook(&["iddetail", "prixperiode", "datedebut", "datefin"], &rows)
}

/// All rows (header included) of the first worksheet.
pub fn sheet_rows(bytes: &[u8]) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
    let name = workbook.sheet_names()[0].clone();
    let range = workbook.worksheet_range(&name).unwrap();
    range.rows().map(|r| r.to_vec()).collect()
}

/// Zip entries in archive order.
pub fn zip_entries(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).unwrap();
            let mut content = Vec::new();
            file.read_to_end(&mut content).unwrap();
            (file.name().to_string(), content)
        })
        .collect()
}

pub fn rows_for(id: &str, price: &str, start: &str, end: &str) -> Vec<DailyRow> {
    expand(dec(price), &DetailId::new(id), date(start), date(end)).unwrap()
}

/// `records` periods of `days` days each, ids "1", "2", ...
pub fn table_of(records: usize, days: i64) -> ExpandedTable {
    let start = date("2023-01-01");
    let mut table = ExpandedTable::default();
    for i in 0..records {
        let id = DetailId::new((i + 1).to_string());
        let end = start + chrono::Duration::days(days);
        table.extend(expand(dec("100.00"), &id, start, end).unwrap());
    }
    table
}

/// Unwraps a handler error without needing `Debug` on the response.
pub fn expect_err(result: ResultResp) -> ServerError {
    match result {
        Ok(resp) => panic!("expected an error, got status {}", resp.status()),
        Err(err) => err,
    }
}
