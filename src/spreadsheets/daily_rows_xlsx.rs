use crate::domain::DailyRow;
use crate::spreadsheets::ExportError;
use chrono::Datelike;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

pub const HEADERS: [&str; 7] = [
    "Id detail",
    "Date",
    "Tarif",
    "Actif",
    "Durée min",
    "Durée max",
    "Arrivée autorisée",
];

/// Writes daily rows into a single-sheet workbook and returns the xlsx bytes.
pub fn daily_rows_xlsx<'a, I>(rows: I) -> Result<Vec<u8>, ExportError>
where
    I: IntoIterator<Item = &'a DailyRow>,
{
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let price_format = Format::new().set_num_format("0.00");

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).map_err(|e| {
            ExportError::Xlsx(format!("Failed to write header '{}': {}", header, e))
        })?;
    }
    worksheet
        .set_column_width(1, 12)
        .map_err(|e| ExportError::Xlsx(format!("Failed to size date column: {}", e)))?;

    for (i, row) in rows.into_iter().enumerate() {
        let r = (i + 1) as u32;

        let written = match row.detail_id.as_number() {
            Some(n) => worksheet.write_number(r, 0, n),
            None => worksheet.write_string(r, 0, row.detail_id.as_str()),
        };
        written.map_err(|e| ExportError::Xlsx(format!("Failed to write detail id: {}", e)))?;

        let date = ExcelDateTime::from_ymd(
            row.date.year() as u16,
            row.date.month() as u8,
            row.date.day() as u8,
        )
        .map_err(|e| ExportError::Xlsx(format!("Invalid date {}: {}", row.date, e)))?;
        worksheet
            .write_datetime_with_format(r, 1, &date, &date_format)
            .map_err(|e| ExportError::Xlsx(format!("Failed to write date: {}", e)))?;

        let price = row.daily_price.to_f64().ok_or_else(|| {
            ExportError::Xlsx(format!("Price {} is out of range", row.daily_price))
        })?;
        worksheet
            .write_number_with_format(r, 2, price, &price_format)
            .map_err(|e| ExportError::Xlsx(format!("Failed to write price: {}", e)))?;

        worksheet
            .write_boolean(r, 3, row.active)
            .map_err(|e| ExportError::Xlsx(format!("Failed to write active flag: {}", e)))?;

        worksheet
            .write_string(r, 4, &row.min_duration)
            .map_err(|e| ExportError::Xlsx(format!("Failed to write min duration: {}", e)))?;

        worksheet
            .write_string(r, 5, &row.max_duration)
            .map_err(|e| ExportError::Xlsx(format!("Failed to write max duration: {}", e)))?;

        worksheet
            .write_boolean(r, 6, row.arrival_allowed)
            .map_err(|e| ExportError::Xlsx(format!("Failed to write arrival flag: {}", e)))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ExportError::Xlsx(format!("Failed to save workbook: {}", e)))
}
