use crate::domain::ExpandError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("could not read workbook: {0}")]
    Workbook(String),

    #[error("workbook has no worksheet or no header row")]
    EmptyWorkbook,

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("row {row}: column '{column}' is empty")]
    EmptyCell { row: usize, column: &'static str },

    #[error("row {row}: column '{column}' has an unreadable value '{value}'")]
    InvalidCell {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: period price {value} is negative")]
    NegativePrice { row: usize, value: String },

    #[error("row {row}: period price {value} is above the {max} limit")]
    PriceTooLarge { row: usize, value: String, max: i64 },

    #[error("row {row}: {source}")]
    Expand {
        row: usize,
        #[source]
        source: ExpandError,
    },
}
