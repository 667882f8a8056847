use thiserror::Error;

pub type SheetResult<T> = Result<T, SheetError>;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("worksheet not found: {selector}")]
    SheetNotFound { selector: String },

    #[error("header row {header_row} is lower than first row {first_row}")]
    HeaderRowBeforeFirst { header_row: u32, first_row: u32 },

    #[error("header row {header_row} is greater than last row {last_row}")]
    HeaderRowAfterLast { header_row: u32, last_row: u32 },

    #[error("sheet has no rows, cannot locate a header row")]
    EmptySheet,

    #[error("record {index} could not be converted: {message}")]
    RecordConversion { index: usize, message: String },
}
