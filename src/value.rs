//! Owned cell values extracted from a worksheet grid.

use calamine::Data;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// A single extracted cell value.
///
/// Serializes untagged: `Empty` becomes null, scalars become themselves and
/// `DateTime` becomes an ISO 8601 string. This is what feeds the typed-record
/// path in [`crate::reader::SheetReader::read_as`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Convert one calamine cell into an owned value.
    ///
    /// `trim` removes surrounding whitespace from string cells only; every
    /// other variant passes through untouched. Date/duration cells already in
    /// ISO text form are kept as strings. Error cells (`#DIV/0!` and friends)
    /// read as blank, since formula evaluation is out of scope here.
    pub fn from_data(data: &Data, trim: bool) -> Self {
        match data {
            Data::Empty => CellValue::Empty,
            Data::Bool(b) => CellValue::Bool(*b),
            Data::Int(i) => CellValue::Int(*i),
            Data::Float(f) => CellValue::Float(*f),
            Data::String(s) => {
                if trim {
                    CellValue::String(s.trim().to_string())
                } else {
                    CellValue::String(s.clone())
                }
            }
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(naive) => CellValue::DateTime(naive),
                // Serial number outside the representable date span
                None => CellValue::Float(dt.as_f64()),
            },
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
            Data::Error(_) => CellValue::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

/// Deterministic stringification for every variant; used to turn header
/// cells into record keys. `Empty` renders as the empty string.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::String(s) => f.write_str(s),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
        }
    }
}
