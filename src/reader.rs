//! Row, record and typed reads over one worksheet.

use std::collections::HashMap;
use std::io::{Read, Seek};
use std::path::Path;

use calamine::{Data, Range};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{SheetError, SheetResult};
use crate::value::CellValue;
use crate::workbook::{load_sheet, load_sheet_from_reader, SheetSelector};

/// Ordered header-to-value mapping for one data row.
///
/// Key order is header column order. A data row shorter than the header list
/// produces a record whose trailing keys are absent, not present-with-null.
pub type KeyedRecord = IndexMap<String, CellValue>;

/// Reads one worksheet as raw rows, keyed records or typed records.
///
/// The reader owns a fully materialized grid and no per-read state, so a
/// single instance can serve any number of reads over different ranges.
/// Configuration is fixed at construction through the builder methods;
/// changing it afterwards requires ownership, so a shared `&SheetReader` is
/// safe to read from anywhere.
///
/// # Example
///
/// ```no_run
/// use sheetcast::SheetReader;
///
/// let reader = SheetReader::from_path("people.xlsx", 0)?
///     .ignore_empty_row(true)
///     .trim_cell_value(true);
///
/// // Row 0 is the header, data starts at row 1.
/// for record in reader.read_all_keyed()? {
///     println!("{record:?}");
/// }
/// # Ok::<(), sheetcast::SheetError>(())
/// ```
#[derive(Debug)]
pub struct SheetReader {
    sheet: Range<Data>,
    ignore_empty_row: bool,
    trim_cell_value: bool,
    header_alias: HashMap<String, String>,
}

impl SheetReader {
    /// Wrap an already materialized worksheet grid.
    pub fn new(sheet: Range<Data>) -> Self {
        Self {
            sheet,
            ignore_empty_row: false,
            trim_cell_value: false,
            header_alias: HashMap::new(),
        }
    }

    /// Open a workbook file and read the worksheet picked by `selector`
    /// (zero-based index or name).
    pub fn from_path<P, S>(path: P, selector: S) -> SheetResult<Self>
    where
        P: AsRef<Path>,
        S: Into<SheetSelector>,
    {
        Ok(Self::new(load_sheet(path, selector)?))
    }

    /// Same as [`SheetReader::from_path`], from an in-memory byte stream.
    pub fn from_reader<RS, S>(rs: RS, selector: S) -> SheetResult<Self>
    where
        RS: Read + Seek + Clone,
        S: Into<SheetSelector>,
    {
        Ok(Self::new(load_sheet_from_reader(rs, selector)?))
    }

    /// Omit rows that extract to zero cells from every read variant.
    /// Defaults to false.
    pub fn ignore_empty_row(mut self, ignore: bool) -> Self {
        self.ignore_empty_row = ignore;
        self
    }

    /// Strip surrounding whitespace from string cells, both data values and
    /// header key sources. Defaults to false.
    pub fn trim_cell_value(mut self, trim: bool) -> Self {
        self.trim_cell_value = trim;
        self
    }

    /// Replace the header alias map. Headers without an entry keep their
    /// literal text as the record key.
    pub fn header_alias(mut self, alias: HashMap<String, String>) -> Self {
        self.header_alias = alias;
        self
    }

    /// Register one header alias.
    pub fn add_header_alias<H, A>(mut self, header: H, alias: A) -> Self
    where
        H: Into<String>,
        A: Into<String>,
    {
        self.header_alias.insert(header.into(), alias.into());
        self
    }

    /// Absolute index of the first row holding data, if any.
    pub fn first_row(&self) -> Option<u32> {
        self.sheet.start().map(|(row, _)| row)
    }

    /// Absolute index of the last row holding data, if any.
    pub fn last_row(&self) -> Option<u32> {
        self.sheet.end().map(|(row, _)| row)
    }

    /// Read every row of the sheet as raw cell values.
    pub fn read(&self) -> Vec<Vec<CellValue>> {
        self.read_range(0, u32::MAX)
    }

    /// Read rows `start_row..=end_row` as raw cell values.
    ///
    /// Both bounds are clamped into the sheet's actual row span, so an
    /// out-of-range request yields fewer rows, never an error; a range that
    /// is empty after clamping yields an empty vec.
    pub fn read_range(&self, start_row: u32, end_row: u32) -> Vec<Vec<CellValue>> {
        let Some((first_row, last_row)) = self.row_bounds() else {
            return Vec::new();
        };
        let start = start_row.max(first_row);
        let end = end_row.min(last_row);

        let mut rows = Vec::new();
        for i in start..=end {
            let cells = self.read_row(i);
            if !cells.is_empty() || !self.ignore_empty_row {
                rows.push(cells);
            }
        }
        debug!(start, end, rows = rows.len(), "read raw rows");
        rows
    }

    /// Read the whole sheet as keyed records: row 0 is the header, data
    /// starts at row 1.
    pub fn read_all_keyed(&self) -> SheetResult<Vec<KeyedRecord>> {
        self.read_keyed(0, 1, u32::MAX)
    }

    /// Read rows `start_row..=end_row` as keyed records, taking the record
    /// keys from `header_row`.
    ///
    /// The header row must lie within the sheet's actual row span or the read
    /// fails before any extraction; it never shows up as a data record, even
    /// when it falls inside `start_row..=end_row`. Headers are passed through
    /// the alias map; each data row is zipped with the headers positionally,
    /// so surplus values with no header are dropped and a short row leaves
    /// its trailing keys out of the record.
    pub fn read_keyed(
        &self,
        header_row: u32,
        start_row: u32,
        end_row: u32,
    ) -> SheetResult<Vec<KeyedRecord>> {
        let (first_row, last_row) = self.row_bounds().ok_or(SheetError::EmptySheet)?;
        if header_row < first_row {
            return Err(SheetError::HeaderRowBeforeFirst {
                header_row,
                first_row,
            });
        }
        if header_row > last_row {
            return Err(SheetError::HeaderRowAfterLast {
                header_row,
                last_row,
            });
        }
        let start = start_row.max(first_row);
        let end = end_row.min(last_row);

        let headers = self.alias_header(&self.read_row(header_row));

        let mut records = Vec::new();
        for i in start..=end {
            if i == header_row {
                continue;
            }
            let cells = self.read_row(i);
            if cells.is_empty() && self.ignore_empty_row {
                continue;
            }
            let record: KeyedRecord = headers.iter().cloned().zip(cells).collect();
            records.push(record);
        }
        debug!(
            header_row,
            start,
            end,
            records = records.len(),
            "read keyed records"
        );
        Ok(records)
    }

    /// Read the whole sheet as typed records: row 0 is the header, data
    /// starts at row 1.
    pub fn read_all_as<T: DeserializeOwned>(&self) -> SheetResult<Vec<T>> {
        self.read_as(0, 1, u32::MAX)
    }

    /// Read rows `start_row..=end_row` as instances of `T`, matching record
    /// keys to field names through serde.
    ///
    /// Matching is serde's exact-name matching; adjust it per field with
    /// `#[serde(rename)]` / `#[serde(alias)]`, or remap on the reader side
    /// with [`SheetReader::header_alias`]. A map-shaped `T` passes the
    /// records through without field matching. The first record that fails
    /// to convert aborts the whole read with
    /// [`SheetError::RecordConversion`] naming its position.
    pub fn read_as<T: DeserializeOwned>(
        &self,
        header_row: u32,
        start_row: u32,
        end_row: u32,
    ) -> SheetResult<Vec<T>> {
        let records = self.read_keyed(header_row, start_row, end_row)?;
        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| convert_record(index, record))
            .collect()
    }

    fn row_bounds(&self) -> Option<(u32, u32)> {
        match (self.sheet.start(), self.sheet.end()) {
            (Some((first, _)), Some((last, _))) => Some((first, last)),
            _ => None,
        }
    }

    /// Extract one row in column order, dropping trailing blanks so that a
    /// row past the grid or made only of blank cells reads as no cells at
    /// all. Interior blanks stay, keeping positional pairing intact.
    fn read_row(&self, row: u32) -> Vec<CellValue> {
        let (Some((_, first_col)), Some((_, last_col))) = (self.sheet.start(), self.sheet.end())
        else {
            return Vec::new();
        };
        let mut cells: Vec<CellValue> = (first_col..=last_col)
            .map(|col| {
                self.sheet
                    .get_value((row, col))
                    .map(|data| CellValue::from_data(data, self.trim_cell_value))
                    .unwrap_or(CellValue::Empty)
            })
            .collect();
        while cells.last().is_some_and(CellValue::is_empty) {
            cells.pop();
        }
        cells
    }

    /// Turn header cells into record keys, substituting configured aliases
    /// and falling back to the literal header text.
    fn alias_header(&self, header: &[CellValue]) -> Vec<String> {
        header
            .iter()
            .map(|cell| {
                let text = cell.to_string();
                match self.header_alias.get(&text) {
                    Some(alias) => alias.clone(),
                    None => text,
                }
            })
            .collect()
    }
}

fn convert_record<T: DeserializeOwned>(index: usize, record: KeyedRecord) -> SheetResult<T> {
    let value = serde_json::to_value(record).map_err(|e| SheetError::RecordConversion {
        index,
        message: e.to_string(),
    })?;
    serde_json::from_value(value).map_err(|e| SheetError::RecordConversion {
        index,
        message: e.to_string(),
    })
}
