//! sheetcast - worksheet ranges as rows, records, or typed structs
//!
//! This library reads tabular data out of one worksheet and hands it back in
//! the shape the caller wants:
//!
//! - raw rows: `Vec<Vec<CellValue>>`
//! - keyed records: header-keyed ordered maps, one per data row
//! - typed records: any `T: Deserialize`, fields matched to header keys
//!
//! Workbook parsing is calamine's job; sheetcast works on the materialized
//! grid and adds range clamping, empty-row skipping, cell trimming, header
//! aliasing and record conversion on top.
//!
//! # Example
//!
//! ```no_run
//! use serde::Deserialize;
//! use sheetcast::SheetReader;
//!
//! #[derive(Debug, Deserialize)]
//! struct Person {
//!     name: String,
//!     age: f64,
//! }
//!
//! let reader = SheetReader::from_path("people.xlsx", "Sheet1")?
//!     .ignore_empty_row(true)
//!     .add_header_alias("Name", "name")
//!     .add_header_alias("Age", "age");
//!
//! let people: Vec<Person> = reader.read_all_as()?;
//! println!("{} people", people.len());
//! # Ok::<(), sheetcast::SheetError>(())
//! ```

pub mod error;
pub mod reader;
pub mod value;
pub mod workbook;

// Re-export commonly used types
pub use error::{SheetError, SheetResult};
pub use reader::{KeyedRecord, SheetReader};
pub use value::CellValue;
pub use workbook::{load_sheet, load_sheet_from_reader, SheetSelector};
