//! Thin pass-through to calamine's workbook opening.
//!
//! Opening and parsing workbook files is entirely calamine's job; this module
//! only resolves a sheet selector to a materialized [`Range`].

use std::io::{Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};

use crate::error::{SheetError, SheetResult};

/// Selects one worksheet out of a workbook, by zero-based index or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSelector {
    Index(usize),
    Name(String),
}

impl From<usize> for SheetSelector {
    fn from(index: usize) -> Self {
        SheetSelector::Index(index)
    }
}

impl From<&str> for SheetSelector {
    fn from(name: &str) -> Self {
        SheetSelector::Name(name.to_string())
    }
}

impl From<String> for SheetSelector {
    fn from(name: String) -> Self {
        SheetSelector::Name(name)
    }
}

/// Open a workbook file and materialize one worksheet as a cell grid.
///
/// The format (xlsx/xlsm/xlsb/xls/ods) is detected from the file itself.
pub fn load_sheet<P, S>(path: P, selector: S) -> SheetResult<Range<Data>>
where
    P: AsRef<Path>,
    S: Into<SheetSelector>,
{
    let mut workbook = open_workbook_auto(path)?;
    pick_range(&mut workbook, &selector.into())
}

/// Same as [`load_sheet`], reading the workbook out of an in-memory byte
/// stream instead of a file path. The stream must be `Clone` so calamine
/// can re-read it while probing the format.
pub fn load_sheet_from_reader<RS, S>(rs: RS, selector: S) -> SheetResult<Range<Data>>
where
    RS: Read + Seek + Clone,
    S: Into<SheetSelector>,
{
    let mut workbook = open_workbook_auto_from_rs(rs)?;
    pick_range(&mut workbook, &selector.into())
}

fn pick_range<RS: Read + Seek>(
    workbook: &mut Sheets<RS>,
    selector: &SheetSelector,
) -> SheetResult<Range<Data>> {
    let name = match selector {
        SheetSelector::Index(index) => workbook
            .sheet_names()
            .get(*index)
            .cloned()
            .ok_or_else(|| SheetError::SheetNotFound {
                selector: format!("index {index}"),
            })?,
        SheetSelector::Name(name) => {
            if !workbook.sheet_names().iter().any(|n| n == name) {
                return Err(SheetError::SheetNotFound {
                    selector: format!("name {name:?}"),
                });
            }
            name.clone()
        }
    };
    Ok(workbook.worksheet_range(&name)?)
}
