//! End-to-end reader tests over real .xlsx files.
//!
//! Fixtures are written with rust_xlsxwriter into a tempdir and read back
//! through the public API.

use std::fs::File;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rust_xlsxwriter::Workbook;
use serde::Deserialize;
use sheetcast::{CellValue, SheetError, SheetReader, SheetSelector};
use tempfile::TempDir;

/// Two sheets: "People" with a header row, two data rows separated by a
/// blank row, and "Notes" with a single cell.
fn write_people_fixture(dir: &Path) -> PathBuf {
    let path = dir.join("people.xlsx");
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name("People").unwrap();
    sheet.write_string(0, 0, "Name").unwrap();
    sheet.write_string(0, 1, "Age").unwrap();
    sheet.write_string(1, 0, "Bob").unwrap();
    sheet.write_number(1, 1, 30).unwrap();
    // Row 2 left blank on purpose
    sheet.write_string(3, 0, "Eve").unwrap();
    sheet.write_number(3, 1, 41).unwrap();

    let notes = workbook.add_worksheet();
    notes.set_name("Notes").unwrap();
    notes.write_string(0, 0, "  padded  ").unwrap();

    workbook.save(&path).unwrap();
    path
}

#[test]
fn test_open_sheet_by_name_and_by_index() {
    let dir = TempDir::new().unwrap();
    let path = write_people_fixture(dir.path());

    let by_name = SheetReader::from_path(&path, "People").unwrap();
    let by_index = SheetReader::from_path(&path, 0).unwrap();

    assert_eq!(by_name.read(), by_index.read());
    assert_eq!(by_name.read().len(), 4);
}

#[test]
fn test_open_missing_sheet_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_people_fixture(dir.path());

    let err = SheetReader::from_path(&path, "Nope").unwrap_err();
    assert!(matches!(err, SheetError::SheetNotFound { .. }));

    let err = SheetReader::from_path(&path, SheetSelector::Index(9)).unwrap_err();
    assert!(matches!(err, SheetError::SheetNotFound { .. }));
}

#[test]
fn test_open_from_byte_stream() {
    let dir = TempDir::new().unwrap();
    let path = write_people_fixture(dir.path());
    let bytes = std::fs::read(&path).unwrap();

    let reader = SheetReader::from_reader(Cursor::new(bytes), "People").unwrap();
    assert_eq!(reader.read().len(), 4);
}

#[test]
fn test_open_unreadable_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("not-a-workbook.xlsx");
    File::create(&path).unwrap();

    let err = SheetReader::from_path(&path, 0).unwrap_err();
    assert!(matches!(err, SheetError::Workbook(_)));
}

#[test]
fn test_raw_rows_with_and_without_empty_row_skipping() {
    let dir = TempDir::new().unwrap();
    let path = write_people_fixture(dir.path());

    let reader = SheetReader::from_path(&path, "People").unwrap();
    let rows = reader.read();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[2], Vec::<CellValue>::new());

    let reader = SheetReader::from_path(&path, "People")
        .unwrap()
        .ignore_empty_row(true);
    assert_eq!(reader.read().len(), 3);
}

#[test]
fn test_numbers_come_back_as_floats() {
    let dir = TempDir::new().unwrap();
    let path = write_people_fixture(dir.path());

    let reader = SheetReader::from_path(&path, "People").unwrap();
    let rows = reader.read();
    assert_eq!(rows[1][1], CellValue::Float(30.0));
}

#[test]
fn test_keyed_records_over_file() {
    let dir = TempDir::new().unwrap();
    let path = write_people_fixture(dir.path());

    let reader = SheetReader::from_path(&path, "People")
        .unwrap()
        .ignore_empty_row(true);
    let records = reader.read_all_keyed().unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0].get("Name"),
        Some(&CellValue::String("Bob".to_string()))
    );
    assert_eq!(records[1].get("Age"), Some(&CellValue::Float(41.0)));
}

#[test]
fn test_header_alias_applies_to_file_records() {
    let dir = TempDir::new().unwrap();
    let path = write_people_fixture(dir.path());

    let reader = SheetReader::from_path(&path, "People")
        .unwrap()
        .add_header_alias("Name", "full_name");
    let records = reader.read_all_keyed().unwrap();

    let keys: Vec<&String> = records[0].keys().collect();
    assert_eq!(keys, vec!["full_name", "Age"]);
}

#[test]
fn test_trimming_file_cells() {
    let dir = TempDir::new().unwrap();
    let path = write_people_fixture(dir.path());

    let reader = SheetReader::from_path(&path, "Notes").unwrap();
    assert_eq!(
        reader.read()[0][0],
        CellValue::String("  padded  ".to_string())
    );

    let reader = SheetReader::from_path(&path, "Notes")
        .unwrap()
        .trim_cell_value(true);
    assert_eq!(reader.read()[0][0], CellValue::String("padded".to_string()));
}

#[test]
fn test_header_row_out_of_range_over_file() {
    let dir = TempDir::new().unwrap();
    let path = write_people_fixture(dir.path());

    let reader = SheetReader::from_path(&path, "People").unwrap();
    let err = reader.read_keyed(10, 0, u32::MAX).unwrap_err();

    match err {
        SheetError::HeaderRowAfterLast {
            header_row,
            last_row,
        } => {
            assert_eq!(header_row, 10);
            assert_eq!(last_row, 3);
        }
        other => panic!("expected HeaderRowAfterLast, got {other:?}"),
    }
}

#[derive(Debug, Deserialize, PartialEq)]
struct Person {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Age")]
    age: f64,
}

#[test]
fn test_typed_records_over_file() {
    let dir = TempDir::new().unwrap();
    let path = write_people_fixture(dir.path());

    let reader = SheetReader::from_path(&path, "People")
        .unwrap()
        .ignore_empty_row(true);
    let people: Vec<Person> = reader.read_all_as().unwrap();

    assert_eq!(
        people,
        vec![
            Person {
                name: "Bob".to_string(),
                age: 30.0
            },
            Person {
                name: "Eve".to_string(),
                age: 41.0
            },
        ]
    );
}

#[test]
fn test_typed_records_without_empty_row_skipping_fail_on_blank_record() {
    let dir = TempDir::new().unwrap();
    let path = write_people_fixture(dir.path());

    // The blank row yields a keyless record, which cannot populate the
    // required fields of Person; the batch aborts there.
    let reader = SheetReader::from_path(&path, "People").unwrap();
    let err = reader.read_all_as::<Person>().unwrap_err();

    match err {
        SheetError::RecordConversion { index, .. } => assert_eq!(index, 1),
        other => panic!("expected RecordConversion, got {other:?}"),
    }
}
