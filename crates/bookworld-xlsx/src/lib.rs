//! # bookworld-xlsx: Order Workbook Decoder
//!
//! The externally-authored order list arrives as a zip-compressed OOXML
//! spreadsheet. This crate decodes it into header-keyed row records:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  orders.xlsx (zip archive)                                          │
//! │  ├── xl/sharedStrings.xml   ──► index-addressed string pool         │
//! │  │                              (optional; absence is non-fatal)    │
//! │  └── xl/worksheets/sheet1.xml ► rows of cells, t="s" cells point    │
//! │                                 into the pool                       │
//! │                                                                     │
//! │  row 0            = header (field names)                            │
//! │  rows 1..         = records, kept only when their cell count        │
//! │                     exactly equals the header width                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Decode failures are explicit [`XlsxError`] values here. The order merger
//! upstream is the layer that catches them and degrades to fallback data;
//! this crate never swallows an error silently (a missing or unparsable
//! shared-string part is the one documented exception: it degrades to an
//! empty table with a logged warning, because string cells can still be
//! rendered raw).

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use tracing::{debug, warn};
use zip::ZipArchive;

pub mod error;
mod shared_strings;
mod worksheet;
mod xml;

pub use error::{XlsxError, XlsxResult};

/// One data row: header name → resolved cell value.
///
/// Duplicate header names collapse to the last value for that name.
pub type RowRecord = HashMap<String, String>;

/// Conventional path of the first worksheet part.
const FIRST_WORKSHEET_PART: &str = "xl/worksheets/sheet1.xml";

/// Path of the shared-string part.
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// Decodes the workbook at `path` into row records.
pub fn read_table_from_path(path: impl AsRef<Path>) -> XlsxResult<Vec<RowRecord>> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Opening order workbook");
    let file = File::open(path)?;
    read_table(BufReader::new(file))
}

/// Decodes a workbook from any seekable reader into row records.
///
/// Row 0 is the header; every later row whose cell count exactly equals the
/// header width becomes one record (no padding, no truncation). Mismatched
/// rows are dropped.
pub fn read_table<R: Read + Seek>(reader: R) -> XlsxResult<Vec<RowRecord>> {
    let mut archive = ZipArchive::new(reader)?;

    let shared = read_shared_strings(&mut archive);
    let worksheet_part = locate_worksheet(&archive)?;
    let sheet_xml = read_part(&mut archive, &worksheet_part)?;
    let rows = worksheet::parse_worksheet(&sheet_xml, &shared)?;

    let records = records_from_rows(rows);
    debug!(
        part = %worksheet_part,
        records = records.len(),
        shared_strings = shared.len(),
        "Workbook decoded"
    );
    Ok(records)
}

/// Reads the shared-string table, degrading to an empty table when the part
/// is absent or unparsable. Failure here is non-fatal: worksheet cells that
/// reference the pool resolve to empty strings instead.
fn read_shared_strings<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Vec<String> {
    let xml = match read_part(archive, SHARED_STRINGS_PART) {
        Ok(xml) => xml,
        Err(err) => {
            debug!(error = %err, "No usable shared-string part; proceeding with empty table");
            return Vec::new();
        }
    };

    match shared_strings::parse_shared_strings(&xml) {
        Ok(table) => table,
        Err(err) => {
            warn!(error = %err, "Failed to parse shared-string part; proceeding with empty table");
            Vec::new()
        }
    }
}

/// Locates the worksheet part: the conventional `sheet1.xml` path when
/// present, otherwise the first archive entry matching the worksheet naming
/// convention.
fn locate_worksheet<R: Read + Seek>(archive: &ZipArchive<R>) -> XlsxResult<String> {
    if archive.file_names().any(|name| name == FIRST_WORKSHEET_PART) {
        return Ok(FIRST_WORKSHEET_PART.to_string());
    }

    archive
        .file_names()
        .filter(|name| name.starts_with("xl/worksheets/sheet") && name.ends_with(".xml"))
        .min()
        .map(str::to_string)
        .ok_or(XlsxError::MissingWorksheet)
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> XlsxResult<String> {
    let mut part = archive.by_name(name)?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    Ok(xml)
}

/// Zips the header row onto every exact-width data row.
fn records_from_rows(rows: Vec<Vec<String>>) -> Vec<RowRecord> {
    let mut rows = rows.into_iter();
    let Some(header) = rows.next() else {
        return Vec::new();
    };
    if header.is_empty() {
        return Vec::new();
    }

    rows.filter(|row| row.len() == header.len())
        .map(|row| header.iter().cloned().zip(row).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    const NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";

    fn workbook_bytes(shared: Option<&str>, parts: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        if let Some(xml) = shared {
            writer.start_file(SHARED_STRINGS_PART, options).unwrap();
            writer.write_all(xml.as_bytes()).unwrap();
        }
        for (name, xml) in parts {
            writer.start_file(*name, options).unwrap();
            writer.write_all(xml.as_bytes()).unwrap();
        }

        writer.finish().unwrap().into_inner()
    }

    fn sst(entries: &[&str]) -> String {
        let items: String = entries
            .iter()
            .map(|t| format!("<si><t>{t}</t></si>"))
            .collect();
        format!(r#"<?xml version="1.0"?><sst xmlns="{NS}">{items}</sst>"#)
    }

    fn sheet(body: &str) -> String {
        format!(
            r#"<?xml version="1.0"?><worksheet xmlns="{NS}"><sheetData>{body}</sheetData></worksheet>"#
        )
    }

    #[test]
    fn header_zips_onto_exact_width_rows() {
        let shared = sst(&["A", "B", "x", "y"]);
        let body = r#"
            <row><c t="s"><v>0</v></c><c t="s"><v>1</v></c></row>
            <row><c t="s"><v>2</v></c><c t="s"><v>3</v></c></row>"#;
        let bytes = workbook_bytes(Some(&shared), &[(FIRST_WORKSHEET_PART, &sheet(body))]);

        let records = read_table(Cursor::new(bytes)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["A"], "x");
        assert_eq!(records[0]["B"], "y");
    }

    #[test]
    fn mismatched_width_rows_are_dropped() {
        let body = r#"
            <row><c><v>A</v></c><c><v>B</v></c></row>
            <row><c><v>1</v></c><c><v>2</v></c><c><v>3</v></c></row>
            <row><c><v>only</v></c></row>
            <row><c><v>x</v></c><c><v>y</v></c></row>"#;
        let bytes = workbook_bytes(None, &[(FIRST_WORKSHEET_PART, &sheet(body))]);

        let records = read_table(Cursor::new(bytes)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["A"], "x");
        assert_eq!(records[0]["B"], "y");
    }

    #[test]
    fn duplicate_header_names_keep_last_value() {
        let body = r#"
            <row><c><v>A</v></c><c><v>A</v></c></row>
            <row><c><v>first</v></c><c><v>second</v></c></row>"#;
        let bytes = workbook_bytes(None, &[(FIRST_WORKSHEET_PART, &sheet(body))]);

        let records = read_table(Cursor::new(bytes)).unwrap();
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[0]["A"], "second");
    }

    #[test]
    fn missing_shared_strings_part_is_non_fatal() {
        let body = r#"
            <row><c><v>N</v></c></row>
            <row><c><v>1001</v></c></row>"#;
        let bytes = workbook_bytes(None, &[(FIRST_WORKSHEET_PART, &sheet(body))]);

        let records = read_table(Cursor::new(bytes)).unwrap();
        assert_eq!(records[0]["N"], "1001");
    }

    #[test]
    fn falls_back_to_first_matching_worksheet_part() {
        let body = r#"
            <row><c><v>H</v></c></row>
            <row><c><v>v</v></c></row>"#;
        let bytes = workbook_bytes(None, &[("xl/worksheets/sheet3.xml", &sheet(body))]);

        let records = read_table(Cursor::new(bytes)).unwrap();
        assert_eq!(records[0]["H"], "v");
    }

    #[test]
    fn archive_without_worksheet_is_an_error() {
        let bytes = workbook_bytes(Some(&sst(&["lonely"])), &[]);
        let err = read_table(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, XlsxError::MissingWorksheet));
    }

    #[test]
    fn empty_worksheet_yields_no_records() {
        let bytes = workbook_bytes(None, &[(FIRST_WORKSHEET_PART, &sheet(""))]);
        assert!(read_table(Cursor::new(bytes)).unwrap().is_empty());
    }

    #[test]
    fn nonexistent_path_is_an_io_error() {
        let err = read_table_from_path("/no/such/orders.xlsx").unwrap_err();
        assert!(matches!(err, XlsxError::Io(_)));
    }

    #[test]
    fn garbage_bytes_are_a_zip_error() {
        let err = read_table(Cursor::new(b"not a zip archive".to_vec())).unwrap_err();
        assert!(matches!(err, XlsxError::Zip(_)));
    }

    #[test]
    fn reads_workbook_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.xlsx");
        let body = r#"
            <row><c><v>K</v></c></row>
            <row><c><v>v1</v></c></row>
            <row><c><v>v2</v></c></row>"#;
        std::fs::write(
            &path,
            workbook_bytes(None, &[(FIRST_WORKSHEET_PART, &sheet(body))]),
        )
        .unwrap();

        let records = read_table_from_path(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["K"], "v1");
        assert_eq!(records[1]["K"], "v2");
    }
}
