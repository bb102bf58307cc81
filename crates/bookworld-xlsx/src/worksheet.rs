//! Worksheet parsing.
//!
//! Extracts rows of cell values from a worksheet part in document order.
//! Cell resolution:
//!
//! - `t="s"` with a valid non-negative integer value → shared-string lookup
//!   (out-of-range index resolves to the empty string);
//! - `t="s"` with anything else → the raw textual value, unchanged;
//! - `t="inlineStr"` → the `<is><t>` text;
//! - everything else (numeric, untyped) → the raw `<v>` text.

use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::Reader;

use crate::error::XlsxResult;
use crate::xml::{attr_value, read_text};

#[derive(Default)]
struct CellState {
    type_tag: Option<String>,
    value: Option<String>,
}

/// Parses a worksheet part into rows of resolved cell values.
pub(crate) fn parse_worksheet(xml: &str, shared: &[String]) -> XlsxResult<Vec<Vec<String>>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Option<Vec<String>> = None;
    let mut cell: Option<CellState> = None;
    let mut in_value = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"row" => row = Some(Vec::new()),
                b"c" => {
                    cell = Some(CellState {
                        type_tag: attr_value(&e, b"t")?,
                        value: None,
                    });
                }
                b"v" => in_value = cell.is_some(),
                b"t" => {
                    // inline strings keep their text under <is><t>, not <v>
                    if let Some(state) = cell.as_mut() {
                        if state.type_tag.as_deref() == Some("inlineStr") {
                            let text = read_text(&mut reader, QName(b"t"))?;
                            match state.value.as_mut() {
                                Some(existing) => existing.push_str(&text),
                                None => state.value = Some(text),
                            }
                        }
                    }
                }
                _ => {}
            },
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"c" {
                    if let Some(cells) = row.as_mut() {
                        let type_tag = attr_value(&e, b"t")?;
                        cells.push(resolve_cell(type_tag.as_deref(), None, shared));
                    }
                }
            }
            Event::Text(t) if in_value => {
                if let Some(state) = cell.as_mut() {
                    let text = t.unescape()?;
                    match state.value.as_mut() {
                        Some(existing) => existing.push_str(&text),
                        None => state.value = Some(text.into_owned()),
                    }
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"v" => in_value = false,
                b"c" => {
                    if let (Some(cells), Some(state)) = (row.as_mut(), cell.take()) {
                        cells.push(resolve_cell(state.type_tag.as_deref(), state.value, shared));
                    }
                }
                b"row" => {
                    if let Some(cells) = row.take() {
                        rows.push(cells);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(rows)
}

fn resolve_cell(type_tag: Option<&str>, value: Option<String>, shared: &[String]) -> String {
    let raw = value.unwrap_or_default();

    if type_tag == Some("s") {
        if let Ok(index) = raw.trim().parse::<usize>() {
            return shared.get(index).cloned().unwrap_or_default();
        }
    }

    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";

    fn sheet(body: &str) -> String {
        format!(r#"<?xml version="1.0"?><worksheet xmlns="{NS}"><sheetData>{body}</sheetData></worksheet>"#)
    }

    #[test]
    fn shared_and_numeric_cells_resolve() {
        let shared = vec!["Новый".to_string(), "B112F4, 1".to_string()];
        let xml = sheet(
            r#"<row r="1">
                 <c r="A1" t="s"><v>1</v></c>
                 <c r="B1"><v>1001</v></c>
                 <c r="C1" t="s"><v>0</v></c>
               </row>"#,
        );
        let rows = parse_worksheet(&xml, &shared).unwrap();
        assert_eq!(rows, vec![vec!["B112F4, 1", "1001", "Новый"]]);
    }

    #[test]
    fn out_of_range_shared_index_is_empty() {
        let xml = sheet(r#"<row><c t="s"><v>7</v></c></row>"#);
        let rows = parse_worksheet(&xml, &[]).unwrap();
        assert_eq!(rows, vec![vec![""]]);
    }

    #[test]
    fn non_integer_shared_reference_stays_raw() {
        let xml = sheet(r#"<row><c t="s"><v>abc</v></c><c t="s"><v>-1</v></c></row>"#);
        let rows = parse_worksheet(&xml, &["x".to_string()]).unwrap();
        assert_eq!(rows, vec![vec!["abc", "-1"]]);
    }

    #[test]
    fn empty_cells_yield_empty_strings() {
        let xml = sheet(r#"<row><c r="A1"/><c r="B1"><v>5</v></c></row>"#);
        let rows = parse_worksheet(&xml, &[]).unwrap();
        assert_eq!(rows, vec![vec!["", "5"]]);
    }

    #[test]
    fn inline_strings_are_read() {
        let xml = sheet(r#"<row><c t="inlineStr"><is><t>Z1X9Y2</t></is></c></row>"#);
        let rows = parse_worksheet(&xml, &[]).unwrap();
        assert_eq!(rows, vec![vec!["Z1X9Y2"]]);
    }

    #[test]
    fn document_order_and_multiple_rows() {
        let xml = sheet(r#"<row><c><v>a</v></c></row><row><c><v>b</v></c><c><v>c</v></c></row>"#);
        let rows = parse_worksheet(&xml, &[]).unwrap();
        assert_eq!(rows, vec![vec!["a".to_string()], vec!["b".to_string(), "c".to_string()]]);
    }

    #[test]
    fn empty_sheet_data() {
        let rows = parse_worksheet(&sheet(""), &[]).unwrap();
        assert!(rows.is_empty());
    }
}
