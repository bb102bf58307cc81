//! Shared-string table parsing.
//!
//! `xl/sharedStrings.xml` is an index-addressed string pool: worksheet cells
//! with `t="s"` store a position into this table instead of the text itself.
//! The table is built once per file and immutable afterwards.

use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::Reader;

use crate::error::XlsxResult;
use crate::xml::read_text;

/// Parses `sharedStrings.xml` into the ordered string table.
///
/// Each `<si>` contributes one entry: the concatenation of its `<t>` text,
/// whether direct or inside rich-text `<r>` runs. Phonetic `<rPh>` subtrees
/// are skipped; their `<t>` nodes are not part of the displayed string.
pub(crate) fn parse_shared_strings(xml: &str) -> XlsxResult<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut table = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.local_name().as_ref() == b"si" => {
                table.push(parse_si(&mut reader)?);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(table)
}

fn parse_si(reader: &mut Reader<&[u8]>) -> XlsxResult<String> {
    let mut buf = Vec::new();
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.local_name().as_ref() == b"t" => {
                text.push_str(&read_text(reader, QName(b"t"))?);
            }
            Event::Start(e) if e.local_name().as_ref() == b"r" => {
                // rich-text run; its <t> is visible text
            }
            Event::Start(e) if e.local_name().as_ref() == b"rPh" => {
                reader.read_to_end_into(e.name(), &mut Vec::new())?;
            }
            Event::End(e) if e.local_name().as_ref() == b"si" => break,
            Event::Eof => {
                return Err(crate::error::XlsxError::Malformed("unexpected eof in <si>"))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";

    #[test]
    fn plain_entries_in_order() {
        let xml = format!(
            r#"<?xml version="1.0"?><sst xmlns="{NS}" count="2" uniqueCount="2">
                 <si><t>Номер заказа</t></si>
                 <si><t>Статус заказа</t></si>
               </sst>"#
        );
        let table = parse_shared_strings(&xml).unwrap();
        assert_eq!(table, vec!["Номер заказа", "Статус заказа"]);
    }

    #[test]
    fn rich_text_runs_are_concatenated() {
        let xml = format!(
            r#"<sst xmlns="{NS}"><si><r><t>Дата </t></r><r><t>доставки</t></r></si></sst>"#
        );
        let table = parse_shared_strings(&xml).unwrap();
        assert_eq!(table, vec!["Дата доставки"]);
    }

    #[test]
    fn phonetic_runs_are_not_visible_text() {
        let xml = format!(
            r#"<sst xmlns="{NS}"><si><t>東京</t><rPh sb="0"><t>トウキョウ</t></rPh></si></sst>"#
        );
        let table = parse_shared_strings(&xml).unwrap();
        assert_eq!(table, vec!["東京"]);
    }

    #[test]
    fn empty_table() {
        let xml = format!(r#"<sst xmlns="{NS}"/>"#);
        assert!(parse_shared_strings(&xml).unwrap().is_empty());
    }

    #[test]
    fn escaped_entities_are_unescaped() {
        let xml = format!(r#"<sst xmlns="{NS}"><si><t>Манн &amp; Фербер</t></si></sst>"#);
        let table = parse_shared_strings(&xml).unwrap();
        assert_eq!(table, vec!["Манн & Фербер"]);
    }
}
