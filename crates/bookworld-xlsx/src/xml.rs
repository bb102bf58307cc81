//! Small quick-xml helpers shared by the part parsers.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;

use crate::error::XlsxResult;

/// Returns the unescaped value of an attribute, if present.
pub(crate) fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> XlsxResult<Option<String>> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Reads text content up to the matching end tag.
pub(crate) fn read_text(reader: &mut Reader<&[u8]>, end: QName<'_>) -> XlsxResult<String> {
    let mut buf = Vec::new();
    let mut text = String::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::CData(e) => text.push_str(std::str::from_utf8(e.as_ref())?),
            Event::End(e) if e.name() == end => break,
            Event::Eof => return Err(crate::error::XlsxError::Malformed("unexpected eof in text")),
            _ => {}
        }
        buf.clear();
    }
    Ok(text)
}
