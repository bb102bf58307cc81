//! Error types for workbook decoding.
//!
//! Failures are explicit at this layer; the order merger is the recovery
//! boundary that degrades them to a fallback dataset.

use thiserror::Error;

/// Workbook decode errors.
#[derive(Debug, Error)]
pub enum XlsxError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("xml parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("xml attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("utf-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The archive holds no `xl/worksheets/sheet*.xml` part at all.
    #[error("workbook has no worksheet part")]
    MissingWorksheet,

    #[error("malformed worksheet xml: {0}")]
    Malformed(&'static str),
}

/// Result type for workbook decoding.
pub type XlsxResult<T> = Result<T, XlsxError>;
