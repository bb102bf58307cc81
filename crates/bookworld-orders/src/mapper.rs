//! # Row Mapping
//!
//! Turns each source's native row shape into the canonical [`OrderRecord`]:
//!
//! - workbook rows are header-keyed string maps with serial dates and
//!   display-label statuses already in Russian;
//! - store rows carry SQL timestamps and storage status codes that need
//!   translation.
//!
//! Mapping is total. Missing or malformed fields degrade to documented
//! defaults; no row is ever rejected here.

use bookworld_core::dates::{serial_text_to_display, store_timestamp_to_display};
use bookworld_core::status::display_status;
use bookworld_core::{
    OrderRecord, OrderSource, StoreOrder, STORE_COMPOSITION_PLACEHOLDER, UNKNOWN_CLIENT_NAME,
    WORKBOOK_ORDER_ID_BASE,
};
use bookworld_xlsx::RowRecord;

// Workbook column headers, exactly as the external file spells them.
pub const HEADER_ORDER_ID: &str = "Номер заказа";
pub const HEADER_COMPOSITION: &str = "Состав заказа (Артикул, Кол-во)";
pub const HEADER_ORDER_DATE: &str = "Дата заказа";
pub const HEADER_DELIVERY_DATE: &str = "Дата доставки";
pub const HEADER_PICKUP_POINT: &str = "ID Пункта выдачи";
pub const HEADER_CLIENT_NAME: &str = "ФИО клиента";
pub const HEADER_PICKUP_CODE: &str = "Код для получения";
pub const HEADER_STATUS: &str = "Статус заказа";

/// Default status label for workbook rows that carry none.
pub const DEFAULT_WORKBOOK_STATUS: &str = "Новый";

/// Maps a workbook row to an order record.
///
/// `offset` is the row's zero-based position in the sheet; it feeds the
/// synthetic identifier (`1001 + offset`) assigned when the row carries no
/// order number of its own. Date cells holding integer serials become
/// `ДД.ММ.ГГГГ`; anything else passes through as-is.
pub fn record_from_row(row: &RowRecord, offset: usize) -> OrderRecord {
    let field = |header: &str| row.get(header).map(String::as_str).unwrap_or("");

    let id = match field(HEADER_ORDER_ID).trim() {
        "" => (WORKBOOK_ORDER_ID_BASE + offset as i64).to_string(),
        id => id.to_string(),
    };

    let status = match field(HEADER_STATUS).trim() {
        "" => DEFAULT_WORKBOOK_STATUS.to_string(),
        status => status.to_string(),
    };

    OrderRecord {
        id,
        composition: field(HEADER_COMPOSITION).to_string(),
        order_date: serial_text_to_display(field(HEADER_ORDER_DATE)),
        delivery_date: serial_text_to_display(field(HEADER_DELIVERY_DATE)),
        pickup_point_id: field(HEADER_PICKUP_POINT).trim().parse().unwrap_or(0),
        client_name: field(HEADER_CLIENT_NAME).to_string(),
        pickup_code: field(HEADER_PICKUP_CODE).to_string(),
        status,
        source: OrderSource::Workbook,
    }
}

/// Maps a store order row to an order record.
///
/// The relational store keeps composition in `order_items` rather than as
/// free text, so the record gets a placeholder; the pickup code is likewise
/// a workbook-only concept and starts empty. Both are overlay-editable.
pub fn record_from_store(order: &StoreOrder) -> OrderRecord {
    OrderRecord {
        id: order.id.to_string(),
        composition: STORE_COMPOSITION_PLACEHOLDER.to_string(),
        order_date: order
            .order_date
            .as_deref()
            .map(store_timestamp_to_display)
            .unwrap_or_default(),
        delivery_date: order
            .completion_date
            .as_deref()
            .map(store_timestamp_to_display)
            .unwrap_or_default(),
        pickup_point_id: order.pickup_point_id,
        client_name: order
            .client_name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_CLIENT_NAME.to_string()),
        pickup_code: String::new(),
        status: display_status(&order.status),
        source: OrderSource::Store,
    }
}
