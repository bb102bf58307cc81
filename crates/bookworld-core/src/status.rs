//! # Order Status Vocabulary
//!
//! The relational store keeps order statuses as English codes
//! (`pending` ... `cancelled`); everything user-facing speaks the Russian
//! display labels. This module owns the bidirectional mapping.
//!
//! ## Translation Table
//! ```text
//! storage code   display label
//! ────────────   ─────────────────
//! pending        Новый
//! processing     В обработке
//! ready          Готов к выдаче
//! completed      Доставлен
//! cancelled      Отменен
//! ```
//!
//! The free functions [`display_status`] and [`storage_status`] are total:
//! unrecognized input on either side passes through unchanged. That keeps
//! legacy or externally-authored values visible instead of failing the
//! whole listing, at the cost of silently admitting typos.

use serde::{Deserialize, Serialize};

/// The lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order placed, not yet picked up by a manager.
    Pending,
    /// Order is being assembled.
    Processing,
    /// Order is at the pickup point, waiting for the client.
    Ready,
    /// Order handed over to the client.
    Completed,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Ready,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// Storage code as kept in the `orders.status` column.
    pub const fn as_code(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// User-facing Russian label.
    pub const fn display_label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Новый",
            OrderStatus::Processing => "В обработке",
            OrderStatus::Ready => "Готов к выдаче",
            OrderStatus::Completed => "Доставлен",
            OrderStatus::Cancelled => "Отменен",
        }
    }

    /// Parses a storage code. Returns `None` for anything outside the
    /// closed enumeration.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_code() == code)
    }

    /// Parses a display label. Returns `None` for anything outside the
    /// closed enumeration.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.display_label() == label)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_code())
    }
}

/// Translates a storage code into a display label.
///
/// Total function: unknown codes pass through unchanged.
pub fn display_status(code: &str) -> String {
    match OrderStatus::from_code(code) {
        Some(status) => status.display_label().to_string(),
        None => code.to_string(),
    }
}

/// Translates a display label into a storage code.
///
/// Total function: unknown labels pass through unchanged.
pub fn storage_status(label: &str) -> String {
    match OrderStatus::from_label(label) {
        Some(status) => status.as_code().to_string(),
        None => label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_labels_round_trip() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::from_code(status.as_code()), Some(status));
            assert_eq!(OrderStatus::from_label(status.display_label()), Some(status));
            assert_eq!(display_status(status.as_code()), status.display_label());
            assert_eq!(storage_status(status.display_label()), status.as_code());
        }
    }

    #[test]
    fn translation_table_matches_vocabulary() {
        assert_eq!(display_status("pending"), "Новый");
        assert_eq!(display_status("ready"), "Готов к выдаче");
        assert_eq!(storage_status("Доставлен"), "completed");
        assert_eq!(storage_status("Отменен"), "cancelled");
    }

    #[test]
    fn unknown_values_pass_through_unchanged() {
        assert_eq!(display_status("archived"), "archived");
        assert_eq!(storage_status("Возвращен"), "Возвращен");
        assert_eq!(display_status(""), "");
    }

    #[test]
    fn default_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(OrderStatus::default().display_label(), "Новый");
    }
}
