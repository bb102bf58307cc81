//! # bookworld-core: Pure Domain Logic for Книжный Мир
//!
//! This crate is the bottom layer of the workspace. It contains domain types
//! and pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Book World Architecture                         │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                    bookworld-orders                           │ │
//! │  │      order merging, overlay store, workbook mapper            │ │
//! │  └───────────────┬──────────────────────────┬────────────────────┘ │
//! │                  │                          │                      │
//! │  ┌───────────────▼──────────┐  ┌────────────▼───────────────────┐  │
//! │  │      bookworld-db        │  │        bookworld-xlsx          │  │
//! │  │  SQLite repositories     │  │  zip + XML workbook decoder    │  │
//! │  └───────────────┬──────────┘  └────────────┬───────────────────┘  │
//! │                  │                          │                      │
//! │  ┌───────────────▼──────────────────────────▼────────────────────┐ │
//! │  │              ★ bookworld-core (THIS CRATE) ★                  │ │
//! │  │                                                               │ │
//! │  │   ┌─────────┐ ┌─────────┐ ┌───────┐ ┌───────┐ ┌────────────┐ │ │
//! │  │   │  types  │ │ status  │ │ dates │ │ money │ │ validation │ │ │
//! │  │   └─────────┘ └─────────┘ └───────┘ └───────┘ └────────────┘ │ │
//! │  │                                                               │ │
//! │  │   NO I/O • NO DATABASE • NO FILES • PURE FUNCTIONS            │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Book, OrderRecord, OrderPatch, ...)
//! - [`status`] - Order status vocabulary (storage codes ↔ display labels)
//! - [`dates`] - Workbook date-serial conversion and timestamp display
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules

pub mod dates;
pub mod error;
pub mod money;
pub mod status;
pub mod types;
pub mod validation;

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use status::{display_status, storage_status, OrderStatus};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// First synthetic order number assigned to workbook rows that carry no
/// «Номер заказа» column. Store orders use small sequential rowids, so the
/// two provenances occupy disjoint ranges by convention.
pub const WORKBOOK_ORDER_ID_BASE: i64 = 1001;

/// Client name shown for store orders whose user join produced no name.
pub const UNKNOWN_CLIENT_NAME: &str = "Пользователь";

/// Composition placeholder for store orders (the relational store keeps
/// composition in `order_items`, not as free text).
pub const STORE_COMPOSITION_PLACEHOLDER: &str = "Состав заказа";
