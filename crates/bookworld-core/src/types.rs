//! # Domain Types
//!
//! Core domain types used throughout Книжный Мир.
//!
//! ## Type Groups
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Accounts      User, AuthenticatedUser, NewUser, Role               │
//! │  Catalog       Book, NewBook, BookQuery, Genre, Publisher,          │
//! │                PickupPoint                                          │
//! │  Store orders  StoreOrder, NewOrder, NewOrderItem, OrderItemLine    │
//! │  Merged view   OrderRecord, OrderSource, OrderPatch                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identifier Convention
//! Relational rows use integer autoincrement ids. The merged
//! [`OrderRecord`] normalizes identifiers to `String` because workbook
//! order numbers arrive as text; the coercion happens once, at record
//! construction, and overlay lookup is plain string equality.

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Roles & Users
// =============================================================================

/// Access role, stored lowercase in the `users.role` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Unauthenticated browsing.
    Guest,
    /// A customer with orders of their own.
    Client,
    /// Order processing and catalog upkeep.
    Manager,
    /// Full access including user administration.
    Admin,
}

impl Role {
    /// Storage form of the role.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::Client => "client",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }

    /// Parses the storage form.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "guest" => Some(Role::Guest),
            "client" => Some(Role::Client),
            "manager" => Some(Role::Manager),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user account row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub login: String,
    pub full_name: String,
    pub role: Role,
}

/// The identity triple returned by authentication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AuthenticatedUser {
    pub id: i64,
    pub full_name: String,
    pub role: Role,
}

/// Fields for creating or updating a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub login: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
}

// =============================================================================
// Catalog
// =============================================================================

/// A book as listed in the catalog: the row joined with its genre and
/// publisher names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre_id: i64,
    pub publisher_id: i64,
    /// Joined genre name.
    pub genre: String,
    /// Joined publisher name.
    pub publisher: String,
    pub year: i64,
    pub price_kopecks: i64,
    pub stock_quantity: i64,
    pub is_on_sale: bool,
    pub discount_price_kopecks: Option<i64>,
    pub cover_image: Option<String>,
    pub description: Option<String>,
}

impl Book {
    /// Returns the list price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_kopecks(self.price_kopecks)
    }

    /// Returns the effective price: the discount price when the book is on
    /// sale and one is set, the list price otherwise.
    pub fn effective_price(&self) -> Money {
        match (self.is_on_sale, self.discount_price_kopecks) {
            (true, Some(kopecks)) => Money::from_kopecks(kopecks),
            _ => self.price(),
        }
    }

    /// Whether the book can be added to an order.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }
}

/// Fields for creating or updating a book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre_id: i64,
    pub publisher_id: i64,
    pub year: i64,
    pub price_kopecks: i64,
    pub stock_quantity: i64,
    pub is_on_sale: bool,
    pub discount_price_kopecks: Option<i64>,
    pub cover_image: Option<String>,
    pub description: Option<String>,
}

/// Sort key for the book listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookSort {
    /// Alphabetical by title (the default).
    #[default]
    Title,
    /// Alphabetical by author.
    Author,
    /// Cheapest first.
    Price,
    /// Newest first.
    Year,
}

/// Parameters for the book listing.
#[derive(Debug, Clone, Default)]
pub struct BookQuery {
    /// Substring match over title and author.
    pub search: Option<String>,
    /// Exact genre-name filter.
    pub genre: Option<String>,
    pub sort: BookSort,
}

/// A genre row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// A publisher row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Publisher {
    pub id: i64,
    pub name: String,
}

/// A pickup point row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PickupPoint {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
}

// =============================================================================
// Store Orders
// =============================================================================

/// A database-origin order row: the `orders` row joined with the client's
/// full name. Dates and status are kept in storage form here; translation
/// to the display shape happens in the mapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StoreOrder {
    pub id: i64,
    pub user_id: i64,
    pub pickup_point_id: i64,
    /// Storage status code (`pending` ... `cancelled`).
    pub status: String,
    pub total_amount_kopecks: i64,
    pub order_date: Option<String>,
    pub completion_date: Option<String>,
    /// Joined `users.full_name`; `None` when the user row is gone.
    pub client_name: Option<String>,
}

impl StoreOrder {
    /// Returns the order total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_kopecks(self.total_amount_kopecks)
    }
}

/// Fields for creating an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub user_id: i64,
    pub pickup_point_id: i64,
    /// Storage status code; defaults to `pending` when created by a client.
    pub status: String,
    pub total_amount_kopecks: i64,
    pub order_date: Option<String>,
    pub completion_date: Option<String>,
}

/// A line item attached to a new order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub book_id: i64,
    pub quantity: i64,
    pub price_kopecks: i64,
}

/// A line of an existing order, joined with the book title.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderItemLine {
    pub title: String,
    pub quantity: i64,
    pub price_kopecks: i64,
}

// =============================================================================
// Merged Order View
// =============================================================================

/// Which upstream source an order record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSource {
    /// The relational store.
    Store,
    /// The externally-authored order workbook.
    Workbook,
}

/// The canonical merged order shape rendered by the order listing.
///
/// Both provenances are flattened into this one record: identifiers are
/// normalized to `String`, dates to `ДД.ММ.ГГГГ` text, statuses to display
/// labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Canonical identifier (see module docs for the coercion rule).
    pub id: String,
    /// Free-text item list, e.g. `B112F4, 1, F635R4, 2`.
    pub composition: String,
    pub order_date: String,
    pub delivery_date: String,
    /// Pickup point id; 0 when the source value was absent or unparsable.
    pub pickup_point_id: i64,
    pub client_name: String,
    pub pickup_code: String,
    /// Display-label status, e.g. «Готов к выдаче».
    pub status: String,
    pub source: OrderSource,
}

/// A partial patch applied over an [`OrderRecord`] at read time.
///
/// Lives only in process memory for the session; never written back to
/// either source. Absent fields leave the record untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderPatch {
    pub status: Option<String>,
    pub delivery_date: Option<String>,
    pub pickup_code: Option<String>,
    pub client_name: Option<String>,
    pub composition: Option<String>,
}

impl OrderPatch {
    /// A patch that changes nothing.
    pub fn new() -> Self {
        OrderPatch::default()
    }

    /// Sets the status override.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the delivery-date override.
    pub fn with_delivery_date(mut self, date: impl Into<String>) -> Self {
        self.delivery_date = Some(date.into());
        self
    }

    /// Sets the pickup-code override.
    pub fn with_pickup_code(mut self, code: impl Into<String>) -> Self {
        self.pickup_code = Some(code.into());
        self
    }

    /// Sets the client-name override.
    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = Some(name.into());
        self
    }

    /// Sets the composition override.
    pub fn with_composition(mut self, composition: impl Into<String>) -> Self {
        self.composition = Some(composition.into());
        self
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.delivery_date.is_none()
            && self.pickup_code.is_none()
            && self.client_name.is_none()
            && self.composition.is_none()
    }

    /// Merges `other` into `self`; fields present in `other` win.
    pub fn merge(&mut self, other: OrderPatch) {
        if other.status.is_some() {
            self.status = other.status;
        }
        if other.delivery_date.is_some() {
            self.delivery_date = other.delivery_date;
        }
        if other.pickup_code.is_some() {
            self.pickup_code = other.pickup_code;
        }
        if other.client_name.is_some() {
            self.client_name = other.client_name;
        }
        if other.composition.is_some() {
            self.composition = other.composition;
        }
    }

    /// Applies the present fields over the record. Idempotent: applying
    /// the same patch twice equals applying it once.
    pub fn apply(&self, record: &mut OrderRecord) {
        if let Some(status) = &self.status {
            record.status = status.clone();
        }
        if let Some(date) = &self.delivery_date {
            record.delivery_date = date.clone();
        }
        if let Some(code) = &self.pickup_code {
            record.pickup_code = code.clone();
        }
        if let Some(name) = &self.client_name {
            record.client_name = name.clone();
        }
        if let Some(composition) = &self.composition {
            record.composition = composition.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> OrderRecord {
        OrderRecord {
            id: id.to_string(),
            composition: "B112F4, 1".to_string(),
            order_date: "15.02.2025".to_string(),
            delivery_date: "20.02.2025".to_string(),
            pickup_point_id: 3,
            client_name: "Белов Алексей Дмитриевич".to_string(),
            pickup_code: "Z1X9Y2".to_string(),
            status: "Новый".to_string(),
            source: OrderSource::Store,
        }
    }

    #[test]
    fn patch_overrides_only_present_fields() {
        let mut rec = record("5");
        let patch = OrderPatch::new().with_status("Готов к выдаче");
        patch.apply(&mut rec);

        assert_eq!(rec.status, "Готов к выдаче");
        assert_eq!(rec.delivery_date, "20.02.2025");
        assert_eq!(rec.pickup_code, "Z1X9Y2");
        assert_eq!(rec.client_name, "Белов Алексей Дмитриевич");
        assert_eq!(rec.composition, "B112F4, 1");
    }

    #[test]
    fn patch_application_is_idempotent() {
        let patch = OrderPatch::new()
            .with_status("Доставлен")
            .with_pickup_code("A1B2C3");

        let mut once = record("7");
        patch.apply(&mut once);
        let mut twice = once.clone();
        patch.apply(&mut twice);

        assert_eq!(once, twice);
    }

    #[test]
    fn patch_merge_latest_field_wins() {
        let mut patch = OrderPatch::new()
            .with_status("Новый")
            .with_client_name("Соколова Мария Андреевна");
        patch.merge(OrderPatch::new().with_status("Отменен"));

        assert_eq!(patch.status.as_deref(), Some("Отменен"));
        assert_eq!(
            patch.client_name.as_deref(),
            Some("Соколова Мария Андреевна")
        );
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(OrderPatch::new().is_empty());
        assert!(!OrderPatch::new().with_pickup_code("X").is_empty());
    }

    #[test]
    fn effective_price_prefers_discount_on_sale() {
        let mut book = Book {
            id: 1,
            title: "1984".to_string(),
            author: "Джордж Оруэлл".to_string(),
            genre_id: 2,
            publisher_id: 2,
            genre: "Антиутопия".to_string(),
            publisher: "АСТ".to_string(),
            year: 1949,
            price_kopecks: 38000,
            stock_quantity: 8,
            is_on_sale: false,
            discount_price_kopecks: Some(30000),
            cover_image: None,
            description: None,
        };
        assert_eq!(book.effective_price().kopecks(), 38000);

        book.is_on_sale = true;
        assert_eq!(book.effective_price().kopecks(), 30000);
    }

    #[test]
    fn role_storage_form_round_trips() {
        for role in [Role::Guest, Role::Client, Role::Manager, Role::Admin] {
            assert_eq!(Role::from_str_opt(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_str_opt("root"), None);
    }
}
