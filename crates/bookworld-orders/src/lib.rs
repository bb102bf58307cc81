//! # bookworld-orders: Order Merging for Книжный Мир
//!
//! The back-office order view has two sources of truth: the relational
//! store and an externally-authored spreadsheet. This crate owns everything
//! between those sources and the screen:
//!
//! - [`mapper`] - per-source row → [`OrderRecord`] mapping
//! - [`merge`] - the never-failing two-source union
//! - [`overlay`] - in-session edits applied at read time
//! - [`fallback`] - built-in sample orders for workbook outages
//! - [`config`] - source paths from TOML + environment
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bookworld_db::{Database, DbConfig};
//! use bookworld_orders::{OrderMerger, OrderOverlayStore, OrdersConfig};
//!
//! let config = OrdersConfig::load();
//! let db = Database::new(DbConfig::new(&config.database_path)).await?;
//! let merger = OrderMerger::new(&db, &config.workbook_path);
//!
//! let mut overlay = OrderOverlayStore::new();
//! let listing = merger.list_orders(&overlay).await; // never fails
//! ```
//!
//! [`OrderRecord`]: bookworld_core::OrderRecord

pub mod config;
pub mod error;
pub mod fallback;
pub mod mapper;
pub mod merge;
pub mod overlay;

pub use config::OrdersConfig;
pub use error::{OrdersError, OrdersResult};
pub use fallback::sample_orders;
pub use merge::{OrderListing, OrderMerger, SourceOutcome};
pub use overlay::OrderOverlayStore;
