//! # bookworld-db: Database Layer for Книжный Мир
//!
//! SQLite persistence for the bookstore: users, catalog (books, genres,
//! publishers, pickup points) and store-origin orders.
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded schema migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (user, catalog, order)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bookworld_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./bookstore.db")).await?;
//! let user = db.users().authenticate("a.belov@example.com", "Fh9jQw").await?;
//! let books = db.catalog().list_books(&BookQuery::default()).await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::catalog::CatalogRepository;
pub use repository::order::OrderRepository;
pub use repository::user::UserRepository;
