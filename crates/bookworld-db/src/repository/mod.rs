//! # Repository Module
//!
//! Database access behind a clean per-entity API. SQL is isolated here;
//! callers get typed rows and typed errors.
//!
//! ## Available Repositories
//!
//! - [`user::UserRepository`] - authentication and user CRUD
//! - [`catalog::CatalogRepository`] - books, genres, publishers, pickup points
//! - [`order::OrderRepository`] - store-origin orders and their items

pub mod catalog;
pub mod order;
pub mod user;
