//! # Order Repository
//!
//! Store-origin orders and their line items.
//!
//! Status values cross this boundary in storage form (`pending` ...
//! `cancelled`); the order merger translates to display labels. The one
//! exception is [`OrderRepository::update_status`], which accepts the
//! display label managers actually type and translates it back before
//! writing.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use bookworld_core::status::storage_status;
use bookworld_core::{NewOrder, NewOrderItem, OrderItemLine, StoreOrder};

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Lists all orders, newest first, joined with the client's full name.
    ///
    /// The join is LEFT so an order survives its user row being deleted;
    /// `client_name` comes back `None` in that case.
    pub async fn list(&self) -> DbResult<Vec<StoreOrder>> {
        let orders = sqlx::query_as::<_, StoreOrder>(
            r#"
            SELECT o.id, o.user_id, o.pickup_point_id, o.status,
                   o.total_amount_kopecks, o.order_date, o.completion_date,
                   u.full_name AS client_name
            FROM orders o
            LEFT JOIN users u ON o.user_id = u.id
            ORDER BY o.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Lists one user's orders, newest first.
    pub async fn list_for_user(&self, user_id: i64) -> DbResult<Vec<StoreOrder>> {
        let orders = sqlx::query_as::<_, StoreOrder>(
            r#"
            SELECT o.id, o.user_id, o.pickup_point_id, o.status,
                   o.total_amount_kopecks, o.order_date, o.completion_date,
                   u.full_name AS client_name
            FROM orders o
            LEFT JOIN users u ON o.user_id = u.id
            WHERE o.user_id = ?1
            ORDER BY o.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Fetches one order by id.
    pub async fn get(&self, id: i64) -> DbResult<StoreOrder> {
        sqlx::query_as::<_, StoreOrder>(
            r#"
            SELECT o.id, o.user_id, o.pickup_point_id, o.status,
                   o.total_amount_kopecks, o.order_date, o.completion_date,
                   u.full_name AS client_name
            FROM orders o
            LEFT JOIN users u ON o.user_id = u.id
            WHERE o.id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Order", id))
    }

    /// Inserts an order with its line items in one transaction and returns
    /// the new order id. Nothing is written if any item insert fails.
    pub async fn insert(&self, order: &NewOrder, items: &[NewOrderItem]) -> DbResult<i64> {
        debug!(
            user_id = order.user_id,
            items = items.len(),
            "Inserting order"
        );

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO orders
                (user_id, pickup_point_id, status, total_amount_kopecks,
                 order_date, completion_date)
            VALUES (?1, ?2, ?3, ?4, COALESCE(?5, CURRENT_TIMESTAMP), ?6)
            "#,
        )
        .bind(order.user_id)
        .bind(order.pickup_point_id)
        .bind(&order.status)
        .bind(order.total_amount_kopecks)
        .bind(&order.order_date)
        .bind(&order.completion_date)
        .execute(&mut *tx)
        .await?;

        let order_id = result.last_insert_rowid();

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, book_id, quantity, price_kopecks)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(order_id)
            .bind(item.book_id)
            .bind(item.quantity)
            .bind(item.price_kopecks)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(order_id)
    }

    /// Sets an order's status from its display label («Новый»,
    /// «Доставлен», ...). Unknown labels are written as given.
    pub async fn update_status(&self, id: i64, display_label: &str) -> DbResult<()> {
        let code = storage_status(display_label);
        debug!(id = %id, status = %code, "Updating order status");

        let result = sqlx::query("UPDATE orders SET status = ?2 WHERE id = ?1")
            .bind(id)
            .bind(&code)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        Ok(())
    }

    /// Deletes an order and its line items in one transaction.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting order");

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM order_items WHERE order_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        tx.commit().await?;

        Ok(())
    }

    /// Lists an order's line items, joined with the book title.
    pub async fn items(&self, order_id: i64) -> DbResult<Vec<OrderItemLine>> {
        let items = sqlx::query_as::<_, OrderItemLine>(
            r#"
            SELECT b.title, oi.quantity, oi.price_kopecks
            FROM order_items oi
            JOIN books b ON oi.book_id = b.id
            WHERE oi.order_id = ?1
            ORDER BY oi.id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}
