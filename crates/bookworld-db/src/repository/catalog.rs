//! # Catalog Repository
//!
//! Books, genres, publishers and pickup points.
//!
//! The book listing does its filtering and ordering in SQL, then applies a
//! first-occurrence dedupe by (title, author) in Rust: the catalog has
//! historically accumulated duplicate rows from repeated imports, and the
//! storefront must show each edition once.

use std::collections::HashSet;

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use bookworld_core::{Book, BookQuery, BookSort, Genre, NewBook, PickupPoint, Publisher};

/// Repository for catalog database operations.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    // =========================================================================
    // Books
    // =========================================================================

    /// Lists books matching the query, joined with genre and publisher
    /// names, deduplicated by (title, author).
    pub async fn list_books(&self, query: &BookQuery) -> DbResult<Vec<Book>> {
        debug!(
            search = ?query.search,
            genre = ?query.genre,
            sort = ?query.sort,
            "Listing books"
        );

        let mut sql = String::from(
            r#"
            SELECT b.id, b.title, b.author, b.genre_id, b.publisher_id,
                   g.name AS genre, p.name AS publisher,
                   b.year, b.price_kopecks, b.stock_quantity,
                   b.is_on_sale, b.discount_price_kopecks,
                   b.cover_image, b.description
            FROM books b
            JOIN genres g ON b.genre_id = g.id
            JOIN publishers p ON b.publisher_id = p.id
            WHERE 1 = 1
            "#,
        );

        if query.search.is_some() {
            sql.push_str(" AND (b.title LIKE ?1 OR b.author LIKE ?1)");
        }
        if query.genre.is_some() {
            sql.push_str(if query.search.is_some() {
                " AND g.name = ?2"
            } else {
                " AND g.name = ?1"
            });
        }

        sql.push_str(match query.sort {
            BookSort::Title => " ORDER BY b.title",
            BookSort::Author => " ORDER BY b.author",
            BookSort::Price => " ORDER BY b.price_kopecks",
            BookSort::Year => " ORDER BY b.year DESC",
        });

        let mut q = sqlx::query_as::<_, Book>(&sql);
        if let Some(search) = &query.search {
            q = q.bind(format!("%{}%", search));
        }
        if let Some(genre) = &query.genre {
            q = q.bind(genre.clone());
        }

        let books = q.fetch_all(&self.pool).await?;

        Ok(dedupe_books(books))
    }

    /// Fetches one book by id.
    pub async fn get_book(&self, id: i64) -> DbResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            SELECT b.id, b.title, b.author, b.genre_id, b.publisher_id,
                   g.name AS genre, p.name AS publisher,
                   b.year, b.price_kopecks, b.stock_quantity,
                   b.is_on_sale, b.discount_price_kopecks,
                   b.cover_image, b.description
            FROM books b
            JOIN genres g ON b.genre_id = g.id
            JOIN publishers p ON b.publisher_id = p.id
            WHERE b.id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Book", id))
    }

    /// Inserts a new book and returns its id.
    pub async fn insert_book(&self, book: &NewBook) -> DbResult<i64> {
        debug!(title = %book.title, "Inserting book");

        let result = sqlx::query(
            r#"
            INSERT INTO books
                (title, author, genre_id, publisher_id, year, price_kopecks,
                 stock_quantity, is_on_sale, discount_price_kopecks,
                 cover_image, description)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.genre_id)
        .bind(book.publisher_id)
        .bind(book.year)
        .bind(book.price_kopecks)
        .bind(book.stock_quantity)
        .bind(book.is_on_sale)
        .bind(book.discount_price_kopecks)
        .bind(&book.cover_image)
        .bind(&book.description)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Updates a book (all fields).
    pub async fn update_book(&self, id: i64, book: &NewBook) -> DbResult<()> {
        debug!(id = %id, "Updating book");

        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = ?2, author = ?3, genre_id = ?4, publisher_id = ?5,
                year = ?6, price_kopecks = ?7, stock_quantity = ?8,
                is_on_sale = ?9, discount_price_kopecks = ?10,
                cover_image = ?11, description = ?12
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.genre_id)
        .bind(book.publisher_id)
        .bind(book.year)
        .bind(book.price_kopecks)
        .bind(book.stock_quantity)
        .bind(book.is_on_sale)
        .bind(book.discount_price_kopecks)
        .bind(&book.cover_image)
        .bind(&book.description)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Book", id));
        }

        Ok(())
    }

    /// Adjusts stock by `delta` (negative to decrement on sale).
    pub async fn adjust_stock(&self, id: i64, delta: i64) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE books SET stock_quantity = stock_quantity + ?2 WHERE id = ?1",
        )
        .bind(id)
        .bind(delta)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Book", id));
        }

        Ok(())
    }

    /// Deletes a book.
    pub async fn delete_book(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting book");

        let result = sqlx::query("DELETE FROM books WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Book", id));
        }

        Ok(())
    }

    // =========================================================================
    // Genres & Publishers
    // =========================================================================

    /// Lists all genres, alphabetically.
    pub async fn genres(&self) -> DbResult<Vec<Genre>> {
        let genres = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(genres)
    }

    /// Inserts a genre and returns its id.
    pub async fn add_genre(&self, name: &str) -> DbResult<i64> {
        let result = sqlx::query("INSERT INTO genres (name) VALUES (?1)")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Lists all publishers, alphabetically.
    pub async fn publishers(&self) -> DbResult<Vec<Publisher>> {
        let publishers =
            sqlx::query_as::<_, Publisher>("SELECT id, name FROM publishers ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(publishers)
    }

    /// Inserts a publisher and returns its id.
    pub async fn add_publisher(&self, name: &str) -> DbResult<i64> {
        let result = sqlx::query("INSERT INTO publishers (name) VALUES (?1)")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    // =========================================================================
    // Pickup Points
    // =========================================================================

    /// Lists all pickup points in id order.
    pub async fn pickup_points(&self) -> DbResult<Vec<PickupPoint>> {
        let points = sqlx::query_as::<_, PickupPoint>(
            "SELECT id, name, address, phone FROM pickup_points ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(points)
    }

    /// Inserts a pickup point and returns its id.
    pub async fn add_pickup_point(
        &self,
        name: &str,
        address: &str,
        phone: Option<&str>,
    ) -> DbResult<i64> {
        let result =
            sqlx::query("INSERT INTO pickup_points (name, address, phone) VALUES (?1, ?2, ?3)")
                .bind(name)
                .bind(address)
                .bind(phone)
                .execute(&self.pool)
                .await?;
        Ok(result.last_insert_rowid())
    }
}

/// Keeps the first row for each case-insensitive, whitespace-trimmed
/// (title, author) pair; later duplicates are dropped. Relative order of
/// the survivors is unchanged.
fn dedupe_books(books: Vec<Book>) -> Vec<Book> {
    let mut seen: HashSet<(String, String)> = HashSet::with_capacity(books.len());
    books
        .into_iter()
        .filter(|b| {
            seen.insert((
                b.title.trim().to_lowercase(),
                b.author.trim().to_lowercase(),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn sample_book(title: &str, author: &str, genre_id: i64, publisher_id: i64) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: author.to_string(),
            genre_id,
            publisher_id,
            year: 2020,
            price_kopecks: 45000,
            stock_quantity: 5,
            is_on_sale: false,
            discount_price_kopecks: None,
            cover_image: None,
            description: None,
        }
    }

    async fn seeded_db() -> (Database, i64, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let genre_id = db.catalog().add_genre("Фантастика").await.unwrap();
        let publisher_id = db.catalog().add_publisher("Эксмо").await.unwrap();
        (db, genre_id, publisher_id)
    }

    #[tokio::test]
    async fn listing_joins_genre_and_publisher_names() {
        let (db, g, p) = seeded_db().await;
        db.catalog()
            .insert_book(&sample_book("Дюна", "Фрэнк Герберт", g, p))
            .await
            .unwrap();

        let books = db.catalog().list_books(&BookQuery::default()).await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].genre, "Фантастика");
        assert_eq!(books[0].publisher, "Эксмо");
    }

    #[tokio::test]
    async fn listing_dedupes_by_title_and_author() {
        let (db, g, p) = seeded_db().await;
        let catalog = db.catalog();

        catalog
            .insert_book(&sample_book("Дюна", "Фрэнк Герберт", g, p))
            .await
            .unwrap();
        // Same book, different casing and padding: a re-import duplicate.
        catalog
            .insert_book(&sample_book(" дюна ", "ФРЭНК ГЕРБЕРТ", g, p))
            .await
            .unwrap();
        catalog
            .insert_book(&sample_book("Мы", "Евгений Замятин", g, p))
            .await
            .unwrap();

        let books = catalog.list_books(&BookQuery::default()).await.unwrap();
        assert_eq!(books.len(), 2);
    }

    #[tokio::test]
    async fn search_matches_title_or_author() {
        let (db, g, p) = seeded_db().await;
        let catalog = db.catalog();

        catalog
            .insert_book(&sample_book("Дюна", "Фрэнк Герберт", g, p))
            .await
            .unwrap();
        catalog
            .insert_book(&sample_book("Мы", "Евгений Замятин", g, p))
            .await
            .unwrap();

        let query = BookQuery {
            search: Some("Герберт".to_string()),
            ..Default::default()
        };
        let books = catalog.list_books(&query).await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Дюна");
    }

    #[tokio::test]
    async fn genre_filter_combines_with_search() {
        let (db, g, p) = seeded_db().await;
        let catalog = db.catalog();
        let other_genre = catalog.add_genre("Классика").await.unwrap();

        catalog
            .insert_book(&sample_book("Дюна", "Фрэнк Герберт", g, p))
            .await
            .unwrap();
        catalog
            .insert_book(&sample_book("Дюна: иллюстрированное издание", "Фрэнк Герберт", other_genre, p))
            .await
            .unwrap();

        let query = BookQuery {
            search: Some("Дюна".to_string()),
            genre: Some("Классика".to_string()),
            ..Default::default()
        };
        let books = catalog.list_books(&query).await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].genre, "Классика");
    }

    #[tokio::test]
    async fn year_sort_is_newest_first() {
        let (db, g, p) = seeded_db().await;
        let catalog = db.catalog();

        let mut old = sample_book("Мы", "Евгений Замятин", g, p);
        old.year = 1920;
        let mut new = sample_book("Дюна", "Фрэнк Герберт", g, p);
        new.year = 1965;
        catalog.insert_book(&old).await.unwrap();
        catalog.insert_book(&new).await.unwrap();

        let query = BookQuery {
            sort: BookSort::Year,
            ..Default::default()
        };
        let books = catalog.list_books(&query).await.unwrap();
        assert_eq!(books[0].year, 1965);
        assert_eq!(books[1].year, 1920);
    }

    #[tokio::test]
    async fn stock_adjustment_and_missing_book_errors() {
        let (db, g, p) = seeded_db().await;
        let catalog = db.catalog();

        let id = catalog
            .insert_book(&sample_book("Дюна", "Фрэнк Герберт", g, p))
            .await
            .unwrap();
        catalog.adjust_stock(id, -2).await.unwrap();
        assert_eq!(catalog.get_book(id).await.unwrap().stock_quantity, 3);

        assert!(matches!(
            catalog.get_book(999).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
        assert!(matches!(
            catalog.delete_book(999).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }
}
