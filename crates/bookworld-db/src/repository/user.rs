//! # User Repository
//!
//! Authentication and user administration.
//!
//! Authentication is a plaintext login/password comparison against the
//! `users` table, exactly as the system has always done it; hardening is an
//! explicit non-goal of this subsystem.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use bookworld_core::{AuthenticatedUser, NewUser, User};

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Checks credentials and returns the identity triple, or `None` when
    /// no user matches.
    pub async fn authenticate(
        &self,
        login: &str,
        password: &str,
    ) -> DbResult<Option<AuthenticatedUser>> {
        debug!(login = %login, "Authenticating user");

        let user = sqlx::query_as::<_, AuthenticatedUser>(
            r#"
            SELECT id, full_name, role
            FROM users
            WHERE login = ?1 AND password = ?2
            "#,
        )
        .bind(login)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Lists all users, grouped by role then name.
    pub async fn list(&self) -> DbResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, login, full_name, role
            FROM users
            ORDER BY role, full_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Inserts a new user and returns its id.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - login already taken
    pub async fn insert(&self, user: &NewUser) -> DbResult<i64> {
        debug!(login = %user.login, role = %user.role, "Inserting user");

        let result = sqlx::query(
            r#"
            INSERT INTO users (login, password, full_name, role)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&user.login)
        .bind(&user.password)
        .bind(&user.full_name)
        .bind(user.role.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Updates an existing user (all fields).
    pub async fn update(&self, id: i64, user: &NewUser) -> DbResult<()> {
        debug!(id = %id, "Updating user");

        let result = sqlx::query(
            r#"
            UPDATE users
            SET login = ?2, password = ?3, full_name = ?4, role = ?5
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&user.login)
        .bind(&user.password)
        .bind(&user.full_name)
        .bind(user.role.as_str())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        Ok(())
    }

    /// Deletes a user.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting user");

        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use bookworld_core::Role;

    async fn db_with_user() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.users()
            .insert(&NewUser {
                login: "a.belov@example.com".to_string(),
                password: "Fh9jQw".to_string(),
                full_name: "Белов Алексей Дмитриевич".to_string(),
                role: Role::Client,
            })
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn authenticate_returns_identity_triple() {
        let db = db_with_user().await;

        let user = db
            .users()
            .authenticate("a.belov@example.com", "Fh9jQw")
            .await
            .unwrap()
            .expect("credentials should match");

        assert_eq!(user.full_name, "Белов Алексей Дмитриевич");
        assert_eq!(user.role, Role::Client);
    }

    #[tokio::test]
    async fn authenticate_rejects_wrong_password() {
        let db = db_with_user().await;

        let user = db
            .users()
            .authenticate("a.belov@example.com", "wrong")
            .await
            .unwrap();

        assert!(user.is_none());
    }

    #[tokio::test]
    async fn duplicate_login_is_a_unique_violation() {
        let db = db_with_user().await;

        let err = db
            .users()
            .insert(&NewUser {
                login: "a.belov@example.com".to_string(),
                password: "other".to_string(),
                full_name: "Другой Пользователь".to_string(),
                role: Role::Client,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let user = NewUser {
            login: "x".to_string(),
            password: "y".to_string(),
            full_name: "z".to_string(),
            role: Role::Manager,
        };

        assert!(matches!(
            db.users().update(99, &user).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
        assert!(matches!(
            db.users().delete(99).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }
}
