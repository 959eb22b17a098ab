//! Database query functions (Data Access Objects).
//!
//! This module centralizes all direct database operations on the `users`
//! table, keeping SQL out of the auth service.

use sqlx::SqlitePool;

use super::models::{NewUser, UserCredentials};
use super::DbError;

pub async fn find_user_credentials(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<UserCredentials>, DbError> {
    let row = sqlx::query_as::<_, UserCredentials>(
        "SELECT password_hash, salt FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Inserts a user, failing with `DbError::Duplicate` if the name is taken.
pub async fn insert_user(pool: &SqlitePool, user: &NewUser<'_>) -> Result<i64, DbError> {
    let result = sqlx::query("INSERT INTO users (username, password_hash, salt) VALUES (?, ?, ?)")
        .bind(user.username)
        .bind(user.password_hash)
        .bind(user.salt)
        .execute(pool)
        .await
        .map_err(|err| {
            let duplicate = err
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation());
            if duplicate {
                DbError::Duplicate(user.username.to_string())
            } else {
                DbError::Connection(err)
            }
        })?;

    tracing::debug!(username = %user.username, "Inserted user");
    Ok(result.last_insert_rowid())
}

/// Inserts a user unless the name already exists. Returns whether a row was added.
pub async fn insert_user_if_absent(pool: &SqlitePool, user: &NewUser<'_>) -> Result<bool, DbError> {
    let result =
        sqlx::query("INSERT OR IGNORE INTO users (username, password_hash, salt) VALUES (?, ?, ?)")
            .bind(user.username)
            .bind(user.password_hash)
            .bind(user.salt)
            .execute(pool)
            .await?;

    Ok(result.rows_affected() > 0)
}
