use chrono::Utc;
use sqlx::{Pool, Sqlite};

use crate::storage::validate_sqlite_table_schema;
use crate::userdb::{
    errors::UserError,
    types::{User, UserSearchField},
};

use super::config::DB_TABLE_USERS;

pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL,
            updated_at TIMESTAMP NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await?;

    Ok(())
}

pub(super) async fn validate_user_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), UserError> {
    let expected_columns = [
        ("id", "INTEGER"),
        ("email", "TEXT"),
        ("password_hash", "TEXT"),
        ("created_at", "TIMESTAMP"),
        ("updated_at", "TIMESTAMP"),
    ];

    validate_sqlite_table_schema(
        pool,
        DB_TABLE_USERS.as_str(),
        &expected_columns,
        UserError::Storage,
    )
    .await
}

pub(super) async fn get_user_by_field_sqlite(
    pool: &Pool<Sqlite>,
    field: &UserSearchField,
) -> Result<Option<User>, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    let user = match field {
        UserSearchField::Id(id) => {
            sqlx::query_as::<_, User>(&format!("SELECT * FROM {table_name} WHERE id = ?"))
                .bind(id)
                .fetch_optional(pool)
                .await?
        }
        UserSearchField::Email(email) => {
            sqlx::query_as::<_, User>(&format!("SELECT * FROM {table_name} WHERE email = ?"))
                .bind(email)
                .fetch_optional(pool)
                .await?
        }
    };

    Ok(user)
}

pub(super) async fn insert_user_sqlite(
    pool: &Pool<Sqlite>,
    email: &str,
    password_hash: &str,
) -> Result<User, UserError> {
    let table_name = DB_TABLE_USERS.as_str();
    let now = Utc::now();

    sqlx::query(&format!(
        r#"
        INSERT INTO {table_name} (email, password_hash, created_at, updated_at)
        VALUES (?, ?, ?, ?)
        "#
    ))
    .bind(email)
    .bind(password_hash)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| map_insert_error(e, email))?;

    // Fetch the row back to pick up the assigned id
    sqlx::query_as::<_, User>(&format!("SELECT * FROM {table_name} WHERE email = ?"))
        .bind(email)
        .fetch_one(pool)
        .await
        .map_err(UserError::from)
}

pub(super) async fn delete_user_sqlite(pool: &Pool<Sqlite>, id: i64) -> Result<(), UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query(&format!("DELETE FROM {table_name} WHERE id = ?"))
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

pub(super) fn map_insert_error(err: sqlx::Error, email: &str) -> UserError {
    match err.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => {
            UserError::DuplicateEmail(email.to_string())
        }
        _ => UserError::from(err),
    }
}
