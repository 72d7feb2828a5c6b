//! Connection pool and schema bootstrap

pub mod question;

use std::{str::FromStr, time::Duration};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};

use crate::config::Config;

const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS questions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        text TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS answers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        text TEXT NOT NULL,
        is_correct BOOLEAN NOT NULL DEFAULT 0,
        question_id INTEGER NOT NULL REFERENCES questions (id) ON DELETE CASCADE
    )",
    "CREATE INDEX IF NOT EXISTS idx_answers_question_id ON answers (question_id)",
];

/// 初始化数据库
pub async fn init_db(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let pool = connect(&config.database_url, config.max_connections).await?;
    init_schema(&pool).await?;
    Ok(pool)
}

/// Open a pool with foreign key enforcement on every connection
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));
    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Test fixture: in-memory database on a single long-lived connection.
///
/// Not for production use; the data is gone once the pool closes.
#[doc(hidden)]
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    init_schema(&pool).await?;
    Ok(pool)
}

/// Create the tables if they do not exist yet
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
