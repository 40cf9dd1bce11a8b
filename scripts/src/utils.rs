use crate::config;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode},
};
use std::str::FromStr;

pub async fn run_migrations(db_pool: &sqlx::SqlitePool, file_name: &str) -> anyhow::Result<()> {
    let tera = tera::Tera::new("../migrations/**/*.sql")?;

    let migration_query = tera.render(file_name, &tera::Context::new())?;

    sqlx::raw_sql(&migration_query).execute(db_pool).await?;
    Ok(())
}

pub async fn list_tables(db_pool: &sqlx::SqlitePool) -> anyhow::Result<Vec<String>> {
    Ok(sqlx::query_scalar::<_, String>(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )
    .fetch_all(db_pool)
    .await?)
}

/// Encrypted with sqlcipher in prod, same pragmas as the web app
pub async fn setup_sqlite_db_pool(app_config: &config::AppConfig) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&app_config.db_host)?
        .create_if_missing(true)
        .pragma("foreign_keys", "ON");

    if app_config.is_prod() {
        return Ok(SqlitePool::connect_with(
            options
                .pragma("key", app_config.db_pass_encrypt.to_string())
                .pragma("cipher_page_size", "1024")
                .pragma("kdf_iter", "64000")
                .pragma("cipher_hmac_algorithm", "HMAC_SHA1")
                .pragma("cipher_kdf_algorithm", "PBKDF2_HMAC_SHA1")
                .journal_mode(SqliteJournalMode::Delete),
        )
        .await?);
    }

    Ok(SqlitePool::connect_with(options).await?)
}
