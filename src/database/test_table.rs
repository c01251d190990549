// Queries against the round-trip test table.
// Unquoted identifiers fold to lowercase in PostgreSQL, so the table and its
// columns are `testtable`, `id` and `number` once created.

use anyhow::{Context, Result};
use sqlx::{Connection, PgConnection, Postgres, Row, Transaction};
use sqlx::postgres::PgRow;

// Advisory lock key serializing the DDL across sessions ("TestTabl" in ASCII)
const CREATE_TABLE_LOCK_KEY: i64 = 0x5465_7374_5461_626C;

const CREATE_TABLE_SQL: &str =
    "CREATE TABLE IF NOT EXISTS TestTable(Id serial PRIMARY KEY, Number integer NOT NULL);";
const INSERT_NUMBER_SQL: &str = "INSERT INTO TestTable (Number) VALUES ($1);";
const SELECT_ALL_SQL: &str = "SELECT * FROM TestTable;";

/// Creates the table when missing; a no-op otherwise.
/// Two sessions racing on `CREATE TABLE IF NOT EXISTS` can both miss the table
/// and collide in `pg_type`, so creation runs under a transaction-scoped
/// advisory lock and concurrent first calls queue behind each other.
pub async fn ensure_table(conn: &mut PgConnection) -> Result<()> {
    let mut tx: Transaction<'_, Postgres> = conn
        .begin()
        .await
        .context("Failed to begin TestTable creation")?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(CREATE_TABLE_LOCK_KEY)
        .execute(&mut *tx)
        .await
        .context("Failed to lock TestTable creation")?;

    sqlx::query(CREATE_TABLE_SQL)
        .execute(&mut *tx)
        .await
        .context("Failed to create TestTable")?;

    // Commit releases the advisory lock
    tx.commit().await.context("Failed to commit TestTable creation")?;
    Ok(())
}

/// Inserts one record; the id is assigned by the server
pub async fn insert_number(conn: &mut PgConnection, number: i32) -> Result<()> {
    sqlx::query(INSERT_NUMBER_SQL)
        .bind(number)
        .execute(&mut *conn)
        .await
        .context("Failed to insert into TestTable")?;
    Ok(())
}

/// Reads every stored number in whatever order the server returns the rows
pub async fn fetch_numbers(conn: &mut PgConnection) -> Result<Vec<i32>> {
    let rows: Vec<PgRow> = sqlx::query(SELECT_ALL_SQL)
        .fetch_all(&mut *conn)
        .await
        .context("Failed to read TestTable")?;

    rows.iter()
        .map(|row: &PgRow| {
            row.try_get::<i32, _>("number")
                .context("Failed to decode TestTable.Number")
        })
        .collect()
}
