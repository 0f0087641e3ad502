use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

use modelsmith_core::{Error, Result};

// information_schema columns are cast to CHAR so they decode as text on
// servers that report them with a binary collation.

fn db_error(err: sqlx::Error) -> Error {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            Error::Connection(err.to_string())
        }
        other => Error::Db(other.to_string()),
    }
}

fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

pub async fn list_tables(pool: &MySqlPool, schema: &str) -> Result<Vec<String>> {
    sqlx::query_scalar::<_, String>(
        "SELECT CAST(table_name AS CHAR) FROM information_schema.tables \
         WHERE table_schema = ? AND table_type IN ('BASE TABLE', 'VIEW') ORDER BY table_name",
    )
    .bind(schema)
    .fetch_all(pool)
    .await
    .map_err(db_error)
}

pub struct RawColumn {
    pub name: String,
    pub is_nullable: String,
    pub column_key: String,
    pub data_type: String,
    pub column_type: String,
    pub column_default: Option<String>,
    pub extra: Option<String>,
}

impl RawColumn {
    fn from_row(row: &MySqlRow) -> std::result::Result<Self, sqlx::Error> {
        Ok(Self {
            name: row.try_get("column_name")?,
            is_nullable: row.try_get("is_nullable")?,
            column_key: row.try_get::<Option<String>, _>("column_key")?.unwrap_or_default(),
            data_type: row.try_get("data_type")?,
            column_type: row.try_get("column_type")?,
            column_default: row.try_get("column_default")?,
            extra: row.try_get("extra")?,
        })
    }
}

pub async fn list_columns(pool: &MySqlPool, schema: &str, table: &str) -> Result<Vec<RawColumn>> {
    let rows = sqlx::query(
        r#"
        SELECT
          CAST(column_name AS CHAR) AS column_name,
          CAST(is_nullable AS CHAR) AS is_nullable,
          CAST(column_key AS CHAR) AS column_key,
          CAST(data_type AS CHAR) AS data_type,
          CAST(column_type AS CHAR) AS column_type,
          CAST(column_default AS CHAR) AS column_default,
          CAST(extra AS CHAR) AS extra
        FROM information_schema.columns
        WHERE table_schema = ? AND table_name = ?
        ORDER BY ordinal_position
        "#,
    )
    .bind(schema)
    .bind(table)
    .fetch_all(pool)
    .await
    .map_err(db_error)?;

    rows.iter()
        .map(RawColumn::from_row)
        .collect::<std::result::Result<_, _>>()
        .map_err(db_error)
}

pub struct RawForeignKeyColumn {
    pub constraint_name: String,
    pub column_name: String,
    pub referenced_table: String,
    pub referenced_column: String,
}

impl RawForeignKeyColumn {
    fn from_row(row: &MySqlRow) -> std::result::Result<Self, sqlx::Error> {
        Ok(Self {
            constraint_name: row.try_get("constraint_name")?,
            column_name: row.try_get("column_name")?,
            referenced_table: row.try_get("referenced_table_name")?,
            referenced_column: row.try_get("referenced_column_name")?,
        })
    }
}

pub async fn list_foreign_key_columns(
    pool: &MySqlPool,
    schema: &str,
    table: &str,
) -> Result<Vec<RawForeignKeyColumn>> {
    let rows = sqlx::query(
        r#"
        SELECT
          CAST(constraint_name AS CHAR) AS constraint_name,
          CAST(column_name AS CHAR) AS column_name,
          CAST(referenced_table_name AS CHAR) AS referenced_table_name,
          CAST(referenced_column_name AS CHAR) AS referenced_column_name
        FROM information_schema.key_column_usage
        WHERE table_schema = ?
          AND table_name = ?
          AND referenced_table_schema = ?
          AND referenced_table_name IS NOT NULL
        ORDER BY constraint_name, ordinal_position
        "#,
    )
    .bind(schema)
    .bind(table)
    .bind(schema)
    .fetch_all(pool)
    .await
    .map_err(db_error)?;

    rows.iter()
        .map(RawForeignKeyColumn::from_row)
        .collect::<std::result::Result<_, _>>()
        .map_err(db_error)
}

/// Every distinct value of a column; never limited, since boolean detection
/// must see all of them.
fn distinct_sql(schema: &str, table: &str, column: &str) -> String {
    format!(
        "SELECT DISTINCT CAST({} AS CHAR) FROM {}.{}",
        quote_ident(column),
        quote_ident(schema),
        quote_ident(table)
    )
}

pub async fn sample_distinct(
    pool: &MySqlPool,
    schema: &str,
    table: &str,
    column: &str,
) -> Result<Vec<Option<String>>> {
    sqlx::query_scalar::<_, Option<String>>(&distinct_sql(schema, table, column))
        .fetch_all(pool)
        .await
        .map_err(db_error)
}
