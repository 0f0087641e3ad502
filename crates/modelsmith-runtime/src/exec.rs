use chrono::NaiveDateTime;
use sqlx::mysql::{MySqlQueryResult, MySqlRow};
use sqlx::Row;

use crate::connection::Connections;
use crate::error::RuntimeError;
use crate::spec::Record;
use crate::statement::{select_statement, QueryOptions};
use crate::value::{bind_all, Value};

/// Field types a column can be decoded into.
pub trait FromColumn: Sized {
    fn decode(row: &MySqlRow, index: usize) -> Result<Option<Self>, RuntimeError>;
}

macro_rules! from_column {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromColumn for $ty {
                fn decode(row: &MySqlRow, index: usize) -> Result<Option<Self>, RuntimeError> {
                    row.try_get::<Option<$ty>, _>(index)
                        .map_err(|source| RuntimeError::Decode { index, source })
                }
            }
        )*
    };
}

from_column!(i64, f64, NaiveDateTime, String);

// Boolean columns are selected as `CAST(... AS SIGNED)`.
impl FromColumn for bool {
    fn decode(row: &MySqlRow, index: usize) -> Result<Option<Self>, RuntimeError> {
        i64::decode(row, index).map(|value| value.map(|value| value != 0))
    }
}

/// Decode column `index` as an optional value. Used by generated nilable
/// types so a `NULL` never fails a scan.
pub fn column<T: FromColumn>(row: &MySqlRow, index: usize) -> Result<Option<T>, RuntimeError> {
    T::decode(row, index)
}

/// Run a statement against the record's database.
pub async fn execute(
    conns: &Connections,
    database: &str,
    sql: &str,
    args: &[Value],
) -> Result<MySqlQueryResult, RuntimeError> {
    let pool = conns.get(database).await?;
    let result = bind_all(sqlx::query(sql), args).execute(&pool).await?;
    Ok(result)
}

/// Read every row matching `predicate`.
pub async fn fetch_all<R: Record>(
    conns: &Connections,
    predicate: &str,
    args: &[Value],
    options: &QueryOptions,
) -> Result<Vec<R>, RuntimeError> {
    let sql = select_statement(R::TABLE, R::columns(), predicate, options);
    let pool = conns.get(R::DATABASE).await?;
    let rows = bind_all(sqlx::query(&sql), args).fetch_all(&pool).await?;
    rows.iter().map(R::from_row).collect()
}

/// Read the first row matching `predicate`, if any.
pub async fn fetch_one<R: Record>(
    conns: &Connections,
    predicate: &str,
    args: &[Value],
) -> Result<Option<R>, RuntimeError> {
    let options = QueryOptions::default().limit(1);
    let sql = select_statement(R::TABLE, R::columns(), predicate, &options);
    let pool = conns.get(R::DATABASE).await?;
    let row = bind_all(sqlx::query(&sql), args)
        .fetch_optional(&pool)
        .await?;
    row.as_ref().map(R::from_row).transpose()
}
