// Code generated by modelsmith from `shop`.`customers`. DO NOT EDIT.
// Hand-written code belongs in customers_extended.rs.

use modelsmith_runtime::sqlx::mysql::{MySqlQueryResult, MySqlRow};
use modelsmith_runtime::{
    ColumnSpec, Connections, FieldKind, KeyRole, QueryOptions, Record, Result, Value,
};

pub const DATABASE: &str = "shop";
pub const TABLE: &str = "customers";

/// Catalog facts for every column, in catalog order.
pub const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        column: "id",
        kind: FieldKind::Integer,
        default: None,
        data_type: "int",
        column_type: "int(11)",
        key: KeyRole::Primary,
        nullable: false,
        extra: None,
    },
    ColumnSpec {
        column: "email",
        kind: FieldKind::Text,
        default: None,
        data_type: "varchar",
        column_type: "varchar(255)",
        key: KeyRole::None,
        nullable: false,
        extra: None,
    },
];

/// Row of `shop`.`customers`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Customers {
    /// `id` int(11), primary key, not null
    pub id: i64,
    /// `email` varchar(255), not null
    pub email: String,
}

/// Decoding target for [`Customers`]; every field is optional so a scan never fails on `NULL`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomersNilable {
    pub id: Option<i64>,
    pub email: Option<String>,
}

impl CustomersNilable {
    fn from_row(row: &MySqlRow) -> Result<Self> {
        Ok(Self {
            id: modelsmith_runtime::column(row, 0)?,
            email: modelsmith_runtime::column(row, 1)?,
        })
    }

    fn into_record(self) -> Customers {
        Customers {
            id: self.id.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
        }
    }
}

impl Record for Customers {
    const DATABASE: &'static str = DATABASE;
    const TABLE: &'static str = TABLE;

    fn columns() -> &'static [ColumnSpec] {
        COLUMNS
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.id),
            Value::from(self.email.clone()),
        ]
    }

    fn from_row(row: &MySqlRow) -> Result<Self> {
        CustomersNilable::from_row(row).map(CustomersNilable::into_record)
    }
}

impl Customers {
    /// Insert this row, or update it when its key already exists.
    ///
    /// Values are checked against enum and set columns before anything is sent.
    /// When `id` is empty the id assigned by the database is written back.
    pub async fn save(&mut self, conns: &Connections) -> Result<MySqlQueryResult> {
        let new_record = self.id == 0;
        let statement = modelsmith_runtime::build_upsert(&*self)?;
        let result =
            modelsmith_runtime::execute(conns, DATABASE, &statement.sql, &statement.args).await?;
        if new_record && result.last_insert_id() != 0 {
            self.id = result.last_insert_id() as i64;
        }
        Ok(result)
    }

    /// Delete this row by its key.
    pub async fn delete(&self, conns: &Connections) -> Result<MySqlQueryResult> {
        modelsmith_runtime::execute(
            conns,
            DATABASE,
            "DELETE FROM `customers` WHERE `id` = ?",
            &[Value::from(self.id)],
        )
        .await
    }
}

/// Read the row with the given key.
pub async fn read_by_key(conns: &Connections, id: i64) -> Result<Option<Customers>> {
    read_one_by_query(
        conns,
        "`id` = ?",
        &[Value::from(id)],
    )
    .await
}

/// Read every row, applying the optional ordering and limit.
pub async fn read_all(conns: &Connections, options: &QueryOptions) -> Result<Vec<Customers>> {
    modelsmith_runtime::fetch_all::<Customers>(conns, "", &[], options).await
}

/// Read the rows matching `predicate`, binding `args` to its placeholders in order.
pub async fn read_by_query(
    conns: &Connections,
    predicate: &str,
    args: &[Value],
    options: &QueryOptions,
) -> Result<Vec<Customers>> {
    modelsmith_runtime::fetch_all::<Customers>(conns, predicate, args, options).await
}

/// Read the first row matching `predicate`, if any.
pub async fn read_one_by_query(
    conns: &Connections,
    predicate: &str,
    args: &[Value],
) -> Result<Option<Customers>> {
    modelsmith_runtime::fetch_one::<Customers>(conns, predicate, args).await
}

/// Run any statement against this table's database.
pub async fn exec(conns: &Connections, sql: &str, args: &[Value]) -> Result<MySqlQueryResult> {
    modelsmith_runtime::execute(conns, DATABASE, sql, args).await
}
