// Code generated by modelsmith from `shop`.`orders`. DO NOT EDIT.
// Hand-written code belongs in orders_extended.rs.

use modelsmith_runtime::chrono::NaiveDateTime;
use modelsmith_runtime::sqlx::mysql::{MySqlQueryResult, MySqlRow};
use modelsmith_runtime::{
    ColumnSpec, Connections, FieldKind, KeyRole, QueryOptions, Record, Result, Value,
};

pub const DATABASE: &str = "shop";
pub const TABLE: &str = "orders";

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
        extra: Some("auto_increment"),
    },
    ColumnSpec {
        column: "customer_id",
        kind: FieldKind::Integer,
        default: None,
        data_type: "int",
        column_type: "int(11)",
        key: KeyRole::None,
        nullable: false,
        extra: None,
    },
    ColumnSpec {
        column: "status",
        kind: FieldKind::Text,
        default: Some("active"),
        data_type: "enum",
        column_type: "enum('active','closed')",
        key: KeyRole::None,
        nullable: false,
        extra: None,
    },
    ColumnSpec {
        column: "is_paid",
        kind: FieldKind::Boolean,
        default: None,
        data_type: "tinyint",
        column_type: "tinyint(1)",
        key: KeyRole::None,
        nullable: false,
        extra: None,
    },
    ColumnSpec {
        column: "priority",
        kind: FieldKind::Integer,
        default: None,
        data_type: "tinyint",
        column_type: "tinyint(4)",
        key: KeyRole::None,
        nullable: false,
        extra: None,
    },
    ColumnSpec {
        column: "placed_at",
        kind: FieldKind::Timestamp,
        default: None,
        data_type: "datetime",
        column_type: "datetime",
        key: KeyRole::None,
        nullable: true,
        extra: None,
    },
    ColumnSpec {
        column: "note",
        kind: FieldKind::Text,
        default: None,
        data_type: "varchar",
        column_type: "varchar(200)",
        key: KeyRole::None,
        nullable: true,
        extra: None,
    },
];

/// Row of `shop`.`orders`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Orders {
    /// `id` int(11), primary key, not null, auto_increment
    pub id: i64,
    /// `customer_id` int(11), not null
    pub customer_id: i64,
    /// `status` enum('active','closed'), not null, default "active"
    pub status: String,
    /// `is_paid` tinyint(1), not null
    pub is_paid: bool,
    /// `priority` tinyint(4), not null
    pub priority: i64,
    /// `placed_at` datetime, null
    pub placed_at: Option<NaiveDateTime>,
    /// `note` varchar(200), null
    pub note: Option<String>,
}

/// Decoding target for [`Orders`]; every field is optional so a scan never fails on `NULL`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrdersNilable {
    pub id: Option<i64>,
    pub customer_id: Option<i64>,
    pub status: Option<String>,
    pub is_paid: Option<bool>,
    pub priority: Option<i64>,
    pub placed_at: Option<NaiveDateTime>,
    pub note: Option<String>,
}

impl OrdersNilable {
    fn from_row(row: &MySqlRow) -> Result<Self> {
        Ok(Self {
            id: modelsmith_runtime::column(row, 0)?,
            customer_id: modelsmith_runtime::column(row, 1)?,
            status: modelsmith_runtime::column(row, 2)?,
            is_paid: modelsmith_runtime::column(row, 3)?,
            priority: modelsmith_runtime::column(row, 4)?,
            placed_at: modelsmith_runtime::column(row, 5)?,
            note: modelsmith_runtime::column(row, 6)?,
        })
    }

    fn into_record(self) -> Orders {
        Orders {
            id: self.id.unwrap_or_default(),
            customer_id: self.customer_id.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            is_paid: self.is_paid.unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            placed_at: self.placed_at,
            note: self.note,
        }
    }
}

impl Record for Orders {
    const DATABASE: &'static str = DATABASE;
    const TABLE: &'static str = TABLE;

    fn columns() -> &'static [ColumnSpec] {
        COLUMNS
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.id),
            Value::from(self.customer_id),
            Value::from(self.status.clone()),
            Value::from(self.is_paid),
            Value::from(self.priority),
            Value::from(self.placed_at),
            Value::from(self.note.clone()),
        ]
    }

    fn from_row(row: &MySqlRow) -> Result<Self> {
        OrdersNilable::from_row(row).map(OrdersNilable::into_record)
    }
}

impl Orders {
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
            "DELETE FROM `orders` WHERE `id` = ?",
            &[Value::from(self.id)],
        )
        .await
    }

    /// Row of `customers` referenced by `customer_id`.
    pub async fn fetch_customers(&self, conns: &Connections) -> Result<Option<super::super::customers::Customers>> {
        super::super::customers::read_one_by_query(
            conns,
            "`id` = ?",
            &[Value::from(self.customer_id)],
        )
        .await
    }
}

/// Read the row with the given key.
pub async fn read_by_key(conns: &Connections, id: i64) -> Result<Option<Orders>> {
    read_one_by_query(
        conns,
        "`id` = ?",
        &[Value::from(id)],
    )
    .await
}

/// Read every row, applying the optional ordering and limit.
pub async fn read_all(conns: &Connections, options: &QueryOptions) -> Result<Vec<Orders>> {
    modelsmith_runtime::fetch_all::<Orders>(conns, "", &[], options).await
}

/// Read the rows matching `predicate`, binding `args` to its placeholders in order.
pub async fn read_by_query(
    conns: &Connections,
    predicate: &str,
    args: &[Value],
    options: &QueryOptions,
) -> Result<Vec<Orders>> {
    modelsmith_runtime::fetch_all::<Orders>(conns, predicate, args, options).await
}

/// Read the first row matching `predicate`, if any.
pub async fn read_one_by_query(
    conns: &Connections,
    predicate: &str,
    args: &[Value],
) -> Result<Option<Orders>> {
    modelsmith_runtime::fetch_one::<Orders>(conns, predicate, args).await
}

/// Run any statement against this table's database.
pub async fn exec(conns: &Connections, sql: &str, args: &[Value]) -> Result<MySqlQueryResult> {
    modelsmith_runtime::execute(conns, DATABASE, sql, args).await
}
