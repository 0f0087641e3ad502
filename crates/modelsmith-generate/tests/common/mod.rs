#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use modelsmith_core::{
    CatalogSnapshot, ColumnDescriptor, ForeignKey, KeyRole, Result, TableSnapshot,
};
use modelsmith_generate::{DiskScaffolder, Formatter, GenerateOptions, Generator};
use modelsmith_introspect::{CatalogReader, SnapshotCatalog};

pub const DATABASE: &str = "shop";

pub fn temp_out_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "modelsmith_generate_{label}_{}",
        uuid::Uuid::new_v4()
    ));
    std::fs::create_dir_all(&dir).expect("create temp out dir");
    dir
}

pub fn column(name: &str, declared_type: &str, full_type: &str) -> ColumnDescriptor {
    ColumnDescriptor {
        name: name.to_string(),
        nullable: false,
        key_role: KeyRole::None,
        declared_type: declared_type.to_string(),
        full_type: full_type.to_string(),
        default_value: None,
        extra: None,
    }
}

pub fn primary(mut column: ColumnDescriptor) -> ColumnDescriptor {
    column.key_role = KeyRole::Primary;
    column
}

pub fn nullable(mut column: ColumnDescriptor) -> ColumnDescriptor {
    column.nullable = true;
    column
}

pub fn table(name: &str, columns: Vec<ColumnDescriptor>) -> TableSnapshot {
    TableSnapshot {
        name: name.to_string(),
        columns,
        foreign_keys: Vec::new(),
        samples: BTreeMap::new(),
    }
}

pub fn samples(values: &[&str]) -> Vec<Option<String>> {
    values.iter().map(|value| Some(value.to_string())).collect()
}

/// `customers`, `orders` (single auto-increment key, probed tinyints and a
/// foreign key to `customers`), `order_items` (composite key) and
/// `audit_log` (no key).
pub fn shop_snapshot() -> CatalogSnapshot {
    let customers = table(
        "customers",
        vec![
            primary(column("id", "int", "int(11)")),
            column("email", "varchar", "varchar(255)"),
        ],
    );

    let mut id = primary(column("id", "int", "int(11)"));
    id.extra = Some("auto_increment".to_string());
    let mut status = column("status", "enum", "enum('active','closed')");
    status.default_value = Some("active".to_string());

    let mut orders = table(
        "orders",
        vec![
            id,
            column("customer_id", "int", "int(11)"),
            status,
            column("is_paid", "tinyint", "tinyint(1)"),
            column("priority", "tinyint", "tinyint(4)"),
            nullable(column("placed_at", "datetime", "datetime")),
            nullable(column("note", "varchar", "varchar(200)")),
        ],
    );
    orders
        .samples
        .insert("is_paid".to_string(), vec![Some("0".to_string()), Some("1".to_string()), None]);
    orders
        .samples
        .insert("priority".to_string(), samples(&["0", "1", "5"]));
    orders.foreign_keys.push(ForeignKey {
        name: "fk_orders_customer".to_string(),
        columns: vec!["customer_id".to_string()],
        referenced_table: "customers".to_string(),
        referenced_columns: vec!["id".to_string()],
    });

    let order_items = table(
        "order_items",
        vec![
            primary(column("order_id", "int", "int(11)")),
            primary(column("line_no", "int", "int(11)")),
            column("sku", "varchar", "varchar(40)"),
            column("quantity", "int", "int(11)"),
        ],
    );

    let audit_log = table(
        "audit_log",
        vec![
            column("message", "text", "text"),
            column("logged_at", "timestamp", "timestamp"),
        ],
    );

    // `flag` is a tinyint with no recorded samples, so probing it fails.
    let flags = table(
        "flags",
        vec![
            primary(column("id", "int", "int(11)")),
            column("flag", "tinyint", "tinyint(1)"),
        ],
    );

    let mut snapshot = CatalogSnapshot::new("mysql", DATABASE);
    snapshot.tables = vec![customers, orders, order_items, audit_log, flags];
    snapshot
}

pub fn shop_catalog() -> Arc<dyn CatalogReader> {
    Arc::new(SnapshotCatalog::new(shop_snapshot()).expect("supported snapshot"))
}

pub fn options(out_dir: PathBuf) -> GenerateOptions {
    GenerateOptions {
        database: DATABASE.to_string(),
        out_dir,
        workers: 2,
        ..GenerateOptions::default()
    }
}

pub fn generator(catalog: Arc<dyn CatalogReader>, options: GenerateOptions) -> Generator {
    Generator::new(
        catalog,
        Arc::new(DiskScaffolder::new(Formatter::None)),
        options,
    )
}

/// Catalog that answers column reads slowly.
pub struct SlowCatalog {
    pub inner: Arc<dyn CatalogReader>,
    pub delay: Duration,
}

#[async_trait]
impl CatalogReader for SlowCatalog {
    fn engine(&self) -> &'static str {
        "slow"
    }

    async fn list_tables(&self, database: &str) -> Result<Vec<String>> {
        self.inner.list_tables(database).await
    }

    async fn read_columns(&self, database: &str, table: &str) -> Result<Vec<ColumnDescriptor>> {
        tokio::time::sleep(self.delay).await;
        self.inner.read_columns(database, table).await
    }

    async fn read_foreign_keys(&self, database: &str, table: &str) -> Result<Vec<ForeignKey>> {
        self.inner.read_foreign_keys(database, table).await
    }

    async fn sample_distinct(
        &self,
        database: &str,
        table: &str,
        column: &str,
    ) -> Result<Vec<Option<String>>> {
        self.inner.sample_distinct(database, table, column).await
    }
}

/// Catalog whose column read panics for one table.
pub struct PanickingCatalog {
    pub inner: Arc<dyn CatalogReader>,
    pub table: String,
}

#[async_trait]
impl CatalogReader for PanickingCatalog {
    fn engine(&self) -> &'static str {
        "panicking"
    }

    async fn list_tables(&self, database: &str) -> Result<Vec<String>> {
        self.inner.list_tables(database).await
    }

    async fn read_columns(&self, database: &str, table: &str) -> Result<Vec<ColumnDescriptor>> {
        if table == self.table {
            panic!("catalog read for {table} blew up");
        }
        self.inner.read_columns(database, table).await
    }

    async fn read_foreign_keys(&self, database: &str, table: &str) -> Result<Vec<ForeignKey>> {
        self.inner.read_foreign_keys(database, table).await
    }

    async fn sample_distinct(
        &self,
        database: &str,
        table: &str,
        column: &str,
    ) -> Result<Vec<Option<String>>> {
        self.inner.sample_distinct(database, table, column).await
    }
}
