use sqlx::mysql::MySqlRow;

use crate::error::RuntimeError;
use crate::value::Value;

/// Field type family a column was resolved to at generation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Boolean,
    Float,
    Timestamp,
    Text,
}

/// Key role recorded in the catalog (`PRI`, `UNI`, `MUL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    None,
    Primary,
    Unique,
    Index,
}

/// Catalog facts for one column of a generated record.
///
/// Generated modules carry a `COLUMNS` table of these in catalog order; the
/// generic statement builders read it instead of inspecting the record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Column name in the database.
    pub column: &'static str,
    pub kind: FieldKind,
    /// Declared default; `None` when the catalog has none (or `NULL`).
    pub default: Option<&'static str>,
    /// Catalog data type (`int`, `tinyint`, `varchar`, ...).
    pub data_type: &'static str,
    /// Full catalog type string (`int(11) unsigned`, `enum('a','b')`, ...).
    pub column_type: &'static str,
    pub key: KeyRole,
    pub nullable: bool,
    /// Extra flags such as `auto_increment`; `None` when the catalog has none.
    pub extra: Option<&'static str>,
}

impl ColumnSpec {
    pub fn is_primary(&self) -> bool {
        self.key == KeyRole::Primary
    }

    pub fn is_auto_increment(&self) -> bool {
        self.extra
            .is_some_and(|extra| extra.to_ascii_lowercase().contains("auto_increment"))
    }
}

/// A generated row type bound to one table.
pub trait Record: Sized + Send + Unpin {
    const DATABASE: &'static str;
    const TABLE: &'static str;

    /// Column table in catalog order.
    fn columns() -> &'static [ColumnSpec];

    /// Field values in the same order as [`Record::columns`].
    fn values(&self) -> Vec<Value>;

    /// Decode a row selected with [`crate::select_statement`].
    fn from_row(row: &MySqlRow) -> Result<Self, RuntimeError>;
}
