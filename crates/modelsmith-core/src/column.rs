use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Key role recorded for a column in the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum KeyRole {
    #[default]
    None,
    Primary,
    Unique,
    Index,
}

impl KeyRole {
    /// Parse the `COLUMN_KEY` value MySQL reports (`PRI`, `UNI`, `MUL` or empty).
    pub fn from_catalog(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PRI" => KeyRole::Primary,
            "UNI" => KeyRole::Unique,
            "MUL" => KeyRole::Index,
            _ => KeyRole::None,
        }
    }

    /// The catalog spelling of this role.
    pub fn as_catalog(self) -> &'static str {
        match self {
            KeyRole::None => "",
            KeyRole::Primary => "PRI",
            KeyRole::Unique => "UNI",
            KeyRole::Index => "MUL",
        }
    }
}

/// One catalog column, as read from `information_schema.columns`.
///
/// Descriptors are produced fresh for every run and never mutated; their
/// order is the catalog's ordinal order and becomes field declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnDescriptor {
    pub name: String,
    pub nullable: bool,
    #[serde(default)]
    pub key_role: KeyRole,
    /// Catalog type name (`int`, `tinyint`, `varchar`, `datetime`, ...).
    pub declared_type: String,
    /// Full type string (`int(10) unsigned`, `enum('a','b')`, ...).
    pub full_type: String,
    /// Declared default; `None` when there is none or it is `NULL`.
    #[serde(default)]
    pub default_value: Option<String>,
    /// Extra flags such as `auto_increment`.
    #[serde(default)]
    pub extra: Option<String>,
}

impl ColumnDescriptor {
    pub fn is_primary(&self) -> bool {
        self.key_role == KeyRole::Primary
    }

    pub fn is_auto_increment(&self) -> bool {
        self.extra
            .as_deref()
            .is_some_and(|extra| extra.to_ascii_lowercase().contains("auto_increment"))
    }

    /// Lowercased declared type, used for type-family matching.
    pub fn type_family(&self) -> String {
        self.declared_type.trim().to_ascii_lowercase()
    }

    /// `tinyint` and `smallint` columns need a data probe to be typed.
    pub fn is_small_integer(&self) -> bool {
        matches!(self.type_family().as_str(), "tinyint" | "smallint")
    }
}

/// Parse the catalog's `IS_NULLABLE` value.
pub fn parse_nullable(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("YES")
}

/// Normalize a catalog default: the literal `NULL` (any case) means no default.
pub fn normalize_default(raw: Option<&str>) -> Option<String> {
    match raw {
        Some(value) if value.trim().eq_ignore_ascii_case("null") => None,
        Some(value) => Some(value.to_string()),
        None => None,
    }
}

/// Drop repeated column names, keeping the first occurrence in catalog order.
pub fn dedupe_columns(columns: Vec<ColumnDescriptor>) -> Vec<ColumnDescriptor> {
    let mut seen = HashSet::new();
    columns
        .into_iter()
        .filter(|column| seen.insert(column.name.clone()))
        .collect()
}

/// Apply the column rules to descriptors from any catalog reader: repeated
/// names keep their first occurrence and a `NULL` default becomes no default.
pub fn normalize_columns(columns: Vec<ColumnDescriptor>) -> Vec<ColumnDescriptor> {
    dedupe_columns(columns)
        .into_iter()
        .map(|mut column| {
            column.default_value = normalize_default(column.default_value.as_deref());
            column
        })
        .collect()
}
