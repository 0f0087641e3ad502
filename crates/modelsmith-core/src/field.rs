use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::column::ColumnDescriptor;

/// Field type family a column resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Integer,
    Boolean,
    Float,
    Timestamp,
    Text,
}

impl TargetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetKind::Integer => "integer",
            TargetKind::Boolean => "boolean",
            TargetKind::Float => "float",
            TargetKind::Timestamp => "timestamp",
            TargetKind::Text => "text",
        }
    }
}

/// A resolved field type: a kind plus the nullable wrapper flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct TargetType {
    pub kind: TargetKind,
    pub nullable: bool,
}

impl TargetType {
    pub fn new(kind: TargetKind, nullable: bool) -> Self {
        Self { kind, nullable }
    }
}

/// A column with its resolved type and generated identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResolvedField {
    /// The originating catalog column, carried losslessly into annotations.
    pub column: ColumnDescriptor,
    /// Identifier used for the record field.
    pub ident: String,
    pub target: TargetType,
    pub is_primary_key: bool,
    pub default_literal: Option<String>,
}

impl ResolvedField {
    pub fn name(&self) -> &str {
        &self.column.name
    }

    pub fn kind(&self) -> TargetKind {
        self.target.kind
    }
}
