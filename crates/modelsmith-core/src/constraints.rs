use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Foreign key definition preserving column ordering.
///
/// Only references inside the same database are recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ForeignKey {
    pub name: String,
    pub columns: Vec<String>,
    pub referenced_table: String,
    pub referenced_columns: Vec<String>,
}

impl ForeignKey {
    /// Column pairs `(local, referenced)` in constraint order.
    pub fn column_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.referenced_columns.iter().map(String::as_str))
    }

    pub fn is_self_reference(&self, table: &str) -> bool {
        self.referenced_table == table
    }
}
