use serde::{Deserialize, Serialize};

use crate::field::{ResolvedField, TargetKind};

/// A primary-key field with the parameter name used in generated signatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyField {
    pub field: ResolvedField,
    pub param: String,
}

/// Shape of a table's primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyShape {
    None,
    Single,
    Composite,
}

/// Ordered primary-key fields of a table, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySet {
    pub fields: Vec<KeyField>,
}

impl KeySet {
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn shape(&self) -> KeyShape {
        match self.fields.len() {
            0 => KeyShape::None,
            1 => KeyShape::Single,
            _ => KeyShape::Composite,
        }
    }

    /// The key field when the key has exactly one column.
    pub fn single(&self) -> Option<&KeyField> {
        match self.fields.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    /// Whether a save should copy the generated id back into the record.
    ///
    /// Only a single integer or text key qualifies; composite keys are
    /// always supplied by the caller.
    pub fn supports_back_assignment(&self) -> bool {
        self.single()
            .is_some_and(|key| matches!(key.field.kind(), TargetKind::Integer | TargetKind::Text))
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|key| key.field.name())
    }
}
