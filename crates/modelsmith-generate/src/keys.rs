use modelsmith_core::{KeyField, KeySet, ResolvedField};

use crate::names;

/// Collect the primary-key fields in catalog order.
pub fn analyze(fields: &[ResolvedField]) -> KeySet {
    KeySet {
        fields: fields
            .iter()
            .filter(|field| field.is_primary_key)
            .map(|field| KeyField {
                param: names::key_param(&field.ident),
                field: field.clone(),
            })
            .collect(),
    }
}
