use modelsmith_core::{ColumnDescriptor, ResolvedField, TargetKind, TargetType};
use modelsmith_introspect::CatalogReader;
use tracing::debug;

use crate::errors::GenerationError;
use crate::names;

/// Kind implied by the declared type alone; `None` for small integers,
/// which need a data probe.
pub fn declared_kind(column: &ColumnDescriptor) -> Option<TargetKind> {
    match column.type_family().as_str() {
        "int" | "mediumint" => Some(TargetKind::Integer),
        "tinyint" | "smallint" => None,
        "float" | "decimal" => Some(TargetKind::Float),
        "date" | "datetime" | "timestamp" => Some(TargetKind::Timestamp),
        _ => Some(TargetKind::Text),
    }
}

/// True when every observed value is `0`, `1`, empty or `NULL`.
pub fn is_boolean_sample(samples: &[Option<String>]) -> bool {
    samples.iter().all(|value| match value.as_deref().map(str::trim) {
        None | Some("") | Some("0") | Some("1") => true,
        Some(_) => false,
    })
}

/// Resolve a column's kind, given its probe samples when it needed one.
///
/// Primary-key columns never resolve to boolean.
pub fn resolve_kind(column: &ColumnDescriptor, samples: Option<&[Option<String>]>) -> TargetKind {
    let kind = match declared_kind(column) {
        Some(kind) => kind,
        None if samples.is_some_and(is_boolean_sample) => TargetKind::Boolean,
        None => TargetKind::Integer,
    };

    if column.is_primary() && kind == TargetKind::Boolean {
        TargetKind::Integer
    } else {
        kind
    }
}

/// Build the resolved field for a column whose kind is known.
pub fn resolved_field(column: &ColumnDescriptor, ident: String, kind: TargetKind) -> ResolvedField {
    ResolvedField {
        ident,
        target: TargetType::new(kind, column.nullable),
        is_primary_key: column.is_primary(),
        default_literal: column.default_value.clone(),
        column: column.clone(),
    }
}

/// Resolve every column of a table, probing small-integer columns.
///
/// A failed probe aborts the whole table.
pub async fn resolve_fields(
    catalog: &dyn CatalogReader,
    database: &str,
    table: &str,
    columns: &[ColumnDescriptor],
) -> Result<Vec<ResolvedField>, GenerationError> {
    let idents = names::field_idents(columns.iter().map(|column| column.name.as_str()));
    let mut fields = Vec::with_capacity(columns.len());

    for (column, ident) in columns.iter().zip(idents) {
        let samples = if declared_kind(column).is_none() {
            let values = catalog
                .sample_distinct(database, table, &column.name)
                .await
                .map_err(|err| GenerationError::Probe {
                    table: table.to_string(),
                    column: column.name.clone(),
                    message: err.to_string(),
                })?;
            debug!(table, column = %column.name, distinct = values.len(), "column probed");
            Some(values)
        } else {
            None
        };

        let kind = resolve_kind(column, samples.as_deref());
        fields.push(resolved_field(column, ident, kind));
    }

    Ok(fields)
}
