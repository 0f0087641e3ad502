use crate::error::RuntimeError;
use crate::spec::ColumnSpec;
use crate::value::Value;

/// How one column is filled in an upsert.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// Bind this value to a placeholder.
    Bind(Value),
    /// Let the database apply the column default.
    Default,
}

/// Literal members of an `enum('…')` or `set('…')` column type.
///
/// Returns `None` for any other type string. MySQL escapes a quote inside a
/// member as `''`.
pub fn literal_members(column_type: &str) -> Option<Vec<String>> {
    let lowered = column_type.to_ascii_lowercase();
    let open = ["enum('", "set('"]
        .iter()
        .find_map(|prefix| lowered.find(prefix).map(|idx| idx + prefix.len()))?;
    let close = column_type.rfind("')")?;
    if close < open {
        return None;
    }

    Some(
        column_type[open..close]
            .split("','")
            .map(|member| member.replace("''", "'"))
            .collect(),
    )
}

fn is_set(column_type: &str) -> bool {
    column_type.to_ascii_lowercase().trim_start().starts_with("set(")
}

/// Reject text values outside an enum/set column's permitted members.
pub fn check_members(spec: &ColumnSpec, value: &Value) -> Result<(), RuntimeError> {
    let Some(text) = value.as_text() else {
        return Ok(());
    };
    let Some(members) = literal_members(spec.column_type) else {
        return Ok(());
    };

    let candidates: Vec<&str> = if is_set(spec.column_type) {
        if text.is_empty() {
            Vec::new()
        } else {
            text.split(',').collect()
        }
    } else {
        vec![text]
    };

    for candidate in candidates {
        if !members.iter().any(|member| member == candidate) {
            return Err(RuntimeError::Validation(format!(
                "invalid value '{candidate}' for column {}; permitted values are: {}",
                spec.column,
                members.join(", ")
            )));
        }
    }

    Ok(())
}

/// Decide what an upsert writes for one column.
///
/// Key columns are written as given, except an empty auto-increment key which
/// is sent as `NULL` so the database assigns it. Absent non-key values fall
/// back to the declared default; with no default a non-nullable column is a
/// validation error.
pub fn prepare(spec: &ColumnSpec, value: Value) -> Result<Slot, RuntimeError> {
    if spec.is_primary() {
        if spec.is_auto_increment() && value.is_zero_key() {
            return Ok(Slot::Bind(Value::Null));
        }
        check_members(spec, &value)?;
        return Ok(Slot::Bind(value));
    }

    if value.is_absent() {
        if spec.default.is_some() {
            return Ok(Slot::Default);
        }
        if !spec.nullable {
            return Err(RuntimeError::Validation(format!(
                "you must provide a value for column: {}",
                spec.column
            )));
        }
        if value == Value::Null {
            return Ok(Slot::Bind(value));
        }
    }

    check_members(spec, &value)?;
    Ok(Slot::Bind(value))
}
