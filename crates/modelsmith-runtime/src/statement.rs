use crate::error::RuntimeError;
use crate::spec::{ColumnSpec, FieldKind, Record};
use crate::validate::{prepare, Slot};
use crate::value::Value;

/// Optional modifiers appended to a read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Raw `ORDER BY` expression, e.g. `created_at DESC`.
    pub order_by: Option<String>,
    /// Row limit; `None` or `0` means unlimited.
    pub limit: Option<u64>,
}

impl QueryOptions {
    pub fn order_by(mut self, expr: impl Into<String>) -> Self {
        self.order_by = Some(expr.into());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Append `ORDER BY` / `LIMIT` clauses to a statement.
    pub fn apply(&self, sql: &mut String) {
        if let Some(order_by) = self.order_by.as_deref().map(str::trim) {
            if !order_by.is_empty() {
                sql.push_str(" ORDER BY ");
                sql.push_str(order_by);
            }
        }
        if let Some(limit) = self.limit.filter(|limit| *limit > 0) {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
    }
}

/// SQL text plus its positional arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub args: Vec<Value>,
}

/// Quote an identifier with backticks.
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Select-list expression that decodes as the column's field kind.
fn select_expr(spec: &ColumnSpec) -> String {
    let column = quote_ident(spec.column);
    let target = match spec.kind {
        FieldKind::Integer | FieldKind::Boolean => "SIGNED",
        FieldKind::Float => "DOUBLE",
        FieldKind::Timestamp => "DATETIME",
        FieldKind::Text => "CHAR",
    };
    format!("CAST({column} AS {target})")
}

/// Build `SELECT … FROM table [WHERE predicate] [ORDER BY …] [LIMIT …]`.
///
/// The select list follows `columns` exactly so rows can be decoded by
/// position.
pub fn select_statement(
    table: &str,
    columns: &[ColumnSpec],
    predicate: &str,
    options: &QueryOptions,
) -> String {
    let select_list: Vec<String> = columns.iter().map(select_expr).collect();
    let mut sql = format!(
        "SELECT {} FROM {}",
        select_list.join(", "),
        quote_ident(table)
    );

    let predicate = predicate.trim();
    if !predicate.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(predicate);
    }

    options.apply(&mut sql);
    sql
}

/// Build the insert-or-update statement for a record.
///
/// Every value is validated against its column first; the update clause
/// covers all non-key columns and reuses the insert arguments.
pub fn build_upsert<R: Record>(record: &R) -> Result<Statement, RuntimeError> {
    let columns = R::columns();
    let values = record.values();
    if columns.len() != values.len() {
        return Err(RuntimeError::ColumnMismatch {
            table: R::TABLE,
            columns: columns.len(),
            values: values.len(),
        });
    }

    let mut names = Vec::with_capacity(columns.len());
    let mut placeholders = Vec::with_capacity(columns.len());
    let mut updates = Vec::new();
    let mut insert_args = Vec::with_capacity(columns.len());
    let mut update_args = Vec::new();

    for (spec, value) in columns.iter().zip(values) {
        let column = quote_ident(spec.column);
        match prepare(spec, value)? {
            Slot::Bind(value) => {
                placeholders.push("?".to_string());
                if !spec.is_primary() {
                    updates.push(format!("{column} = ?"));
                    update_args.push(value.clone());
                }
                insert_args.push(value);
            }
            Slot::Default => {
                placeholders.push("DEFAULT".to_string());
                if !spec.is_primary() {
                    updates.push(format!("{column} = DEFAULT({column})"));
                }
            }
        }
        names.push(column);
    }

    if updates.is_empty() {
        if let Some(first) = names.first() {
            updates.push(format!("{first} = {first}"));
        }
    }

    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) ON DUPLICATE KEY UPDATE {}",
        quote_ident(R::TABLE),
        names.join(", "),
        placeholders.join(", "),
        updates.join(", ")
    );

    let mut args = insert_args;
    args.extend(update_args);
    Ok(Statement { sql, args })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::KeyRole;

    #[test]
    fn options_append_order_and_limit() {
        let mut sql = "SELECT 1".to_string();
        QueryOptions::default()
            .order_by("id DESC")
            .limit(5)
            .apply(&mut sql);
        assert_eq!(sql, "SELECT 1 ORDER BY id DESC LIMIT 5");

        let mut sql = "SELECT 1".to_string();
        QueryOptions::default().limit(0).apply(&mut sql);
        assert_eq!(sql, "SELECT 1");
    }

    #[test]
    fn select_list_follows_column_order() {
        let columns = [
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
                column: "name",
                kind: FieldKind::Text,
                default: None,
                data_type: "varchar",
                column_type: "varchar(20)",
                key: KeyRole::None,
                nullable: true,
                extra: None,
            },
        ];

        let sql = select_statement("users", &columns, "`id` = ?", &QueryOptions::default());
        assert_eq!(
            sql,
            "SELECT CAST(`id` AS SIGNED), CAST(`name` AS CHAR) FROM `users` WHERE `id` = ?"
        );
    }

    #[test]
    fn identifiers_escape_backticks() {
        assert_eq!(quote_ident("we`ird"), "`we``ird`");
    }
}
