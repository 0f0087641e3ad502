use modelsmith_core::{
    ColumnDescriptor, ForeignKey, KeyRole, dedupe_columns, normalize_default, parse_nullable,
};

use super::queries::{RawColumn, RawForeignKeyColumn};

pub fn map_columns(raw: Vec<RawColumn>) -> Vec<ColumnDescriptor> {
    let columns = raw
        .into_iter()
        .map(|col| ColumnDescriptor {
            name: col.name,
            nullable: parse_nullable(&col.is_nullable),
            key_role: KeyRole::from_catalog(&col.column_key),
            declared_type: col.data_type,
            full_type: col.column_type,
            default_value: normalize_default(col.column_default.as_deref()),
            extra: col.extra.filter(|extra| !extra.trim().is_empty()),
        })
        .collect();
    dedupe_columns(columns)
}

/// Group per-column rows (ordered by constraint then position) into keys.
pub fn map_foreign_keys(raw: Vec<RawForeignKeyColumn>) -> Vec<ForeignKey> {
    let mut keys: Vec<ForeignKey> = Vec::new();

    for row in raw {
        match keys.last_mut() {
            Some(current) if current.name == row.constraint_name => {
                current.columns.push(row.column_name);
                current.referenced_columns.push(row.referenced_column);
            }
            _ => keys.push(ForeignKey {
                name: row.constraint_name,
                columns: vec![row.column_name],
                referenced_table: row.referenced_table,
                referenced_columns: vec![row.referenced_column],
            }),
        }
    }

    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, key: &str, default: Option<&str>, extra: Option<&str>) -> RawColumn {
        RawColumn {
            name: name.to_string(),
            is_nullable: "NO".to_string(),
            column_key: key.to_string(),
            data_type: "int".to_string(),
            column_type: "int(11)".to_string(),
            column_default: default.map(str::to_string),
            extra: extra.map(str::to_string),
        }
    }

    #[test]
    fn maps_catalog_flags() {
        let mut status = raw("status", "", Some("NULL"), Some(""));
        status.is_nullable = "YES".to_string();
        status.data_type = "enum".to_string();
        status.column_type = "enum('active','paused')".to_string();

        let columns = map_columns(vec![
            raw("id", "PRI", None, Some("auto_increment")),
            status,
            raw("customer_id", "MUL", Some("0"), None),
        ]);

        assert_eq!(columns[0].key_role, KeyRole::Primary);
        assert!(columns[0].is_auto_increment());
        assert!(columns[1].nullable);
        assert_eq!(columns[1].default_value, None);
        assert_eq!(columns[1].extra, None);
        assert_eq!(columns[1].full_type, "enum('active','paused')");
        assert_eq!(columns[2].key_role, KeyRole::Index);
        assert_eq!(columns[2].default_value.as_deref(), Some("0"));
    }

    #[test]
    fn repeated_column_rows_collapse() {
        let columns = map_columns(vec![
            raw("id", "PRI", None, None),
            raw("id", "MUL", None, None),
            raw("total", "", None, None),
        ]);
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "total"]);
        assert_eq!(columns[0].key_role, KeyRole::Primary);
    }

    #[test]
    fn groups_composite_foreign_keys() {
        let row = |constraint: &str, column: &str, table: &str, referenced: &str| {
            RawForeignKeyColumn {
                constraint_name: constraint.to_string(),
                column_name: column.to_string(),
                referenced_table: table.to_string(),
                referenced_column: referenced.to_string(),
            }
        };

        let keys = map_foreign_keys(vec![
            row("fk_customer", "customer_id", "customers", "id"),
            row("fk_line", "order_id", "order_lines", "order_id"),
            row("fk_line", "line_no", "order_lines", "line_no"),
        ]);

        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].columns, vec!["customer_id"]);
        assert_eq!(keys[1].columns, vec!["order_id", "line_no"]);
        assert_eq!(keys[1].referenced_columns, vec!["order_id", "line_no"]);
    }
}
