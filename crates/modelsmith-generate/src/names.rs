use std::collections::HashSet;

use convert_case::{Case, Casing};

use crate::model::NamingMode;

/// Rust keywords (strict and reserved, all editions) that need escaping.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe",
    "unsized", "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const NON_RAW: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Parameter names used by the generated functions themselves.
const GENERATED_PARAMS: &[&str] = &["conns", "options", "predicate", "args", "sql"];

/// Replace characters that cannot appear in an identifier.
fn sanitize(raw: &str) -> String {
    let mut ident: String = raw
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '_' { ch } else { '_' })
        .collect();
    if ident.is_empty() {
        ident.push_str("field");
    }
    if ident.starts_with(|ch: char| ch.is_ascii_digit()) {
        ident.insert_str(0, "c_");
    }
    ident
}

/// Escape an identifier that collides with a Rust keyword.
pub fn escape_keyword(ident: &str) -> String {
    if NON_RAW.contains(&ident) {
        format!("obj_{}", ident.to_ascii_lowercase().trim_start_matches('_'))
    } else if KEYWORDS.contains(&ident) {
        format!("r#{ident}")
    } else {
        ident.to_string()
    }
}

/// snake_case identifier for a column or table name, keywords not escaped.
pub fn snake_ident(raw: &str) -> String {
    let snake = sanitize(raw).to_case(Case::Snake);
    sanitize(snake.trim_matches('_'))
}

/// Field identifier for a column.
pub fn field_ident(column: &str) -> String {
    escape_keyword(&snake_ident(column))
}

/// Field identifiers for every column, made unique with numeric suffixes.
pub fn field_idents<'a>(columns: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut used = HashSet::new();
    columns
        .into_iter()
        .map(|column| {
            let base = field_ident(column);
            let mut ident = base.clone();
            let mut suffix = 2;
            while !used.insert(ident.clone()) {
                ident = format!("{}_{suffix}", base.trim_start_matches("r#"));
                suffix += 1;
            }
            ident
        })
        .collect()
}

/// Parameter name for a key field in generated signatures.
///
/// Keys named like a parameter the generated function already takes get a
/// `key_` prefix.
pub fn key_param(field_ident: &str) -> String {
    let bare = field_ident.trim_start_matches("r#");
    if GENERATED_PARAMS.contains(&bare) {
        format!("key_{bare}")
    } else {
        field_ident.to_string()
    }
}

/// Module (and directory) name for a table.
pub fn module_name(table: &str) -> String {
    let ident = snake_ident(table);
    if KEYWORDS.contains(&ident.as_str()) || NON_RAW.contains(&ident.as_str()) {
        format!("{ident}_table")
    } else {
        ident
    }
}

/// Type names a generated base module already has in scope.
const RESERVED_TYPES: &[&str] = &[
    "Self", "ColumnSpec", "Connections", "FieldKind", "KeyRole", "QueryOptions", "Record",
    "Result", "Value", "MySqlQueryResult", "MySqlRow", "NaiveDateTime", "Option", "Some", "None",
    "Ok", "Err", "String", "Vec", "Default",
];

/// PascalCase record type name for a table.
pub fn type_name(table: &str) -> String {
    let name = sanitize(&sanitize(table).to_case(Case::Pascal));
    if RESERVED_TYPES.contains(&name.as_str()) {
        format!("{name}Row")
    } else {
        name
    }
}

/// Name of the decoding-only shadow type.
pub fn nilable_type_name(type_name: &str) -> String {
    format!("{type_name}Nilable")
}

/// Generated function names for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionNames {
    pub save: String,
    pub delete: String,
    pub read_by_key: String,
    pub read_all: String,
    pub read_by_query: String,
    pub read_one_by_query: String,
    pub exec: String,
}

impl FunctionNames {
    pub fn new(module: &str, mode: NamingMode) -> Self {
        match mode {
            NamingMode::Plain => Self {
                save: "save".to_string(),
                delete: "delete".to_string(),
                read_by_key: "read_by_key".to_string(),
                read_all: "read_all".to_string(),
                read_by_query: "read_by_query".to_string(),
                read_one_by_query: "read_one_by_query".to_string(),
                exec: "exec".to_string(),
            },
            NamingMode::Prefixed => Self {
                save: format!("{module}_save"),
                delete: format!("{module}_delete"),
                read_by_key: format!("read_{module}_by_key"),
                read_all: format!("read_all_{module}"),
                read_by_query: format!("read_{module}_by_query"),
                read_one_by_query: format!("read_one_{module}_by_query"),
                exec: format!("{module}_exec"),
            },
        }
    }
}
