use modelsmith_core::{KeyRole, ResolvedField, TargetKind};

use super::writer::{SourceWriter, comment_text, string_literal};
use super::{TableModel, base_rust_type, rust_type, value_expr};

fn field_kind_variant(kind: TargetKind) -> &'static str {
    match kind {
        TargetKind::Integer => "FieldKind::Integer",
        TargetKind::Boolean => "FieldKind::Boolean",
        TargetKind::Float => "FieldKind::Float",
        TargetKind::Timestamp => "FieldKind::Timestamp",
        TargetKind::Text => "FieldKind::Text",
    }
}

fn key_role_variant(role: KeyRole) -> &'static str {
    match role {
        KeyRole::None => "KeyRole::None",
        KeyRole::Primary => "KeyRole::Primary",
        KeyRole::Unique => "KeyRole::Unique",
        KeyRole::Index => "KeyRole::Index",
    }
}

/// One-line summary of the catalog facts for a field's doc comment.
fn field_doc(field: &ResolvedField) -> String {
    let column = &field.column;
    let mut parts = vec![format!(
        "`{}` {}",
        comment_text(&column.name),
        comment_text(&column.full_type)
    )];
    match column.key_role {
        KeyRole::Primary => parts.push("primary key".to_string()),
        KeyRole::Unique => parts.push("unique".to_string()),
        KeyRole::Index => parts.push("indexed".to_string()),
        KeyRole::None => {}
    }
    parts.push(if column.nullable { "null" } else { "not null" }.to_string());
    if let Some(default) = &column.default_value {
        parts.push(format!("default {}", comment_text(&string_literal(default))));
    }
    if let Some(extra) = &column.extra {
        parts.push(comment_text(extra));
    }
    parts.join(", ")
}

fn optional_literal(value: Option<&str>) -> String {
    match value {
        Some(value) => format!("Some({})", string_literal(value)),
        None => "None".to_string(),
    }
}

fn render_columns(w: &mut SourceWriter, model: &TableModel) {
    w.line(format!(
        "pub const DATABASE: &str = {};",
        string_literal(&model.database)
    ));
    w.line(format!("pub const TABLE: &str = {};", string_literal(&model.table)));
    w.blank();
    w.line("/// Catalog facts for every column, in catalog order.");
    w.open("pub const COLUMNS: &[ColumnSpec] = &[");
    for field in &model.fields {
        let column = &field.column;
        let default = optional_literal(column.default_value.as_deref());
        let extra = optional_literal(column.extra.as_deref());
        w.open("ColumnSpec {");
        w.line(format!("column: {},", string_literal(&column.name)));
        w.line(format!("kind: {},", field_kind_variant(field.kind())));
        w.line(format!("default: {default},"));
        w.line(format!("data_type: {},", string_literal(&column.declared_type)));
        w.line(format!("column_type: {},", string_literal(&column.full_type)));
        w.line(format!("key: {},", key_role_variant(column.key_role)));
        w.line(format!("nullable: {},", column.nullable));
        w.line(format!("extra: {extra},"));
        w.close("},");
    }
    w.close("];");
    w.blank();
}

fn render_record(w: &mut SourceWriter, model: &TableModel) {
    w.line(format!(
        "/// Row of `{}`.`{}`.",
        comment_text(&model.database),
        comment_text(&model.table)
    ));
    w.line("#[derive(Debug, Clone, Default, PartialEq)]");
    w.open(format!("pub struct {} {{", model.type_name));
    for field in &model.fields {
        w.line(format!("/// {}", field_doc(field)));
        w.line(format!("pub {}: {},", field.ident, rust_type(field.target)));
    }
    w.close("}");
    w.blank();
}

fn render_nilable(w: &mut SourceWriter, model: &TableModel) {
    let nilable = model.nilable_type_name();

    w.line(format!(
        "/// Decoding target for [`{}`]; every field is optional so a scan never fails on `NULL`.",
        model.type_name
    ));
    w.line("#[derive(Debug, Clone, Default, PartialEq)]");
    w.open(format!("pub struct {nilable} {{"));
    for field in &model.fields {
        w.line(format!(
            "pub {}: Option<{}>,",
            field.ident,
            base_rust_type(field.kind())
        ));
    }
    w.close("}");
    w.blank();

    w.open(format!("impl {nilable} {{"));
    w.open("fn from_row(row: &MySqlRow) -> Result<Self> {");
    w.open("Ok(Self {");
    for (index, field) in model.fields.iter().enumerate() {
        w.line(format!(
            "{}: modelsmith_runtime::column(row, {index})?,",
            field.ident
        ));
    }
    w.close("})");
    w.close("}");
    w.blank();
    w.open(format!("fn into_record(self) -> {} {{", model.type_name));
    w.open(format!("{} {{", model.type_name));
    for field in &model.fields {
        if field.target.nullable {
            w.line(format!("{0}: self.{0},", field.ident));
        } else {
            w.line(format!("{0}: self.{0}.unwrap_or_default(),", field.ident));
        }
    }
    w.close("}");
    w.close("}");
    w.close("}");
    w.blank();
}

fn render_record_impl(w: &mut SourceWriter, model: &TableModel) {
    w.open(format!("impl Record for {} {{", model.type_name));
    w.line("const DATABASE: &'static str = DATABASE;");
    w.line("const TABLE: &'static str = TABLE;");
    w.blank();
    w.open("fn columns() -> &'static [ColumnSpec] {");
    w.line("COLUMNS");
    w.close("}");
    w.blank();
    w.open("fn values(&self) -> Vec<Value> {");
    w.open("vec![");
    for field in &model.fields {
        let access = format!("self.{}", field.ident);
        w.line(format!("{},", value_expr(field, &access)));
    }
    w.close("]");
    w.close("}");
    w.blank();
    w.open("fn from_row(row: &MySqlRow) -> Result<Self> {");
    w.line(format!(
        "{}::from_row(row).map({}::into_record)",
        model.nilable_type_name(),
        model.nilable_type_name()
    ));
    w.close("}");
    w.close("}");
    w.blank();
}

/// Column table, record type, nilable shadow and the `Record` impl.
pub fn render(w: &mut SourceWriter, model: &TableModel) {
    render_columns(w, model);
    render_record(w, model);
    render_nilable(w, model);
    render_record_impl(w, model);
}
