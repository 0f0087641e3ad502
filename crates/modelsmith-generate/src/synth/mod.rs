//! Source synthesis for generated model modules.
//!
//! Every function here is pure: a [`TableModel`] goes in, source text comes
//! out. Output is deterministic so regenerating an unchanged table yields
//! byte-identical files.

mod crud;
mod queries;
mod record;
mod relations;
mod writer;

use modelsmith_core::{ForeignKey, KeySet, ResolvedField, TargetKind, TargetType};

use crate::errors::GenerationError;
use crate::keys;
use crate::model::NamingMode;
use crate::names::{self, FunctionNames};
use crate::scaffold::{GeneratedArtifact, WritePolicy};

pub use relations::Relation;
pub use writer::{SourceWriter, string_literal};

/// Everything needed to render one table's module.
#[derive(Debug, Clone)]
pub struct TableModel {
    pub database: String,
    pub table: String,
    pub module: String,
    pub type_name: String,
    pub fields: Vec<ResolvedField>,
    pub keys: KeySet,
    pub relations: Vec<Relation>,
    pub functions: FunctionNames,
    pub naming: NamingMode,
}

impl TableModel {
    pub fn new(
        database: impl Into<String>,
        table: impl Into<String>,
        fields: Vec<ResolvedField>,
        naming: NamingMode,
    ) -> Self {
        let table = table.into();
        let module = names::module_name(&table);
        Self {
            database: database.into(),
            type_name: names::type_name(&table),
            keys: keys::analyze(&fields),
            functions: FunctionNames::new(&module, naming),
            relations: Vec::new(),
            fields,
            module,
            table,
            naming,
        }
    }

    /// Attach foreign-key accessors.
    pub fn with_foreign_keys(mut self, foreign_keys: &[ForeignKey]) -> Self {
        self.relations = relations::plan(&self.table, &self.fields, foreign_keys, self.naming);
        self
    }

    pub fn nilable_type_name(&self) -> String {
        names::nilable_type_name(&self.type_name)
    }

    fn has_timestamp(&self) -> bool {
        self.fields
            .iter()
            .any(|field| field.kind() == TargetKind::Timestamp)
    }
}

/// Rust type for a field kind, ignoring nullability.
pub fn base_rust_type(kind: TargetKind) -> &'static str {
    match kind {
        TargetKind::Integer => "i64",
        TargetKind::Boolean => "bool",
        TargetKind::Float => "f64",
        TargetKind::Timestamp => "NaiveDateTime",
        TargetKind::Text => "String",
    }
}

/// Rust type for a resolved field, wrapped in `Option` when nullable.
pub fn rust_type(target: TargetType) -> String {
    let base = base_rust_type(target.kind);
    if target.nullable {
        format!("Option<{base}>")
    } else {
        base.to_string()
    }
}

/// Expression converting `expr` (a field access) into a runtime `Value`.
fn value_expr(field: &ResolvedField, expr: &str) -> String {
    match field.kind() {
        TargetKind::Text => format!("Value::from({expr}.clone())"),
        _ => format!("Value::from({expr})"),
    }
}

/// Reject columns whose metadata the generated code could not honour.
pub fn validate_fields(table: &str, fields: &[ResolvedField]) -> Result<(), GenerationError> {
    for field in fields {
        let full_type = field.column.full_type.trim().to_ascii_lowercase();
        let is_literal_set = full_type.starts_with("enum(") || full_type.starts_with("set(");
        if is_literal_set && modelsmith_runtime::literal_members(&field.column.full_type).is_none()
        {
            return Err(GenerationError::Validation(format!(
                "{table}.{}: cannot read permitted values from '{}'",
                field.name(),
                field.column.full_type
            )));
        }
    }
    Ok(())
}

/// Render the always-regenerated base module.
pub fn render_base(model: &TableModel) -> String {
    let mut w = SourceWriter::new();
    w.line(format!(
        "// Code generated by modelsmith from `{}`.`{}`. DO NOT EDIT.",
        writer::comment_text(&model.database),
        writer::comment_text(&model.table)
    ));
    w.line(format!(
        "// Hand-written code belongs in {}_extended.rs.",
        model.module
    ));
    w.blank();

    if model.has_timestamp() {
        w.line("use modelsmith_runtime::chrono::NaiveDateTime;");
    }
    w.line("use modelsmith_runtime::sqlx::mysql::{MySqlQueryResult, MySqlRow};");
    w.line("use modelsmith_runtime::{");
    w.line("    ColumnSpec, Connections, FieldKind, KeyRole, QueryOptions, Record, Result, Value,");
    w.line("};");
    w.blank();

    record::render(&mut w, model);
    crud::render_methods(&mut w, model);
    crud::render_read_by_key(&mut w, model);
    queries::render(&mut w, model);

    w.finish()
}

/// Render the always-regenerated `mod.rs` that wires the table's files together.
pub fn render_module(model: &TableModel) -> String {
    let m = &model.module;
    let mut w = SourceWriter::new();
    w.line("// Code generated by modelsmith. DO NOT EDIT.");
    w.blank();
    w.line(format!("mod {m}_base;"));
    w.line(format!("mod {m}_extended;"));
    w.line("#[cfg(test)]");
    w.line(format!("mod {m}_test;"));
    w.blank();
    w.line(format!("pub use {m}_base::*;"));
    w.line("#[allow(unused_imports)]");
    w.line(format!("pub use {m}_extended::*;"));
    w.finish()
}

/// Render the one-time extension file.
pub fn render_extended(model: &TableModel) -> String {
    let mut w = SourceWriter::new();
    w.line(format!(
        "// Hand-written additions for `{}`. modelsmith creates this file once and never overwrites it.",
        writer::comment_text(&model.table)
    ));
    w.blank();
    w.line("#[allow(unused_imports)]");
    w.line(format!("use super::{}_base::*;", model.module));
    w.finish()
}

/// Render the one-time test skeleton.
pub fn render_test(model: &TableModel) -> String {
    let mut w = SourceWriter::new();
    w.line(format!(
        "// Tests for `{}`. modelsmith creates this file once and never overwrites it.",
        writer::comment_text(&model.table)
    ));
    w.blank();
    w.line("use modelsmith_runtime::Record;");
    w.blank();
    w.line(format!("use super::{}_base::*;", model.module));
    w.blank();
    w.line("#[test]");
    w.open("fn values_follow_column_table() {");
    w.line(format!("let record = {}::default();", model.type_name));
    w.line("assert_eq!(record.values().len(), COLUMNS.len());");
    w.close("}");
    w.finish()
}

/// Render the output root `mod.rs` listing every model module.
pub fn render_index(modules: &[String]) -> String {
    let mut sorted: Vec<&String> = modules.iter().collect();
    sorted.sort();
    sorted.dedup();

    let mut w = SourceWriter::new();
    w.line("// Code generated by modelsmith. DO NOT EDIT.");
    w.blank();
    for module in sorted {
        w.line(format!("pub mod {module};"));
    }
    w.finish()
}

/// All artifacts for one table, with their write policies.
pub fn synthesize(model: &TableModel) -> Vec<GeneratedArtifact> {
    let dir = &model.module;
    vec![
        GeneratedArtifact::new(
            format!("{dir}/{dir}_base.rs"),
            render_base(model),
            WritePolicy::AlwaysRegenerate,
        ),
        GeneratedArtifact::new(
            format!("{dir}/mod.rs"),
            render_module(model),
            WritePolicy::AlwaysRegenerate,
        ),
        GeneratedArtifact::new(
            format!("{dir}/{dir}_extended.rs"),
            render_extended(model),
            WritePolicy::CreateIfAbsent,
        ),
        GeneratedArtifact::new(
            format!("{dir}/{dir}_test.rs"),
            render_test(model),
            WritePolicy::CreateIfAbsent,
        ),
    ]
}
