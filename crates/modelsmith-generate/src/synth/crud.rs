use modelsmith_core::{KeyField, TargetKind};
use modelsmith_runtime::quote_ident;

use super::relations;
use super::writer::{SourceWriter, string_literal};
use super::{TableModel, value_expr};

/// `` `a` = ? AND `b` = ? `` over the given columns, in order.
pub(super) fn key_predicate<'a>(columns: impl IntoIterator<Item = &'a str>) -> String {
    columns
        .into_iter()
        .map(|column| format!("{} = ?", quote_ident(column)))
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// Parameter type for a key in `read_by_key`.
fn key_param_type(key: &KeyField) -> &'static str {
    match key.field.kind() {
        TargetKind::Integer | TargetKind::Boolean => "i64",
        TargetKind::Float => "f64",
        TargetKind::Timestamp => "NaiveDateTime",
        TargetKind::Text => "&str",
    }
}

fn render_save(w: &mut SourceWriter, model: &TableModel) {
    let back_assign = model
        .keys
        .single()
        .filter(|key| model.keys.supports_back_assignment() && !key.field.target.nullable);

    w.line("/// Insert this row, or update it when its key already exists.");
    w.line("///");
    w.line("/// Values are checked against enum and set columns before anything is sent.");
    if let Some(key) = back_assign {
        w.line(format!(
            "/// When `{}` is empty the id assigned by the database is written back.",
            key.field.ident.trim_start_matches("r#")
        ));
    }
    w.open(format!(
        "pub async fn {}(&mut self, conns: &Connections) -> Result<MySqlQueryResult> {{",
        model.functions.save
    ));
    if let Some(key) = back_assign {
        let empty_check = match key.field.kind() {
            TargetKind::Text => format!("self.{}.is_empty()", key.field.ident),
            _ => format!("self.{} == 0", key.field.ident),
        };
        w.line(format!("let new_record = {empty_check};"));
    }
    w.line("let statement = modelsmith_runtime::build_upsert(&*self)?;");
    w.line("let result =");
    w.line("    modelsmith_runtime::execute(conns, DATABASE, &statement.sql, &statement.args).await?;");
    if let Some(key) = back_assign {
        let assigned = match key.field.kind() {
            TargetKind::Text => "result.last_insert_id().to_string()",
            _ => "result.last_insert_id() as i64",
        };
        w.open("if new_record && result.last_insert_id() != 0 {");
        w.line(format!("self.{} = {assigned};", key.field.ident));
        w.close("}");
    }
    w.line("Ok(result)");
    w.close("}");
}

fn render_delete(w: &mut SourceWriter, model: &TableModel) {
    let sql = format!(
        "DELETE FROM {} WHERE {}",
        quote_ident(&model.table),
        key_predicate(model.keys.columns())
    );
    let args: Vec<String> = model
        .keys
        .fields
        .iter()
        .map(|key| value_expr(&key.field, &format!("self.{}", key.field.ident)))
        .collect();

    w.line("/// Delete this row by its key.");
    w.open(format!(
        "pub async fn {}(&self, conns: &Connections) -> Result<MySqlQueryResult> {{",
        model.functions.delete
    ));
    w.open("modelsmith_runtime::execute(");
    w.line("conns,");
    w.line("DATABASE,");
    w.line(format!("{},", string_literal(&sql)));
    w.line(format!("&[{}],", args.join(", ")));
    w.close(")");
    w.line(".await");
    w.close("}");
}

/// Methods on the record: save, delete and foreign-key accessors.
///
/// Keyless tables get neither save nor delete.
pub fn render_methods(w: &mut SourceWriter, model: &TableModel) {
    if model.keys.is_empty() && model.relations.is_empty() {
        return;
    }

    w.open(format!("impl {} {{", model.type_name));
    let mut first = true;
    if !model.keys.is_empty() {
        render_save(w, model);
        w.blank();
        render_delete(w, model);
        first = false;
    }
    for relation in &model.relations {
        if !first {
            w.blank();
        }
        relations::render(w, model, relation);
        first = false;
    }
    w.close("}");
    w.blank();
}

/// Free `read_by_key` function, only for keyed tables.
pub fn render_read_by_key(w: &mut SourceWriter, model: &TableModel) {
    if model.keys.is_empty() {
        return;
    }

    let params: Vec<String> = model
        .keys
        .fields
        .iter()
        .map(|key| format!("{}: {}", key.param, key_param_type(key)))
        .collect();
    let args: Vec<String> = model
        .keys
        .fields
        .iter()
        .map(|key| format!("Value::from({})", key.param))
        .collect();

    w.line("/// Read the row with the given key.");
    w.open(format!(
        "pub async fn {}(conns: &Connections, {}) -> Result<Option<{}>> {{",
        model.functions.read_by_key,
        params.join(", "),
        model.type_name
    ));
    w.open(format!("{}(", model.functions.read_one_by_query));
    w.line("conns,");
    w.line(format!(
        "{},",
        string_literal(&key_predicate(model.keys.columns()))
    ));
    w.line(format!("&[{}],", args.join(", ")));
    w.close(")");
    w.line(".await");
    w.close("}");
    w.blank();
}
