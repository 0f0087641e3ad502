use super::TableModel;
use super::writer::SourceWriter;

/// Bulk and predicate readers plus the raw `exec` helper; generated for
/// every table regardless of key arity.
pub fn render(w: &mut SourceWriter, model: &TableModel) {
    let ty = &model.type_name;
    let names = &model.functions;

    w.line("/// Read every row, applying the optional ordering and limit.");
    w.open(format!(
        "pub async fn {}(conns: &Connections, options: &QueryOptions) -> Result<Vec<{ty}>> {{",
        names.read_all
    ));
    w.line(format!(
        "modelsmith_runtime::fetch_all::<{ty}>(conns, \"\", &[], options).await"
    ));
    w.close("}");
    w.blank();

    w.line("/// Read the rows matching `predicate`, binding `args` to its placeholders in order.");
    w.open(format!("pub async fn {}(", names.read_by_query));
    w.line("conns: &Connections,");
    w.line("predicate: &str,");
    w.line("args: &[Value],");
    w.line("options: &QueryOptions,");
    w.reopen(format!(") -> Result<Vec<{ty}>> {{"));
    w.line(format!(
        "modelsmith_runtime::fetch_all::<{ty}>(conns, predicate, args, options).await"
    ));
    w.close("}");
    w.blank();

    w.line("/// Read the first row matching `predicate`, if any.");
    w.open(format!("pub async fn {}(", names.read_one_by_query));
    w.line("conns: &Connections,");
    w.line("predicate: &str,");
    w.line("args: &[Value],");
    w.reopen(format!(") -> Result<Option<{ty}>> {{"));
    w.line(format!(
        "modelsmith_runtime::fetch_one::<{ty}>(conns, predicate, args).await"
    ));
    w.close("}");
    w.blank();

    w.line("/// Run any statement against this table's database.");
    w.open(format!(
        "pub async fn {}(conns: &Connections, sql: &str, args: &[Value]) -> Result<MySqlQueryResult> {{",
        names.exec
    ));
    w.line("modelsmith_runtime::execute(conns, DATABASE, sql, args).await");
    w.close("}");
}
