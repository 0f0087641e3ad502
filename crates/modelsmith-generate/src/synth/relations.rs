use std::collections::{HashMap, HashSet};

use modelsmith_core::{ForeignKey, ResolvedField};

use super::crud::key_predicate;
use super::writer::{SourceWriter, comment_text, string_literal};
use super::{TableModel, value_expr};
use crate::model::NamingMode;
use crate::names::{self, FunctionNames};

/// A foreign-key accessor on the generated record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub accessor: String,
    pub referenced_table: String,
    pub referenced_module: String,
    pub referenced_type: String,
    /// Function in the referenced module that reads one row by predicate.
    pub reader: String,
    pub self_reference: bool,
    /// Local fields, paired with `referenced_columns`.
    pub local_fields: Vec<ResolvedField>,
    pub referenced_columns: Vec<String>,
}

/// Turn foreign keys into accessors; keys naming unknown local columns are skipped.
pub fn plan(
    table: &str,
    fields: &[ResolvedField],
    foreign_keys: &[ForeignKey],
    naming: NamingMode,
) -> Vec<Relation> {
    let mut per_target: HashMap<&str, usize> = HashMap::new();
    for key in foreign_keys {
        *per_target.entry(key.referenced_table.as_str()).or_insert(0) += 1;
    }

    let mut used = HashSet::new();
    let mut relations = Vec::new();

    for key in foreign_keys {
        let local_fields: Option<Vec<ResolvedField>> = key
            .columns
            .iter()
            .map(|column| fields.iter().find(|field| field.name() == column).cloned())
            .collect();
        let Some(local_fields) = local_fields else {
            continue;
        };
        let Some(first) = local_fields.first() else {
            continue;
        };

        let referenced_module = names::module_name(&key.referenced_table);
        let repeated = per_target.get(key.referenced_table.as_str()).copied().unwrap_or(0) > 1;
        let mut accessor = if repeated {
            format!(
                "fetch_{referenced_module}_by_{}",
                first.ident.trim_start_matches("r#")
            )
        } else {
            format!("fetch_{referenced_module}")
        };
        let base = accessor.clone();
        let mut suffix = 2;
        while !used.insert(accessor.clone()) {
            accessor = format!("{base}_{suffix}");
            suffix += 1;
        }

        relations.push(Relation {
            accessor,
            reader: FunctionNames::new(&referenced_module, naming).read_one_by_query,
            referenced_type: names::type_name(&key.referenced_table),
            self_reference: key.is_self_reference(table),
            referenced_table: key.referenced_table.clone(),
            referenced_module,
            local_fields,
            referenced_columns: key.referenced_columns.clone(),
        });
    }

    relations
}

/// One accessor method; rendered inside the record's `impl` block.
pub fn render(w: &mut SourceWriter, model: &TableModel, relation: &Relation) {
    let (path, ty) = if relation.self_reference {
        (String::new(), model.type_name.clone())
    } else {
        let path = format!("super::super::{}::", relation.referenced_module);
        let ty = format!("{path}{}", relation.referenced_type);
        (path, ty)
    };
    let local_columns: Vec<String> = relation
        .local_fields
        .iter()
        .map(|field| format!("`{}`", comment_text(field.name())))
        .collect();
    let args: Vec<String> = relation
        .local_fields
        .iter()
        .map(|field| value_expr(field, &format!("self.{}", field.ident)))
        .collect();

    w.line(format!(
        "/// Row of `{}` referenced by {}.",
        comment_text(&relation.referenced_table),
        local_columns.join(", ")
    ));
    w.open(format!(
        "pub async fn {}(&self, conns: &Connections) -> Result<Option<{ty}>> {{",
        relation.accessor
    ));
    w.open(format!("{path}{}(", relation.reader));
    w.line("conns,");
    w.line(format!(
        "{},",
        string_literal(&key_predicate(
            relation.referenced_columns.iter().map(String::as_str)
        ))
    ));
    w.line(format!("&[{}],", args.join(", ")));
    w.close(")");
    w.line(".await");
    w.close("}");
}
