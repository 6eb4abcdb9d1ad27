//! Scoped SELECT compilation and execution.

use crate::admin::table::{CellValue, Record};
use crate::model::entity::EntityKind;
use crate::model::RecordId;
use crate::scope::join::{JoinPlan, ROOT_ALIAS};
use crate::scope::path::FieldPath;
use crate::scope::policy::ScopeFilter;
use crate::scope::AccessResult;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};

/// Reads `fields` of every `kind` row allowed by `filter`, ordered by id.
///
/// `only_id` narrows the read to one record.
pub(crate) fn select_records(
    conn: &Connection,
    kind: EntityKind,
    fields: &[FieldPath],
    filter: &ScopeFilter<'_>,
    only_id: Option<RecordId>,
) -> AccessResult<Vec<Record>> {
    if matches!(filter, ScopeFilter::Deny) {
        return Ok(Vec::new());
    }

    let mut plan = JoinPlan::new(kind);
    let mut select = vec![format!("{ROOT_ALIAS}.id")];
    select.extend(fields.iter().map(|field| plan.column_ref(field)));

    let mut conditions = Vec::new();
    let mut bind_values: Vec<Value> = Vec::new();
    if let ScopeFilter::VenueEquals { path, value, .. } = filter {
        conditions.push(format!("{} = ?", plan.column_ref(path)));
        bind_values.push(value.clone());
    }
    if let Some(id) = only_id {
        conditions.push(format!("{ROOT_ALIAS}.id = ?"));
        bind_values.push(Value::Integer(id));
    }

    let mut sql = format!("SELECT {} {}", select.join(", "), plan.from_clause());
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(&format!(" ORDER BY {ROOT_ALIAS}.id ASC;"));

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(bind_values))?;
    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(fields.len());
        for index in 1..=fields.len() {
            values.push(CellValue::from_sql(row.get_ref(index)?));
        }
        records.push(Record {
            id: row.get(0)?,
            values,
        });
    }

    Ok(records)
}
