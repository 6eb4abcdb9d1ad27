//! Spreadsheet-style export of scoped tables.
//!
//! # Invariants
//! - Output columns follow the registry export order exactly.
//! - Empty cells (NULL, or a missing optional relation) render as empty
//!   strings in CSV and `null` in JSON.

use crate::admin::table::RecordTable;
use serde_json::{Map, Value as JsonValue};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Supported export encodings, as accepted by `eventol export --format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Parses `csv` or `json`, case-insensitively.
    pub fn parse(value: &str) -> Result<Self, ExportError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[derive(Debug)]
pub enum ExportError {
    UnsupportedFormat(String),
    Json(serde_json::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedFormat(value) => {
                write!(f, "unsupported export format `{value}`; expected csv|json")
            }
            Self::Json(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnsupportedFormat(_) => None,
            Self::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Encodes `table` in `format`.
pub fn render(table: &RecordTable, format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Csv => Ok(to_csv(table)),
        ExportFormat::Json => to_json(table),
    }
}

/// CSV with a header row of field paths and `\n` line endings.
pub fn to_csv(table: &RecordTable) -> String {
    let mut out = String::new();
    push_csv_line(&mut out, table.columns.iter().map(String::as_str));
    for row in &table.rows {
        let cells: Vec<String> = row.values.iter().map(ToString::to_string).collect();
        push_csv_line(&mut out, cells.iter().map(String::as_str));
    }
    out
}

/// JSON array with one object per row, keyed by field path.
pub fn to_json(table: &RecordTable) -> Result<String, ExportError> {
    let mut objects = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let mut object = Map::new();
        for (column, value) in table.columns.iter().zip(&row.values) {
            object.insert(column.clone(), serde_json::to_value(value)?);
        }
        objects.push(JsonValue::Object(object));
    }
    Ok(serde_json::to_string_pretty(&objects)?)
}

fn push_csv_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    for (index, cell) in cells.enumerate() {
        if index > 0 {
            out.push(',');
        }
        push_csv_cell(out, cell);
    }
    out.push('\n');
}

fn push_csv_cell(out: &mut String, cell: &str) {
    let needs_quote = cell.contains([',', '"', '\n', '\r']);
    if needs_quote {
        out.push('"');
        out.push_str(&cell.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(cell);
    }
}

#[cfg(test)]
mod tests {
    use super::{render, ExportError, ExportFormat};
    use crate::admin::table::{CellValue, Record, RecordTable};
    use crate::model::entity::EntityKind;

    fn table() -> RecordTable {
        RecordTable {
            entity: EntityKind::Installation,
            columns: vec!["hardware.model".to_string(), "notes".to_string()],
            rows: vec![
                Record {
                    id: 1,
                    values: vec![
                        CellValue::Text("X220".to_string()),
                        CellValue::Text("wifi, \"broadcom\"".to_string()),
                    ],
                },
                Record {
                    id: 2,
                    values: vec![CellValue::Null, CellValue::Integer(3)],
                },
            ],
        }
    }

    #[test]
    fn csv_quotes_only_when_needed() {
        let csv = render(&table(), ExportFormat::Csv).expect("csv");
        assert_eq!(
            csv,
            "hardware.model,notes\nX220,\"wifi, \"\"broadcom\"\"\"\n,3\n"
        );
    }

    #[test]
    fn json_keys_rows_by_field_path() {
        let json = render(&table(), ExportFormat::Json).expect("json");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(parsed[0]["hardware.model"], "X220");
        assert!(parsed[1]["hardware.model"].is_null());
        assert_eq!(parsed[1]["notes"], 3);
    }

    #[test]
    fn json_keeps_declared_column_order() {
        let mut reordered = table();
        reordered.columns.reverse();
        for row in &mut reordered.rows {
            row.values.reverse();
        }

        let json = render(&reordered, ExportFormat::Json).expect("json");
        let notes = json.find("\"notes\"").expect("notes key");
        let model = json.find("\"hardware.model\"").expect("model key");
        assert!(notes < model, "keys reordered: {json}");
    }

    #[test]
    fn format_parse_is_case_insensitive() {
        assert_eq!(ExportFormat::parse(" CSV ").expect("csv"), ExportFormat::Csv);
        assert_eq!(ExportFormat::parse("json").expect("json").as_str(), "json");
        assert!(matches!(
            ExportFormat::parse("xlsx"),
            Err(ExportError::UnsupportedFormat(value)) if value == "xlsx"
        ));
    }
}
