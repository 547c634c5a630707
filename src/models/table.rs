//! In-memory tables for the Results module record upload.
//!
//! The upload endpoint wants a column-name-to-wire-type map plus one
//! JSON object per record. [`Table`] holds the data row-major; the wire
//! type of each column is taken from an explicit override when given
//! and otherwise inferred from the first non-null cell observed in the
//! column. Datetime and time cells travel as strings.

use std::collections::HashMap;

use chrono::{NaiveDateTime, NaiveTime};
use serde_json::{json, Map, Number, Value};
use thiserror::Error;

/// Per-column wire type overrides, keyed by column name.
/// Overrides win over inference.
pub type FieldOverrides = HashMap<String, FieldType>;

/// Wire types accepted by the record upload endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Character,
    Numeric,
    Logical,
    Datetime,
    Time,
    Unknown,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Character => "character",
            FieldType::Numeric => "numeric",
            FieldType::Logical => "logical",
            FieldType::Datetime => "datetime",
            FieldType::Time => "time",
            FieldType::Unknown => "unknown",
        }
    }
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Logical(bool),
    Datetime(NaiveDateTime),
    Time(NaiveTime),
    Null,
}

impl Cell {
    /// The wire type this cell implies; `Null` implies nothing.
    fn observed_type(&self) -> Option<FieldType> {
        match self {
            Cell::Text(_) => Some(FieldType::Character),
            Cell::Number(_) => Some(FieldType::Numeric),
            Cell::Logical(_) => Some(FieldType::Logical),
            Cell::Datetime(_) => Some(FieldType::Datetime),
            Cell::Time(_) => Some(FieldType::Time),
            Cell::Null => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value as f64)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Logical(value)
    }
}

impl From<NaiveDateTime> for Cell {
    fn from(value: NaiveDateTime) -> Self {
        Cell::Datetime(value)
    }
}

impl From<NaiveTime> for Cell {
    fn from(value: NaiveTime) -> Self {
        Cell::Time(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Cell::Null,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TableError {
    #[error("row has {got} cells but the table has {expected} columns")]
    RaggedRow { expected: usize, got: usize },
}

/// Column names containing these markers are bookkeeping fields from
/// upstream exports and are never uploaded.
fn is_metadata_column(name: &str) -> bool {
    name.contains("metadata.") || name.contains("extras.")
}

/// An ordered, named-column table of [`Cell`]s.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row; the cell count must match the column count.
    pub fn push_row<I, C>(&mut self, cells: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        let row: Vec<Cell> = cells.into_iter().map(Into::into).collect();
        if row.len() != self.columns.len() {
            return Err(TableError::RaggedRow {
                expected: self.columns.len(),
                got: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// First non-null cell decides; an all-null column is `Unknown`.
    fn infer_column(&self, index: usize) -> FieldType {
        self.rows
            .iter()
            .find_map(|row| row[index].observed_type())
            .unwrap_or(FieldType::Unknown)
    }

    /// Resolve every uploadable column to its wire type, override first.
    pub fn field_types(&self, overrides: &FieldOverrides) -> Vec<(String, FieldType)> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, name)| !is_metadata_column(name))
            .map(|(index, name)| {
                let field_type = overrides
                    .get(name)
                    .copied()
                    .unwrap_or_else(|| self.infer_column(index));
                (name.clone(), field_type)
            })
            .collect()
    }

    /// Build the record-upload document:
    /// `{"data": {"columns", "records"}, "options": {"purge"}}`.
    pub(crate) fn to_upload_document(&self, overrides: &FieldOverrides, purge: bool) -> Value {
        let keep: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, name)| !is_metadata_column(name))
            .map(|(index, _)| index)
            .collect();

        let mut columns = Map::new();
        let mut types = Vec::with_capacity(keep.len());
        for &index in &keep {
            let name = &self.columns[index];
            let field_type = overrides
                .get(name)
                .copied()
                .unwrap_or_else(|| self.infer_column(index));
            columns.insert(name.clone(), Value::String(field_type.as_str().to_string()));
            types.push(field_type);
        }

        let records: Vec<Value> = self
            .rows
            .iter()
            .map(|row| {
                let mut record = Map::new();
                for (slot, &index) in keep.iter().enumerate() {
                    record.insert(
                        self.columns[index].clone(),
                        cell_to_json(&row[index], types[slot]),
                    );
                }
                Value::Object(record)
            })
            .collect();

        json!({
            "data": {
                "columns": columns,
                "records": records
            },
            "options": {
                "purge": purge
            }
        })
    }
}

fn cell_to_json(cell: &Cell, field_type: FieldType) -> Value {
    match cell {
        Cell::Text(text) => Value::String(text.clone()),
        Cell::Number(number) => Number::from_f64(*number)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Cell::Logical(flag) => Value::Bool(*flag),
        Cell::Datetime(datetime) => {
            Value::String(datetime.format("%Y-%m-%d %H:%M:%S").to_string())
        }
        Cell::Time(time) => Value::String(time.format("%H:%M:%S").to_string()),
        // datetime/time columns travel as strings, so missing values
        // become empty strings rather than JSON null
        Cell::Null => match field_type {
            FieldType::Datetime | FieldType::Time => Value::String(String::new()),
            _ => Value::Null,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn datetime(s: &str) -> NaiveDateTime {
        NaiveDate::parse_from_str(&s[..10], "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_inference_per_cell_type() {
        let mut table = Table::new(["name", "amount", "flagged", "posted", "window"]);
        table
            .push_row(vec![
                Cell::from("ACME Ltda"),
                Cell::from(1200.50),
                Cell::from(true),
                Cell::from(datetime("2024-03-01")),
                Cell::from(NaiveTime::from_hms_opt(9, 0, 0).unwrap()),
            ])
            .unwrap();

        let types = table.field_types(&FieldOverrides::new());
        assert_eq!(types[0], ("name".to_string(), FieldType::Character));
        assert_eq!(types[1], ("amount".to_string(), FieldType::Numeric));
        assert_eq!(types[2], ("flagged".to_string(), FieldType::Logical));
        assert_eq!(types[3], ("posted".to_string(), FieldType::Datetime));
        assert_eq!(types[4], ("window".to_string(), FieldType::Time));
    }

    #[test]
    fn test_override_wins_over_inference() {
        let mut table = Table::new(["invoice"]);
        table.push_row(vec![Cell::from("1234")]).unwrap();

        let mut overrides = FieldOverrides::new();
        overrides.insert("invoice".to_string(), FieldType::Numeric);

        let types = table.field_types(&overrides);
        assert_eq!(types[0].1, FieldType::Numeric);
    }

    #[test]
    fn test_all_null_column_is_unknown() {
        let mut table = Table::new(["empty"]);
        table.push_row(vec![Cell::Null]).unwrap();
        table.push_row(vec![Cell::Null]).unwrap();

        let types = table.field_types(&FieldOverrides::new());
        assert_eq!(types[0].1, FieldType::Unknown);
    }

    #[test]
    fn test_inference_skips_leading_nulls() {
        let mut table = Table::new(["sparse"]);
        table.push_row(vec![Cell::Null]).unwrap();
        table.push_row(vec![Cell::from(7i64)]).unwrap();

        let types = table.field_types(&FieldOverrides::new());
        assert_eq!(types[0].1, FieldType::Numeric);
    }

    #[test]
    fn test_metadata_columns_dropped() {
        let mut table = Table::new(["id", "metadata.source", "extras.debug", "nested.metadata.x"]);
        table
            .push_row(vec![
                Cell::from(1i64),
                Cell::from("csv"),
                Cell::from("on"),
                Cell::from("y"),
            ])
            .unwrap();

        let doc = table.to_upload_document(&FieldOverrides::new(), false);
        let columns = doc["data"]["columns"].as_object().unwrap();
        assert_eq!(columns.len(), 1);
        assert!(columns.contains_key("id"));

        let record = doc["data"]["records"][0].as_object().unwrap();
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_ragged_row_rejected() {
        let mut table = Table::new(["a", "b"]);
        let err = table.push_row(vec![Cell::from(1i64)]).unwrap_err();
        assert_eq!(err, TableError::RaggedRow { expected: 2, got: 1 });
    }

    #[test]
    fn test_upload_document_shape() {
        let mut table = Table::new(["vendor", "amount"]);
        table
            .push_row(vec![Cell::from("ACME"), Cell::from(10.5)])
            .unwrap();
        table
            .push_row(vec![Cell::Null, Cell::from(3i64)])
            .unwrap();

        let doc = table.to_upload_document(&FieldOverrides::new(), true);
        assert_eq!(doc["options"]["purge"], true);
        assert_eq!(doc["data"]["columns"]["vendor"], "character");
        assert_eq!(doc["data"]["columns"]["amount"], "numeric");
        assert_eq!(doc["data"]["records"][0]["vendor"], "ACME");
        assert_eq!(doc["data"]["records"][0]["amount"], 10.5);
        assert_eq!(doc["data"]["records"][1]["vendor"], Value::Null);
        assert_eq!(doc["data"]["records"][1]["amount"], 3.0);
    }

    #[test]
    fn test_datetime_cells_serialize_as_strings() {
        let mut table = Table::new(["posted"]);
        table.push_row(vec![Cell::from(datetime("2024-03-01"))]).unwrap();
        table.push_row(vec![Cell::Null]).unwrap();

        let doc = table.to_upload_document(&FieldOverrides::new(), false);
        assert_eq!(doc["data"]["columns"]["posted"], "datetime");
        assert_eq!(doc["data"]["records"][0]["posted"], "2024-03-01 14:30:00");
        // nulls in string-typed columns become empty strings
        assert_eq!(doc["data"]["records"][1]["posted"], "");
    }

    #[test]
    fn test_option_cells() {
        let mut table = Table::new(["note"]);
        table.push_row(vec![Cell::from(None::<&str>)]).unwrap();
        table.push_row(vec![Cell::from(Some("ok"))]).unwrap();

        let types = table.field_types(&FieldOverrides::new());
        assert_eq!(types[0].1, FieldType::Character);
    }
}
