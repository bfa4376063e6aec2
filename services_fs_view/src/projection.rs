//! Result rows with caller-selected columns
//!
//! A [`ResultSet`] has a fixed, ordered list of columns chosen at creation.
//! Rows are filled by column name; values for columns outside the projection
//! are dropped and requested columns nobody fills stay null.

use serde::Serialize;
use serde_json::{Map, Value};

/// Full schema of a root row
pub const ROOT_COLUMNS: &[&str] = &[
    "root_id",
    "document_id",
    "summary",
    "flags",
    "title",
    "mime_types",
    "icon",
];

/// Full schema of a document row
pub const DOCUMENT_COLUMNS: &[&str] = &[
    "document_id",
    "display_name",
    "size",
    "mime_type",
    "last_modified",
    "flags",
];

/// One cell value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Text(String),
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// Ordered rows over a fixed column list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    columns: Vec<String>,
    rows: Vec<Vec<FieldValue>>,
}

impl ResultSet {
    /// Creates an empty set over `projection`, or `default_columns` when none is given
    pub fn new(projection: Option<&[&str]>, default_columns: &[&str]) -> Self {
        let columns = projection
            .unwrap_or(default_columns)
            .iter()
            .map(|column| column.to_string())
            .collect();
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<FieldValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a row of nulls and returns a builder to fill it
    pub fn new_row(&mut self) -> RowBuilder<'_> {
        self.rows.push(vec![FieldValue::Null; self.columns.len()]);
        let index = self.rows.len() - 1;
        RowBuilder {
            columns: &self.columns,
            values: &mut self.rows[index],
        }
    }

    /// Value of `column` in row `row`, if both exist
    pub fn get(&self, row: usize, column: &str) -> Option<&FieldValue> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row).map(|values| &values[index])
    }

    /// Rows as JSON objects with keys in column order
    pub fn to_json(&self) -> Value {
        let rows = self
            .rows
            .iter()
            .map(|values| {
                let mut object = Map::new();
                for (column, value) in self.columns.iter().zip(values) {
                    object.insert(
                        column.clone(),
                        serde_json::to_value(value).unwrap_or(Value::Null),
                    );
                }
                Value::Object(object)
            })
            .collect();
        Value::Array(rows)
    }
}

/// Fills one row of a [`ResultSet`]
pub struct RowBuilder<'a> {
    columns: &'a [String],
    values: &'a mut Vec<FieldValue>,
}

impl RowBuilder<'_> {
    /// Sets `column` if it is part of the projection
    pub fn add(self, column: &str, value: impl Into<FieldValue>) -> Self {
        if let Some(index) = self.columns.iter().position(|c| c == column) {
            self.values[index] = value.into();
        }
        self
    }
}
