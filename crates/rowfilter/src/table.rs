//! Typed in-memory tables.
//!
//! A [`Table`] is an ordered list of named [`Column`]s that all have the same
//! number of rows. Every column carries an explicit type tag ([`ColumnType`]),
//! which is what the coercion layer dispatches on.
//!
//! Tables serialize to JSON as a list of columns:
//!
//! ```
//! use rowfilter::Table;
//!
//! let json = r#"{"columns": [
//!     {"name": "a", "type": "text", "values": ["fred", null]},
//!     {"name": "b", "type": "integer", "values": [2, 5]}
//! ]}"#;
//! let table: Table = serde_json::from_str(json).unwrap();
//! assert_eq!(table.num_rows(), 2);
//! ```

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// Format used when displaying datetime cells.
const DATETIME_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The logical type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Text,
    Integer,
    Float,
    Datetime,
    Category,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Text => "text",
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Datetime => "datetime",
            ColumnType::Category => "category",
        };
        f.write_str(name)
    }
}

/// Cell storage for one column. `None` is a null cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnData {
    Text {
        values: Vec<Option<String>>,
    },
    Integer {
        values: Vec<Option<i64>>,
    },
    /// A NaN cell is treated as null.
    Float {
        values: Vec<Option<f64>>,
    },
    Datetime {
        values: Vec<Option<NaiveDateTime>>,
    },
    /// Dictionary-encoded text: each code indexes into `categories`.
    Category {
        categories: Vec<String>,
        codes: Vec<Option<u32>>,
    },
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(flatten)]
    pub data: ColumnData,
}

impl Column {
    /// Creates a column from its parts.
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Creates a text column.
    pub fn text<S: Into<String>>(name: impl Into<String>, values: Vec<Option<S>>) -> Self {
        let values = values.into_iter().map(|v| v.map(Into::into)).collect();
        Self::new(name, ColumnData::Text { values })
    }

    /// Creates an integer column.
    pub fn integer(name: impl Into<String>, values: Vec<Option<i64>>) -> Self {
        Self::new(name, ColumnData::Integer { values })
    }

    /// Creates a float column.
    pub fn float(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self::new(name, ColumnData::Float { values })
    }

    /// Creates a datetime column.
    pub fn datetime(name: impl Into<String>, values: Vec<Option<NaiveDateTime>>) -> Self {
        Self::new(name, ColumnData::Datetime { values })
    }

    /// Creates a categorical column, collecting categories in order of first appearance.
    pub fn category<S: Into<String>>(name: impl Into<String>, values: Vec<Option<S>>) -> Self {
        let mut categories: Vec<String> = Vec::new();
        let codes = values
            .into_iter()
            .map(|value| {
                let value: String = value?.into();
                let code = match categories.iter().position(|c| *c == value) {
                    Some(pos) => pos,
                    None => {
                        categories.push(value);
                        categories.len() - 1
                    }
                };
                Some(code as u32)
            })
            .collect();
        Self::new(name, ColumnData::Category { categories, codes })
    }

    /// Returns the column's type tag.
    pub fn column_type(&self) -> ColumnType {
        match &self.data {
            ColumnData::Text { .. } => ColumnType::Text,
            ColumnData::Integer { .. } => ColumnType::Integer,
            ColumnData::Float { .. } => ColumnType::Float,
            ColumnData::Datetime { .. } => ColumnType::Datetime,
            ColumnData::Category { .. } => ColumnType::Category,
        }
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Text { values } => values.len(),
            ColumnData::Integer { values } => values.len(),
            ColumnData::Float { values } => values.len(),
            ColumnData::Datetime { values } => values.len(),
            ColumnData::Category { codes, .. } => codes.len(),
        }
    }

    /// Returns true if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the cell at `row` is null.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn is_null(&self, row: usize) -> bool {
        match &self.data {
            ColumnData::Text { values } => values[row].is_none(),
            ColumnData::Integer { values } => values[row].is_none(),
            ColumnData::Float { values } => values[row].map_or(true, f64::is_nan),
            ColumnData::Datetime { values } => values[row].is_none(),
            ColumnData::Category { codes, .. } => codes[row].is_none(),
        }
    }

    /// Formats the cell at `row` for display, or `None` if it is null.
    pub fn format_cell(&self, row: usize) -> Option<String> {
        if self.is_null(row) {
            return None;
        }
        match &self.data {
            ColumnData::Text { values } => values[row].clone(),
            ColumnData::Integer { values } => values[row].map(|v| v.to_string()),
            ColumnData::Float { values } => values[row].map(|v| v.to_string()),
            ColumnData::Datetime { values } => {
                values[row].map(|v| v.format(DATETIME_DISPLAY_FORMAT).to_string())
            }
            ColumnData::Category { categories, codes } => codes[row]
                .and_then(|code| categories.get(code as usize))
                .cloned(),
        }
    }

    /// Returns a new column holding the rows where `mask` is true.
    ///
    /// Categorical columns keep their full category list.
    fn filter(&self, mask: &[bool]) -> Column {
        fn keep<T: Clone>(values: &[T], mask: &[bool]) -> Vec<T> {
            values
                .iter()
                .zip(mask)
                .filter(|(_, keep)| **keep)
                .map(|(v, _)| v.clone())
                .collect()
        }

        let data = match &self.data {
            ColumnData::Text { values } => ColumnData::Text {
                values: keep(values, mask),
            },
            ColumnData::Integer { values } => ColumnData::Integer {
                values: keep(values, mask),
            },
            ColumnData::Float { values } => ColumnData::Float {
                values: keep(values, mask),
            },
            ColumnData::Datetime { values } => ColumnData::Datetime {
                values: keep(values, mask),
            },
            ColumnData::Category { categories, codes } => ColumnData::Category {
                categories: categories.clone(),
                codes: keep(codes, mask),
            },
        };
        Column::new(self.name.clone(), data)
    }
}

/// An ordered set of equal-length named columns.
///
/// Tables are immutable once built; filtering produces a new table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableRepr", into = "TableRepr")]
pub struct Table {
    columns: Vec<Column>,
    num_rows: usize,
}

/// Wire form of a [`Table`], validated on the way in.
#[derive(Serialize, Deserialize)]
struct TableRepr {
    columns: Vec<Column>,
}

impl TryFrom<TableRepr> for Table {
    type Error = TableError;

    fn try_from(repr: TableRepr) -> Result<Self, Self::Error> {
        Table::new(repr.columns)
    }
}

impl From<Table> for TableRepr {
    fn from(table: Table) -> Self {
        TableRepr {
            columns: table.columns,
        }
    }
}

impl Table {
    /// Builds a table, checking that columns have equal lengths, unique
    /// names, and in-range category codes.
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let num_rows = columns.first().map_or(0, Column::len);
        let mut seen = HashSet::new();

        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(TableError::DuplicateColumn {
                    name: column.name.clone(),
                });
            }
            if column.len() != num_rows {
                return Err(TableError::LengthMismatch {
                    name: column.name.clone(),
                    expected: num_rows,
                    actual: column.len(),
                });
            }
            if let ColumnData::Category { categories, codes } = &column.data {
                if let Some(code) = codes
                    .iter()
                    .flatten()
                    .find(|code| **code as usize >= categories.len())
                {
                    return Err(TableError::CategoryOutOfRange {
                        name: column.name.clone(),
                        code: *code,
                        categories: categories.len(),
                    });
                }
            }
        }

        Ok(Self { columns, num_rows })
    }

    /// Returns the number of rows.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Returns the columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a column by exact name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns the column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Returns a new table with the rows where `mask` is true.
    ///
    /// Column names, order and types are preserved.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `mask` is not one entry per row.
    pub fn filter(&self, mask: &[bool]) -> Table {
        debug_assert_eq!(mask.len(), self.num_rows, "mask must cover every row");

        let columns = self.columns.iter().map(|c| c.filter(mask)).collect();
        Table {
            columns,
            num_rows: mask.iter().filter(|keep| **keep).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Table {
        Table::new(vec![
            Column::text("a", vec![Some("fred"), None, Some("maggie")]),
            Column::integer("b", vec![Some(2), Some(5), None]),
            Column::float("c", vec![Some(3.0), Some(f64::NAN), None]),
            Column::category("d", vec![Some("round"), None, Some("square")]),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_counts_rows() {
        let table = sample();
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.num_columns(), 4);
        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            vec!["a", "b", "c", "d"]
        );
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let err = Table::new(vec![
            Column::integer("a", vec![Some(1), Some(2)]),
            Column::integer("b", vec![Some(1)]),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            TableError::LengthMismatch {
                name: "b".to_string(),
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_new_rejects_duplicate_names() {
        let err = Table::new(vec![
            Column::integer("a", vec![Some(1)]),
            Column::integer("a", vec![Some(2)]),
        ])
        .unwrap_err();

        assert!(matches!(err, TableError::DuplicateColumn { name } if name == "a"));
    }

    #[test]
    fn test_new_rejects_out_of_range_category_code() {
        let column = Column::new(
            "c",
            ColumnData::Category {
                categories: vec!["x".to_string()],
                codes: vec![Some(0), Some(3)],
            },
        );
        let err = Table::new(vec![column]).unwrap_err();
        assert!(matches!(err, TableError::CategoryOutOfRange { code: 3, .. }));
    }

    #[test]
    fn test_nan_is_null() {
        let table = sample();
        let c = table.column("c").unwrap();
        assert!(!c.is_null(0));
        assert!(c.is_null(1));
        assert!(c.is_null(2));
    }

    #[test]
    fn test_category_codes_follow_first_appearance() {
        let column = Column::category("d", vec![Some("b"), Some("a"), Some("b"), None]);
        match column.data {
            ColumnData::Category { categories, codes } => {
                assert_eq!(categories, vec!["b".to_string(), "a".to_string()]);
                assert_eq!(codes, vec![Some(0), Some(1), Some(0), None]);
            }
            _ => panic!("Expected Category data"),
        }
    }

    #[test]
    fn test_filter_keeps_masked_rows_and_types() {
        let table = sample();
        let filtered = table.filter(&[true, false, true]);

        assert_eq!(filtered.num_rows(), 2);
        assert_eq!(
            filtered.column("a").unwrap(),
            &Column::text("a", vec![Some("fred"), Some("maggie")])
        );
        assert_eq!(
            filtered.column("b").unwrap().column_type(),
            ColumnType::Integer
        );
    }

    #[test]
    fn test_filter_keeps_unused_categories() {
        let table = sample();
        let filtered = table.filter(&[true, false, false]);

        match &filtered.column("d").unwrap().data {
            ColumnData::Category { categories, codes } => {
                assert_eq!(categories.len(), 2);
                assert_eq!(codes, &vec![Some(0)]);
            }
            _ => panic!("Expected Category data"),
        }
    }

    #[test]
    fn test_format_cell() {
        let when = NaiveDate::from_ymd_opt(2018, 1, 12)
            .unwrap()
            .and_hms_opt(8, 15, 0)
            .unwrap();
        let table = Table::new(vec![
            Column::datetime("t", vec![Some(when), None]),
            Column::category("d", vec![Some("round"), None]),
        ])
        .unwrap();

        let t = table.column("t").unwrap();
        assert_eq!(t.format_cell(0), Some("2018-01-12 08:15:00".to_string()));
        assert_eq!(t.format_cell(1), None);
        assert_eq!(
            table.column("d").unwrap().format_cell(0),
            Some("round".to_string())
        );
    }

    #[test]
    fn test_json_round_trip_keeps_shape() {
        let json = r#"{"columns":[
            {"name":"a","type":"text","values":["x",null]},
            {"name":"d","type":"category","categories":["foo","bar"],"codes":[1,null]},
            {"name":"t","type":"datetime","values":["2018-01-12T08:15:00",null]}
        ]}"#;

        let table: Table = serde_json::from_str(json).unwrap();
        assert_eq!(table.num_rows(), 2);
        assert_eq!(
            table.column("d").unwrap().column_type(),
            ColumnType::Category
        );

        let back: Table = serde_json::from_str(&serde_json::to_string(&table).unwrap()).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_json_rejects_ragged_columns() {
        let json = r#"{"columns":[
            {"name":"a","type":"integer","values":[1,2]},
            {"name":"b","type":"integer","values":[1]}
        ]}"#;

        let result: Result<Table, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new(vec![]).unwrap();
        assert_eq!(table.num_rows(), 0);
        assert_eq!(table.filter(&[]).num_columns(), 0);
    }
}
