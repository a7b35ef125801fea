//! Tabular feature frame
//!
//! A small column-oriented table. Scoring normally uses a single row, but
//! the frame supports several rows so that column-kind inference looks at
//! every value a column holds.

use std::collections::BTreeSet;

use serde::Serialize;

use core_kernel::{ClaimRecord, FieldValue, NumericRow};

/// One table cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Final numeric view: unparseable text and empty cells become 0.0
    pub fn to_number(&self) -> f64 {
        let number = match self {
            Cell::Number(number) => *number,
            Cell::Text(text) => text.trim().parse::<f64>().unwrap_or(0.0),
            Cell::Empty => 0.0,
        };
        if number.is_finite() {
            number
        } else {
            0.0
        }
    }
}

impl From<&FieldValue> for Cell {
    fn from(value: &FieldValue) -> Self {
        if value.is_missing() {
            return Cell::Empty;
        }
        match value {
            FieldValue::Number(number) => Cell::Number(*number),
            FieldValue::Bool(flag) => Cell::Number(if *flag { 1.0 } else { 0.0 }),
            other => other
                .to_text()
                .map_or(Cell::Empty, |text| Cell::Text(text.into_owned())),
        }
    }
}

/// A named column of cells
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    name: String,
    cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// A column of `rows` empty cells
    pub fn empty(name: impl Into<String>, rows: usize) -> Self {
        Self::new(name, vec![Cell::Empty; rows])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }
}

/// Columns added and dropped while aligning a frame to a schema
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlignmentReport {
    pub added: Vec<String>,
    pub dropped: Vec<String>,
}

/// A column-oriented table with a fixed row count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureFrame {
    columns: Vec<Column>,
    rows: usize,
}

impl FeatureFrame {
    /// Wraps records as a table; the column set is the union of field names
    ///
    /// Columns appear in field-name order and fields a record lacks are
    /// empty cells.
    pub fn from_records(records: &[ClaimRecord]) -> Self {
        let names: BTreeSet<&str> = records.iter().flat_map(ClaimRecord::field_names).collect();

        let columns = names
            .into_iter()
            .map(|name| {
                let cells = records
                    .iter()
                    .map(|record| record.get(name).map_or(Cell::Empty, Cell::from))
                    .collect();
                Column::new(name, cells)
            })
            .collect();

        Self {
            columns,
            rows: records.len(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Appends an empty column unless one with this name exists
    ///
    /// Returns true if the column was added.
    pub fn ensure_column(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.columns.push(Column::empty(name, self.rows));
        true
    }

    /// Reshapes the frame so its columns are exactly `expected`, in order
    ///
    /// Missing columns are added empty; columns not in `expected` are dropped.
    pub fn align(&mut self, expected: &[String]) -> AlignmentReport {
        let mut report = AlignmentReport::default();

        let aligned: Vec<Column> = expected
            .iter()
            .map(|name| match self.column(name) {
                Some(column) => column.clone(),
                None => {
                    report.added.push(name.clone());
                    Column::empty(name.as_str(), self.rows)
                }
            })
            .collect();

        report.dropped = self
            .columns
            .iter()
            .filter(|column| !expected.contains(&column.name))
            .map(|column| column.name.clone())
            .collect();

        self.columns = aligned;
        report
    }

    /// Sets every cell of a column to the same number
    ///
    /// Returns false if the column is not part of the frame.
    pub fn set_number(&mut self, name: &str, value: f64) -> bool {
        self.set_numbers(name, &vec![value; self.rows])
    }

    /// Sets a column cell by cell; `values` must have one entry per row
    pub fn set_numbers(&mut self, name: &str, values: &[f64]) -> bool {
        debug_assert_eq!(values.len(), self.rows);
        let mut found = false;
        for column in self.columns.iter_mut().filter(|c| c.name == name) {
            column.cells = values.iter().map(|v| Cell::Number(*v)).collect();
            found = true;
        }
        found
    }

    /// Coerces every cell to a float, one `NumericRow` per table row
    pub fn to_numeric_rows(&self) -> Vec<NumericRow> {
        let names = self.column_names();
        (0..self.rows)
            .map(|row| {
                let values = self
                    .columns
                    .iter()
                    .map(|column| column.cells[row].to_number())
                    .collect();
                NumericRow::new(names.clone(), values)
            })
            .collect()
    }
}
