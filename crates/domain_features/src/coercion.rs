//! Column kind inference and imputation

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::frame::{Cell, Column};

/// Fill value for missing categorical cells
pub const UNKNOWN_CATEGORY: &str = "Unknown";

static NUMERIC_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").expect("numeric pattern is valid"));

/// How a column is treated during imputation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

/// True if the trimmed text is an optionally signed integer or decimal
pub fn looks_numeric(text: &str) -> bool {
    NUMERIC_PATTERN.is_match(text.trim())
}

/// Classifies a column from its non-empty cells
///
/// A column is numeric when every non-empty cell is a number or
/// numeric-looking text. A column with no non-empty cells is numeric.
pub fn infer_kind(cells: &[Cell]) -> ColumnKind {
    let all_numeric = cells.iter().all(|cell| match cell {
        Cell::Empty | Cell::Number(_) => true,
        Cell::Text(text) => looks_numeric(text),
    });
    if all_numeric {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}

/// Imputes a column in place and returns the kind it was treated as
///
/// Numeric columns become all numbers, with missing or unparseable values
/// filled with 0. Categorical columns keep their values and fill missing
/// cells with [`UNKNOWN_CATEGORY`].
pub fn impute_column(column: &mut Column) -> ColumnKind {
    let kind = infer_kind(column.cells());
    for cell in column.cells_mut() {
        match kind {
            ColumnKind::Numeric => {
                let number = cell.to_number();
                *cell = Cell::Number(number);
            }
            ColumnKind::Categorical => {
                if cell.is_empty() {
                    *cell = Cell::Text(UNKNOWN_CATEGORY.to_string());
                }
            }
        }
    }
    kind
}
