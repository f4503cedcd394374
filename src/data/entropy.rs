use thiserror::Error;

use super::model::{CellValue, Row, Table};

/// Name of the column appended to every augmented table.
pub const ENTROPY_COLUMN: &str = "Shannon Entropy";

/// Invalid input to the entropy computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntropyError {
    #[error("no columns selected for the entropy calculation")]
    EmptySelection,

    #[error("table has no data rows")]
    EmptyTable,

    #[error("selected column '{0}' is not in the table header")]
    UnknownColumn(String),
}

// ---------------------------------------------------------------------------
// Numeric coercion
// ---------------------------------------------------------------------------

/// Coerce any cell to a number. Total: cells that are not numeric,
/// missing, or NaN count as `0.0`.
pub fn to_number(cell: &CellValue) -> f64 {
    let value = match cell {
        CellValue::Integer(i) => *i as f64,
        CellValue::Float(v) => *v,
        CellValue::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        CellValue::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        CellValue::Date(_) | CellValue::Null => 0.0,
    };
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

// ---------------------------------------------------------------------------
// Shannon entropy
// ---------------------------------------------------------------------------

/// Shannon entropy (bits) of a row of counts.
///
/// The counts are normalised by their sum. A zero total yields exactly
/// `0.0`, and probabilities `<= 0` contribute nothing (`0·log2 0 = 0`).
/// Negative counts are not rejected.
pub fn shannon_entropy(values: &[f64]) -> f64 {
    let total: f64 = values.iter().sum();
    if total == 0.0 {
        return 0.0;
    }

    let mut entropy = 0.0;
    for &v in values {
        let p = v / total;
        if p > 0.0 {
            entropy -= p * p.log2();
        }
    }
    entropy
}

// ---------------------------------------------------------------------------
// Column selection
// ---------------------------------------------------------------------------

/// Non-empty, ordered list of header columns taking part in the entropy.
///
/// The order is kept as given so the summation order, and therefore the
/// rounding, is the same for every row and every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection {
    columns: Vec<String>,
}

impl ColumnSelection {
    /// Validate `columns` against the table header. Duplicates are dropped,
    /// keeping the first occurrence.
    pub fn new<S: AsRef<str>>(table: &Table, columns: &[S]) -> Result<Self, EntropyError> {
        let mut selected: Vec<String> = Vec::with_capacity(columns.len());
        for col in columns {
            let col = col.as_ref();
            if !table.has_column(col) {
                return Err(EntropyError::UnknownColumn(col.to_string()));
            }
            if !selected.iter().any(|c| c == col) {
                selected.push(col.to_string());
            }
        }
        if selected.is_empty() {
            return Err(EntropyError::EmptySelection);
        }
        Ok(ColumnSelection { columns: selected })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether no column is selected.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Upper bound of the entropy for this selection: `log2(k)`.
    pub fn max_entropy(&self) -> f64 {
        (self.columns.len() as f64).log2()
    }
}

/// Entropy of one row over the selected columns. Missing cells count as 0.
pub fn compute_row_entropy(row: &Row, selection: &ColumnSelection) -> f64 {
    let values: Vec<f64> = selection
        .columns()
        .iter()
        .map(|col| row.get(col).map(to_number).unwrap_or(0.0))
        .collect();
    shannon_entropy(&values)
}

/// Return a copy of `table` with the selected columns coerced to numbers
/// and an [`ENTROPY_COLUMN`] holding each row's entropy.
///
/// An existing entropy column is overwritten in place.
pub fn append_entropy(table: &Table, selection: &ColumnSelection) -> Result<Table, EntropyError> {
    if table.is_empty() {
        return Err(EntropyError::EmptyTable);
    }
    if let Some(missing) = selection.columns().iter().find(|c| !table.has_column(c)) {
        return Err(EntropyError::UnknownColumn(missing.clone()));
    }

    let mut columns = table.columns.clone();
    if !table.has_column(ENTROPY_COLUMN) {
        columns.push(ENTROPY_COLUMN.to_string());
    }

    let rows = table
        .rows
        .iter()
        .map(|row| {
            let mut out = row.clone();
            for col in selection.columns() {
                let coerced = match row.get(col) {
                    Some(CellValue::Integer(i)) => CellValue::Integer(*i),
                    Some(cell) => CellValue::Float(to_number(cell)),
                    None => CellValue::Float(0.0),
                };
                out.insert(col.clone(), coerced);
            }
            let entropy = compute_row_entropy(&out, selection);
            out.insert(ENTROPY_COLUMN.to_string(), CellValue::Float(entropy));
            out
        })
        .collect();

    log::debug!(
        "Computed entropy over {} columns for {} rows",
        selection.len(),
        table.len()
    );

    Ok(Table::new(columns, rows))
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Min / max / mean of the entropy column of an augmented table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntropySummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Summarise [`ENTROPY_COLUMN`]; `None` if the table has no such values.
pub fn entropy_summary(table: &Table) -> Option<EntropySummary> {
    let values: Vec<f64> = table
        .rows
        .iter()
        .filter_map(|row| match row.get(ENTROPY_COLUMN) {
            Some(CellValue::Float(v)) => Some(*v),
            _ => None,
        })
        .collect();
    if values.is_empty() {
        return None;
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    Some(EntropySummary { min, max, mean })
}
