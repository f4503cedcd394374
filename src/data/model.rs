use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a loaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, as read from a spreadsheet or text file.
/// Category values key a `BTreeMap` in the colour map, so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// ISO-8601 date/time kept as text; never numeric.
    Date(String),
    /// Empty cell, spreadsheet error cell or absent column.
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeMap keys --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
                Date(_) => 5,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) | (Date(a), Date(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.4}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(d) => write!(f, "{d}"),
            CellValue::Null => write!(f, ""),
        }
    }
}

impl CellValue {
    /// Lossless text form used when exporting to CSV.
    ///
    /// Unlike `Display`, floats keep their full precision and `Null` is empty.
    pub fn to_raw_string(&self) -> String {
        match self {
            CellValue::String(s) | CellValue::Date(s) => s.clone(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Float(v) => v.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Null => String::new(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Row / Table
// ---------------------------------------------------------------------------

/// One row of the table: column_name → value.
/// A column missing from the map reads as [`CellValue::Null`].
pub type Row = BTreeMap<String, CellValue>;

static NULL_CELL: CellValue = CellValue::Null;

/// A rectangular table: ordered header plus rows in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Column names in file order. Unique and whitespace-trimmed.
    pub columns: Vec<String>,
    /// Data rows in file order.
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Table { columns, rows }
    }

    /// Build a table from positional records aligned with `columns`.
    /// Short records are padded with `Null`, extra cells are dropped.
    pub fn from_records(columns: Vec<String>, records: Vec<Vec<CellValue>>) -> Self {
        let rows = records
            .into_iter()
            .map(|record| {
                let mut cells = record.into_iter();
                columns
                    .iter()
                    .map(|col| (col.clone(), cells.next().unwrap_or(CellValue::Null)))
                    .collect()
            })
            .collect();
        Table { columns, rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Cell at (`row`, `column`); missing cells read as `Null`.
    pub fn cell(&self, row: usize, column: &str) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&NULL_CELL)
    }

    /// A copy holding only the first `n` rows.
    pub fn head(&self, n: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn from_records_pads_short_rows() {
        let table = Table::from_records(
            cols(&["a", "b", "c"]),
            vec![vec![CellValue::Integer(1)], vec![
                CellValue::Integer(2),
                CellValue::Integer(3),
                CellValue::Integer(4),
                CellValue::Integer(5),
            ]],
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, "a"), &CellValue::Integer(1));
        assert_eq!(table.cell(0, "c"), &CellValue::Null);
        assert_eq!(table.rows[1].len(), 3);
    }

    #[test]
    fn missing_cell_reads_as_null() {
        let table = Table::new(cols(&["a"]), vec![Row::new()]);
        assert!(table.cell(0, "a").is_null());
        assert!(table.cell(7, "zzz").is_null());
    }

    #[test]
    fn head_keeps_header_and_order() {
        let records = (0..10).map(|i| vec![CellValue::Integer(i)]).collect();
        let table = Table::from_records(cols(&["n"]), records);
        let head = table.head(5);
        assert_eq!(head.columns, table.columns);
        assert_eq!(head.len(), 5);
        assert_eq!(head.cell(4, "n"), &CellValue::Integer(4));
    }

    #[test]
    fn ordering_groups_by_variant() {
        let mut values = vec![
            CellValue::String("b".into()),
            CellValue::Integer(3),
            CellValue::Null,
            CellValue::String("a".into()),
            CellValue::Float(1.5),
        ];
        values.sort();
        assert_eq!(values[0], CellValue::Null);
        assert_eq!(values[1], CellValue::Integer(3));
        assert_eq!(values[3], CellValue::String("a".into()));
    }

    #[test]
    fn raw_string_keeps_precision() {
        assert_eq!(CellValue::Float(0.123456789).to_raw_string(), "0.123456789");
        assert_eq!(CellValue::Float(0.123456789).to_string(), "0.1235");
        assert_eq!(CellValue::Null.to_raw_string(), "");
    }
}
