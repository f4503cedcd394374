use super::entropy::ENTROPY_COLUMN;
use super::model::Table;

/// Rows shown in the raw data preview.
pub const RAW_PREVIEW_ROWS: usize = 5;

// ---------------------------------------------------------------------------
// Key columns: category + total, never part of the entropy by default
// ---------------------------------------------------------------------------

/// The two descriptive columns of a count matrix.
/// Both may name any header column, including the same one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyColumns {
    pub category: String,
    pub total: String,
}

impl KeyColumns {
    /// First header column as category, second as total.
    /// A single-column table uses that column for both.
    pub fn default_for(table: &Table) -> Option<Self> {
        let category = table.columns.first()?.clone();
        let total = table
            .columns
            .get(1)
            .cloned()
            .unwrap_or_else(|| category.clone());
        Some(KeyColumns { category, total })
    }

    pub fn contains(&self, column: &str) -> bool {
        self.category == column || self.total == column
    }
}

/// Columns offered for the entropy selection, in header order:
/// everything except the key columns and a previously computed entropy column.
pub fn candidate_columns(table: &Table, keys: &KeyColumns) -> Vec<String> {
    table
        .columns
        .iter()
        .filter(|col| !keys.contains(col) && col.as_str() != ENTROPY_COLUMN)
        .cloned()
        .collect()
}

/// Initial selection: every candidate column.
pub fn default_selection(table: &Table, keys: &KeyColumns) -> Vec<String> {
    candidate_columns(table, keys)
}

/// Columns of the results view: keys, then the selection, then the entropy.
pub fn preview_columns(keys: &KeyColumns, selected: &[String]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::with_capacity(selected.len() + 3);
    let ordered = [keys.category.as_str(), keys.total.as_str()]
        .into_iter()
        .chain(selected.iter().map(String::as_str))
        .chain(std::iter::once(ENTROPY_COLUMN));
    for col in ordered {
        if !columns.iter().any(|c| c == col) {
            columns.push(col.to_string());
        }
    }
    columns
}

/// Keep only the selected columns that are still candidates, in header order.
pub fn retain_candidates(table: &Table, keys: &KeyColumns, selected: &[String]) -> Vec<String> {
    candidate_columns(table, keys)
        .into_iter()
        .filter(|col| selected.contains(col))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn table(columns: &[&str]) -> Table {
        Table::from_records(
            columns.iter().map(|s| s.to_string()).collect(),
            vec![vec![CellValue::Null; columns.len()]],
        )
    }

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_to_first_two_columns() {
        let t = table(&["Category", "Total", "A", "B"]);
        let keys = KeyColumns::default_for(&t).unwrap();
        assert_eq!(keys.category, "Category");
        assert_eq!(keys.total, "Total");
        assert_eq!(default_selection(&t, &keys), strings(&["A", "B"]));
    }

    #[test]
    fn single_column_table_reuses_it() {
        let t = table(&["only"]);
        let keys = KeyColumns::default_for(&t).unwrap();
        assert_eq!(keys.category, "only");
        assert_eq!(keys.total, "only");
        assert!(candidate_columns(&t, &keys).is_empty());
        assert!(KeyColumns::default_for(&Table::default()).is_none());
    }

    #[test]
    fn candidates_skip_keys_and_entropy_column() {
        let t = table(&["A", "cat", "B", "tot", ENTROPY_COLUMN]);
        let keys = KeyColumns {
            category: "cat".into(),
            total: "tot".into(),
        };
        assert_eq!(candidate_columns(&t, &keys), strings(&["A", "B"]));
    }

    #[test]
    fn preview_has_no_duplicates() {
        let keys = KeyColumns {
            category: "cat".into(),
            total: "cat".into(),
        };
        let cols = preview_columns(&keys, &strings(&["A", "B"]));
        assert_eq!(cols, strings(&["cat", "A", "B", ENTROPY_COLUMN]));
    }

    #[test]
    fn retain_drops_new_keys() {
        let t = table(&["cat", "tot", "A", "B", "C"]);
        let keys = KeyColumns {
            category: "A".into(),
            total: "tot".into(),
        };
        let kept = retain_candidates(&t, &keys, &strings(&["C", "A", "B"]));
        assert_eq!(kept, strings(&["B", "C"]));
    }
}
