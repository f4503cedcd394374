use std::path::PathBuf;

use shannon_sheet::data::entropy::{
    ColumnSelection, EntropySummary, append_entropy, entropy_summary,
};
use shannon_sheet::data::model::Table;
use shannon_sheet::data::selection::{
    KeyColumns, candidate_columns, default_selection, preview_columns, retain_candidates,
};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which view the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CentralView {
    #[default]
    Table,
    Chart,
}

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded table (None until user loads a file).
    pub table: Option<Table>,

    /// File the table was loaded from.
    pub source_path: Option<PathBuf>,

    /// Category and total columns.
    pub keys: Option<KeyColumns>,

    /// Count columns taking part in the entropy, in header order.
    pub selected: Vec<String>,

    /// Table augmented with the entropy column (derived, cached).
    pub result: Option<Table>,

    /// Min / max / mean of the current result.
    pub summary: Option<EntropySummary>,

    /// `log2(k)` for the current selection.
    pub max_entropy: Option<f64>,

    /// Colours for the category column in the chart.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Active central view.
    pub view: CentralView,
}

impl AppState {
    /// Ingest a newly loaded table, pick default keys and selection.
    pub fn set_table(&mut self, table: Table, path: Option<PathBuf>) {
        self.keys = KeyColumns::default_for(&table);
        self.selected = match &self.keys {
            Some(keys) => default_selection(&table, keys),
            None => Vec::new(),
        };
        self.table = Some(table);
        self.source_path = path;
        self.status_message = None;
        self.recompute();
    }

    /// Columns the user may tick for the entropy.
    pub fn candidates(&self) -> Vec<String> {
        match (&self.table, &self.keys) {
            (Some(table), Some(keys)) => candidate_columns(table, keys),
            _ => Vec::new(),
        }
    }

    /// Columns of the results view.
    pub fn preview_columns(&self) -> Vec<String> {
        match &self.keys {
            Some(keys) => preview_columns(keys, &self.selected),
            None => Vec::new(),
        }
    }

    /// Change the category column. The selection resets to all candidates.
    pub fn set_category_column(&mut self, column: String) {
        if let Some(keys) = &mut self.keys {
            keys.category = column;
        }
        self.reset_selection();
    }

    /// Change the total column. The selection resets to all candidates.
    pub fn set_total_column(&mut self, column: String) {
        if let Some(keys) = &mut self.keys {
            keys.total = column;
        }
        self.reset_selection();
    }

    /// Toggle a single count column in the selection.
    pub fn toggle_column(&mut self, column: &str) {
        if self.selected.iter().any(|c| c == column) {
            self.selected.retain(|c| c != column);
        } else {
            self.selected.push(column.to_string());
        }
        if let (Some(table), Some(keys)) = (&self.table, &self.keys) {
            self.selected = retain_candidates(table, keys, &self.selected);
        }
        self.recompute();
    }

    /// Select every candidate column.
    pub fn select_all(&mut self) {
        self.selected = self.candidates();
        self.recompute();
    }

    /// Deselect every column.
    pub fn select_none(&mut self) {
        self.selected.clear();
        self.recompute();
    }

    fn reset_selection(&mut self) {
        self.selected = self.candidates();
        self.recompute();
    }

    /// Recompute the augmented table from the loaded table and selection.
    ///
    /// An empty selection computes nothing; errors land in `status_message`.
    pub fn recompute(&mut self) {
        self.result = None;
        self.summary = None;
        self.max_entropy = None;
        self.color_map = None;
        self.status_message = None;

        let (Some(table), Some(keys)) = (&self.table, &self.keys) else {
            return;
        };
        if self.selected.is_empty() {
            return;
        }

        let computed = ColumnSelection::new(table, &self.selected).and_then(|selection| {
            let augmented = append_entropy(table, &selection)?;
            Ok((augmented, selection.max_entropy()))
        });

        match computed {
            Ok((augmented, max_entropy)) => {
                self.summary = entropy_summary(&augmented);
                self.color_map = Some(ColorMap::for_column(&augmented, &keys.category));
                self.max_entropy = Some(max_entropy);
                self.result = Some(augmented);
            }
            Err(e) => {
                log::warn!("Entropy not computed: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shannon_sheet::data::entropy::ENTROPY_COLUMN;
    use shannon_sheet::data::model::CellValue;

    fn counts_table() -> Table {
        Table::from_records(
            vec!["cat".into(), "total".into(), "colA".into(), "colB".into()],
            vec![
                vec![
                    CellValue::String("cat1".into()),
                    CellValue::Integer(10),
                    CellValue::Integer(5),
                    CellValue::Integer(5),
                ],
                vec![
                    CellValue::String("cat2".into()),
                    CellValue::Integer(10),
                    CellValue::Integer(10),
                    CellValue::Integer(0),
                ],
            ],
        )
    }

    #[test]
    fn loading_computes_with_defaults() {
        let mut state = AppState::default();
        state.set_table(counts_table(), None);
        assert_eq!(state.selected, vec!["colA".to_string(), "colB".to_string()]);
        let result = state.result.as_ref().unwrap();
        assert_eq!(result.cell(0, ENTROPY_COLUMN), &CellValue::Float(1.0));
        assert_eq!(result.cell(1, ENTROPY_COLUMN), &CellValue::Float(0.0));
        assert_eq!(state.max_entropy, Some(1.0));
    }

    #[test]
    fn empty_selection_clears_result() {
        let mut state = AppState::default();
        state.set_table(counts_table(), None);
        state.select_none();
        assert!(state.result.is_none());
        assert!(state.status_message.is_none());
        state.toggle_column("colA");
        assert_eq!(state.selected, vec!["colA".to_string()]);
        assert!(state.result.is_some());
    }

    #[test]
    fn changing_keys_resets_selection() {
        let mut state = AppState::default();
        state.set_table(counts_table(), None);
        state.set_total_column("colB".into());
        assert_eq!(state.selected, vec!["total".to_string(), "colA".to_string()]);
    }

    #[test]
    fn header_only_table_reports_error() {
        let mut state = AppState::default();
        let empty = Table::new(vec!["cat".into(), "total".into(), "a".into()], Vec::new());
        state.set_table(empty, None);
        assert!(state.result.is_none());
        assert!(state.status_message.unwrap().contains("no data rows"));
    }

    #[test]
    fn empty_selection_clears_stale_error() {
        let mut state = AppState::default();
        let empty = Table::new(vec!["cat".into(), "total".into(), "a".into()], Vec::new());
        state.set_table(empty, None);
        assert!(state.status_message.is_some());
        state.select_none();
        assert!(state.status_message.is_none());
        assert!(state.result.is_none());
    }
}
