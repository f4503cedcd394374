use proptest::prelude::*;

use shannon_sheet::data::entropy::{
    ColumnSelection, ENTROPY_COLUMN, append_entropy, compute_row_entropy, shannon_entropy,
};
use shannon_sheet::data::model::{CellValue, Row, Table};

const EPS: f64 = 1e-9;

fn row_of(values: &[f64]) -> (Table, Row) {
    let columns: Vec<String> = (0..values.len()).map(|i| format!("c{i}")).collect();
    let record = values.iter().map(|&v| CellValue::Float(v)).collect();
    let table = Table::from_records(columns, vec![record]);
    let row = table.rows[0].clone();
    (table, row)
}

fn counts() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0u32..1000, 1..12)
        .prop_map(|v| v.into_iter().map(f64::from).collect::<Vec<f64>>())
}

proptest! {
    #[test]
    fn entropy_is_non_negative(values in counts()) {
        prop_assert!(shannon_entropy(&values) >= 0.0);
    }

    #[test]
    fn entropy_is_bounded_by_log2_k(values in counts()) {
        let k = values.len() as f64;
        prop_assert!(shannon_entropy(&values) <= k.log2() + EPS);
    }

    #[test]
    fn uniform_rows_reach_log2_k(k in 1usize..16, count in 1u32..500) {
        let values = vec![f64::from(count); k];
        let h = shannon_entropy(&values);
        prop_assert!((h - (k as f64).log2()).abs() < EPS);
    }

    #[test]
    fn single_nonzero_column_is_zero(k in 1usize..10, pos in 0usize..10, count in 1u32..1000) {
        let mut values = vec![0.0; k];
        values[pos % k] = f64::from(count);
        prop_assert_eq!(shannon_entropy(&values), 0.0);
    }

    #[test]
    fn permutation_does_not_change_entropy(values in counts()) {
        let mut reversed = values.clone();
        reversed.reverse();
        let mut rotated = values.clone();
        rotated.rotate_left(1);
        let h = shannon_entropy(&values);
        prop_assert!((h - shannon_entropy(&reversed)).abs() < EPS);
        prop_assert!((h - shannon_entropy(&rotated)).abs() < EPS);
    }

    #[test]
    fn scaling_does_not_change_entropy(values in counts(), scale in 1u32..1000) {
        let scaled: Vec<f64> = values.iter().map(|v| v * f64::from(scale)).collect();
        prop_assert!((shannon_entropy(&values) - shannon_entropy(&scaled)).abs() < EPS);
    }

    #[test]
    fn row_entropy_matches_slice_entropy(values in counts()) {
        let (table, row) = row_of(&values);
        let selection = ColumnSelection::new(&table, &table.columns).unwrap();
        prop_assert_eq!(
            compute_row_entropy(&row, &selection).to_bits(),
            shannon_entropy(&values).to_bits()
        );
    }
}

#[test]
fn swapped_columns_give_identical_entropy() {
    let table = Table::from_records(
        vec!["A".into(), "B".into()],
        vec![
            vec![CellValue::Integer(2), CellValue::Integer(6)],
            vec![CellValue::Integer(6), CellValue::Integer(2)],
        ],
    );
    let selection = ColumnSelection::new(&table, &["A", "B"]).unwrap();
    let out = append_entropy(&table, &selection).unwrap();
    assert_eq!(out.cell(0, ENTROPY_COLUMN), out.cell(1, ENTROPY_COLUMN));
}

#[test]
fn missing_selected_cell_counts_as_zero() {
    let table = Table::new(vec!["A".into(), "B".into()], vec![Row::new()]);
    let mut row = Row::new();
    row.insert("A".into(), CellValue::Integer(9));
    let selection = ColumnSelection::new(&table, &["A", "B"]).unwrap();
    assert_eq!(compute_row_entropy(&row, &selection), 0.0);
}
