use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use shannon_sheet::data::model::{CellValue, Table};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category value → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct values of the category column to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    pub column: String,
    mapping: BTreeMap<CellValue, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the distinct values of `column` in `table`.
    pub fn for_column(table: &Table, column: &str) -> Self {
        let unique: BTreeSet<CellValue> = table
            .rows
            .iter()
            .map(|row| row.get(column).cloned().unwrap_or(CellValue::Null))
            .collect();
        let palette = generate_palette(unique.len());
        let mapping = unique.into_iter().zip(palette).collect();

        ColorMap {
            column: column.to_string(),
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given category value.
    pub fn color_for(&self, value: &CellValue) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(3);
        assert_eq!(colors.len(), 3);
        assert_ne!(colors[0], colors[1]);
    }

    #[test]
    fn repeated_categories_share_a_colour() {
        let table = Table::from_records(
            vec!["cat".into()],
            vec![
                vec![CellValue::String("x".into())],
                vec![CellValue::String("y".into())],
                vec![CellValue::String("x".into())],
            ],
        );
        let map = ColorMap::for_column(&table, "cat");
        assert_eq!(map.len(), 2);
        assert_eq!(
            map.color_for(&CellValue::String("x".into())),
            map.color_for(table.cell(2, "cat"))
        );
        assert_eq!(map.color_for(&CellValue::Integer(9)), Color32::GRAY);
    }
}
