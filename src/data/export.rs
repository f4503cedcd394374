use std::path::Path;

use anyhow::{Context, Result, bail};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use serde_json::{Map, Value as JsonValue};

use super::model::{CellValue, Table};

/// Worksheet name of the exported workbook.
pub const EXPORT_SHEET_NAME: &str = "Entropy";

/// Suggested file name for the results download.
pub const DEFAULT_EXPORT_NAME: &str = "entropy_results.xlsx";

/// Save a table to a file.  Dispatch by extension (`.xlsx`, `.csv`, `.json`).
pub fn save_file(table: &Table, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" => {
            let mut workbook = build_workbook(table)?;
            workbook.save(path).context("writing workbook")?;
        }
        "csv" => save_csv(table, path)?,
        "json" => save_json(table, path)?,
        other => bail!("Unsupported export format: .{other}"),
    }

    log::info!("Saved {} rows to {}", table.len(), path.display());
    Ok(())
}

/// The table as an in-memory `.xlsx` file.
pub fn to_xlsx_bytes(table: &Table) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(table)?;
    workbook
        .save_to_buffer()
        .context("serialising workbook")
}

// ---------------------------------------------------------------------------
// XLSX
// ---------------------------------------------------------------------------

/// One sheet, bold header row, no index column.
fn build_workbook(table: &Table) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet
        .set_name(EXPORT_SHEET_NAME)
        .context("naming worksheet")?;

    let header_format = Format::new().set_bold();
    for (col_idx, name) in table.columns.iter().enumerate() {
        let col = sheet_col(col_idx)?;
        sheet
            .write_string_with_format(0, col, name, &header_format)
            .with_context(|| format!("writing header '{name}'"))?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let xl_row = u32::try_from(row_idx + 1).context("too many rows for a worksheet")?;
        for (col_idx, name) in table.columns.iter().enumerate() {
            let cell = row.get(name).unwrap_or(&CellValue::Null);
            write_cell(sheet, xl_row, sheet_col(col_idx)?, cell)
                .with_context(|| format!("writing row {row_idx}, column '{name}'"))?;
        }
    }

    Ok(workbook)
}

fn sheet_col(idx: usize) -> Result<u16> {
    u16::try_from(idx).context("too many columns for a worksheet")
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, cell: &CellValue) -> Result<()> {
    match cell {
        CellValue::String(s) | CellValue::Date(s) => {
            sheet.write_string(row, col, s)?;
        }
        CellValue::Integer(i) => {
            sheet.write_number(row, col, *i as f64)?;
        }
        // Non-finite floats are not valid spreadsheet numbers.
        CellValue::Float(v) if v.is_finite() => {
            sheet.write_number(row, col, *v)?;
        }
        CellValue::Float(v) => {
            sheet.write_string(row, col, v.to_string())?;
        }
        CellValue::Bool(b) => {
            sheet.write_boolean(row, col, *b)?;
        }
        CellValue::Null => {}
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV / JSON
// ---------------------------------------------------------------------------

fn save_csv(table: &Table, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer
        .write_record(&table.columns)
        .context("writing CSV header")?;
    for (row_idx, _) in table.rows.iter().enumerate() {
        let record: Vec<String> = table
            .columns
            .iter()
            .map(|col| table.cell(row_idx, col).to_raw_string())
            .collect();
        writer
            .write_record(&record)
            .with_context(|| format!("writing CSV row {row_idx}"))?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

/// Records-oriented JSON, keys in header order.
fn save_json(table: &Table, path: &Path) -> Result<()> {
    let mut records = Vec::with_capacity(table.len());
    for row_idx in 0..table.len() {
        let mut obj = Map::new();
        for col in &table.columns {
            let value = serde_json::to_value(table.cell(row_idx, col))
                .with_context(|| format!("encoding row {row_idx}, column '{col}'"))?;
            obj.insert(col.clone(), value);
        }
        records.push(JsonValue::Object(obj));
    }

    let text = serde_json::to_string_pretty(&records).context("encoding JSON")?;
    std::fs::write(path, text).context("writing JSON file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_file;

    fn sample() -> Table {
        Table::from_records(
            vec!["Category".into(), "Total".into(), "Shannon Entropy".into()],
            vec![
                vec![
                    CellValue::String("a".into()),
                    CellValue::Integer(10),
                    CellValue::Float(0.5),
                ],
                vec![CellValue::String("b".into()), CellValue::Null, CellValue::Float(1.0)],
            ],
        )
    }

    #[test]
    fn csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        save_file(&sample(), &path).unwrap();

        let back = load_file(&path).unwrap();
        assert_eq!(back.columns, sample().columns);
        assert_eq!(back.cell(0, "Total"), &CellValue::Integer(10));
        assert_eq!(back.cell(0, "Shannon Entropy"), &CellValue::Float(0.5));
        assert!(back.cell(1, "Total").is_null());
    }

    #[test]
    fn json_keeps_header_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        save_file(&sample(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let cat = text.find("Category").unwrap();
        let entropy = text.find("Shannon Entropy").unwrap();
        assert!(cat < entropy);
        assert_eq!(load_file(&path).unwrap().cell(1, "Shannon Entropy"), &CellValue::Float(1.0));
    }

    #[test]
    fn xlsx_buffer_is_a_zip() {
        let bytes = to_xlsx_bytes(&sample()).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn xlsx_has_single_entropy_sheet() {
        use calamine::{Reader, open_workbook_auto};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_NAME);
        save_file(&sample(), &path).unwrap();

        let mut workbook = open_workbook_auto(&path).unwrap();
        assert_eq!(workbook.sheet_names(), vec![EXPORT_SHEET_NAME.to_string()]);
        let range = workbook.worksheet_range(EXPORT_SHEET_NAME).unwrap();
        let header: Vec<String> = range
            .rows()
            .next()
            .unwrap()
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(header, sample().columns);
    }

    #[test]
    fn rejects_unknown_format() {
        let dir = tempfile::tempdir().unwrap();
        assert!(save_file(&sample(), &dir.path().join("out.parquet")).is_err());
    }
}
