use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use shannon_sheet::data::export::save_file;
use shannon_sheet::data::model::{CellValue, Table};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Spread `total` items over `weights.len()` columns, one draw per item.
fn draw_counts(total: i64, weights: &[f64], rng: &mut SimpleRng) -> Vec<i64> {
    let sum: f64 = weights.iter().sum();
    let mut counts = vec![0i64; weights.len()];
    for _ in 0..total {
        let mut u = rng.next_f64() * sum;
        let mut slot = weights.len() - 1;
        for (i, w) in weights.iter().enumerate() {
            if u < *w {
                slot = i;
                break;
            }
            u -= w;
        }
        counts[slot] += 1;
    }
    counts
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    let species = ["Oak", "Pine", "Birch", "Maple", "Spruce"];
    // Habitats from very uneven to uniform.
    let habitats: [(&str, [f64; 5]); 6] = [
        ("Bog", [1.0, 0.0, 0.0, 0.0, 0.0]),
        ("Heath", [8.0, 1.0, 1.0, 0.0, 0.0]),
        ("Ridge", [1.0, 6.0, 0.0, 0.0, 3.0]),
        ("Valley", [3.0, 2.0, 2.0, 2.0, 1.0]),
        ("Riverbank", [1.0, 1.0, 1.0, 1.0, 1.0]),
        ("Clearing", [0.0, 0.0, 0.0, 0.0, 0.0]),
    ];

    let mut categories: Vec<String> = Vec::new();
    let mut totals: Vec<i64> = Vec::new();
    let mut counts_by_species: Vec<Vec<i64>> = vec![Vec::new(); species.len()];

    for (habitat, weights) in &habitats {
        for plot in 1..=3 {
            let total = if weights.iter().sum::<f64>() == 0.0 {
                0
            } else {
                50 + (rng.next_u64() % 150) as i64
            };
            let counts = if total == 0 {
                vec![0; species.len()]
            } else {
                draw_counts(total, weights, &mut rng)
            };
            categories.push(format!("{habitat} {plot}"));
            totals.push(total);
            for (column, count) in counts_by_species.iter_mut().zip(counts) {
                column.push(count);
            }
        }
    }

    // Workbook: header with stray whitespace, one non-numeric cell.
    let mut columns = vec!["Category ".to_string(), " Total".to_string()];
    columns.extend(species.iter().map(|s| s.to_string()));
    let records: Vec<Vec<CellValue>> = (0..categories.len())
        .map(|row| {
            let mut record = vec![
                CellValue::String(categories[row].clone()),
                CellValue::Integer(totals[row]),
            ];
            for (col, column) in counts_by_species.iter().enumerate() {
                let cell = if row == 4 && col == 3 {
                    CellValue::String("n/a".into())
                } else {
                    CellValue::Integer(column[row])
                };
                record.push(cell);
            }
            record
        })
        .collect();
    let table = Table::from_records(columns, records);
    save_file(&table, Path::new("sample_counts.xlsx"))?;

    // Same matrix as Parquet.
    let mut fields = vec![
        Field::new("Category", DataType::Utf8, false),
        Field::new("Total", DataType::Int64, false),
    ];
    fields.extend(species.iter().map(|s| Field::new(*s, DataType::Int64, false)));
    let schema = Arc::new(Schema::new(fields));

    let mut arrays: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(categories.clone())),
        Arc::new(Int64Array::from(totals.clone())),
    ];
    arrays.extend(
        counts_by_species
            .iter()
            .map(|column| Arc::new(Int64Array::from(column.clone())) as ArrayRef),
    );
    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;

    let output_path = "sample_counts.parquet";
    let file = std::fs::File::create(output_path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;

    println!(
        "Wrote {} rows x {} species to sample_counts.xlsx and {output_path}",
        categories.len(),
        species.len()
    );
    Ok(())
}
