//! Per-row Shannon entropy for count matrices loaded from spreadsheets.
//!
//! ```no_run
//! use std::path::Path;
//! use shannon_sheet::data::{entropy, export, loader, selection};
//!
//! # fn main() -> anyhow::Result<()> {
//! let table = loader::load_file(Path::new("counts.xlsx"))?;
//! let keys = selection::KeyColumns::default_for(&table).expect("table has a header");
//! let columns = selection::default_selection(&table, &keys);
//! let chosen = entropy::ColumnSelection::new(&table, &columns)?;
//! let augmented = entropy::append_entropy(&table, &chosen)?;
//! export::save_file(&augmented, Path::new(export::DEFAULT_EXPORT_NAME))?;
//! # Ok(())
//! # }
//! ```

pub mod data;
