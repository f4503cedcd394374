/// Data layer: core types, loading, entropy and export.
///
/// Architecture:
/// ```text
///  .xlsx / .ods / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse first sheet → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ selection │  key columns + selected count columns
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  entropy  │  per-row Shannon entropy → "Shannon Entropy" column
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  augmented Table → .xlsx / .csv / .json
///   └──────────┘
/// ```

pub mod entropy;
pub mod export;
pub mod loader;
pub mod model;
pub mod selection;
