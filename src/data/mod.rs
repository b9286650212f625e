//! Data layer: core types, loading, filtering and export. No UI code here.
//!
//! Architecture:
//! ```text
//!  sample / .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  source   │  DataSource::fetch → Dataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  Dataset  │  Vec<Row>, Row = ColumnLabel → CellValue
//!   └──────────┘
//!        │                          ┌──────────┐
//!        ├────────────────────────▶ │  range    │  highlighted cells
//!        ▼                          └──────────┘
//!   ┌──────────┐   ┌───────────┐   ┌──────────┐
//!   │  filter   │ ─▶│ predicate │ ─▶│ classify  │
//!   └──────────┘   └───────────┘   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  export   │  csv / txt / xlsx
//!   └──────────┘
//! ```

pub mod classify;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod predicate;
pub mod query;
pub mod range;
pub mod source;
