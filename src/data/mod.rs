/// Data layer: core types, loading, selection and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (validated, indexed)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, known sites, payload bounds
///   └──────────┘
///        │            ┌───────────┐
///        ▼            │ selection  │  raw Selection → NormalizedSelection
///   ┌──────────┐      └───────────┘
///   │  filter   │  payload range / site → borrowed subset
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod selection;
