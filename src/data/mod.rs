/// Data layer: record types, loading, and filtering.
///
/// Architecture:
/// ```text
///  year .csv/.json        category .csv/.json
///        │                       │
///        ▼                       ▼
///   ┌──────────────────────────────────┐
///   │  loader   parse → Datasets        │  (YearTable, CategoryTable)
///   └──────────────────────────────────┘
///        │
///        ▼
///   ┌──────────────────────────────────┐
///   │  filter   Selection → Views       │  year_view, category_view
///   └──────────────────────────────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
