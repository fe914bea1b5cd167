/// Data layer: core types, loading, filtering and scoring.
///
/// Architecture:
/// ```text
///  .csv / .json  (local path or URL)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse once at startup → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, category / name indices
///   └──────────┘
///        │   (every refresh)
///        ▼
///   ┌──────────┐
///   │  filter   │  predicates → sort → score → FilteredTable
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod score;
