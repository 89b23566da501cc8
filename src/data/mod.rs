/// Data layer: identifier sets and the result-row filter.
///
/// Architecture:
/// ```text
///  features.csv      incparams.csv        results.csv
///        │                 │                   │
///        ▼                 ▼                   │
///   ┌──────────────────────────┐               │
///   │  loader                   │  lines → IdSet│
///   └──────────────────────────┘               │
///        │ instances       │ params            │
///        ▼                 ▼                   ▼
///   ┌──────────────────────────────────────────────┐
///   │  filter   keep row iff field0 ∈ instances      │
///   │                     and field1 ∈ params        │
///   └──────────────────────────────────────────────┘
///        │
///        ▼
///   filtered results (input order, rows verbatim)
/// ```

pub mod filter;
pub mod lines;
pub mod loader;
pub mod model;
