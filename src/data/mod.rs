/// Data layer: product model, import, and query.
///
/// Architecture:
/// ```text
///  .xlsx / .xls / .ods        .csv / shared-sheet CSV       .json
///        │                           │                        │
///        ▼                           ▼                        │
///   ┌──────────┐              ┌───────────┐                   │
///   │ calamine │              │ csv_text  │  tokenize → rows  │
///   └──────────┘              └───────────┘                   │
///        │    RawRow (header → RawValue)     │                │
///        └──────────────┬────────────────────┴────────────────┘
///                       ▼
///                ┌────────────┐
///                │ normalize  │  alias lookup + coercion → Product
///                └────────────┘
///                       │
///                       ▼
///                ┌────────────┐
///                │  catalog   │  Vec<Product> + facets
///                └────────────┘
///                       │
///                       ▼
///                ┌────────────┐
///                │  filter    │  predicates + stable sort → indices
///                └────────────┘
///                       │
///                       ▼
///                ┌────────────┐
///                │  pager     │  fixed-size page slices
///                └────────────┘
/// ```

pub mod catalog;
pub mod csv_text;
pub mod error;
pub mod facets;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod pager;
