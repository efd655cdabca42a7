/// Data layer: core types, loading, and export.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ RawTable  │  header row + string cells
///   └──────────┘
///        │  selected column, row-wise (text::tokenizer)
///        ▼
///   ┌─────────────┐
///   │ TokenRecord  │  unigrams / bigrams / trigrams per row
///   └─────────────┘
///        │  exclusion-filtered
///        ▼
///   ┌──────────┐
///   │  export   │  original columns + token columns → (Extracted)<name>.csv
///   └──────────┘
/// ```

pub mod export;
pub mod loader;
pub mod model;
