/// Text pipeline: pure functions from raw cell text to word-cloud counts.
///
/// ```text
///   cell text ──tokenizer──▶ TokenRecord (per row)
///                                │
///                  exclusion ────┤  drop blacklisted unigrams
///                                ▼
///                           aggregate ──▶ Frequencies ({text, value} lists)
/// ```
///
/// All three stages are pure and synchronous; the session adapter in
/// [`crate::state`] owns the mutable state and caches around them.

pub mod aggregate;
pub mod exclusion;
pub mod tokenizer;
