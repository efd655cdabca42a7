use std::collections::BTreeMap;

use crate::data::model::{Frequencies, NgramKind, TokenRecord, WordFreq};

// ---------------------------------------------------------------------------
// Cross-row frequency aggregation
// ---------------------------------------------------------------------------

/// Count token occurrences across all records, independently per kind.
///
/// Each record's field is re-split into its token strings and every
/// occurrence increments the count for that exact string; counts are per
/// occurrence across records, not capped at one per record. Trigram keys are
/// lower-cased and trimmed again here, mirroring the tokenizer's
/// normalization of that kind.
///
/// Exclusion is applied upstream; this function never filters. Empty input
/// yields three empty lists.
pub fn aggregate(records: &[TokenRecord]) -> Frequencies {
    Frequencies {
        unigrams: count_kind(records, NgramKind::Unigram),
        bigrams: count_kind(records, NgramKind::Bigram),
        trigrams: count_kind(records, NgramKind::Trigram),
    }
}

fn count_kind(records: &[TokenRecord], kind: NgramKind) -> Vec<WordFreq> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();

    for record in records {
        for token in record.tokens(kind) {
            let key = match kind {
                NgramKind::Trigram => token.to_lowercase().trim().to_string(),
                _ => token.to_string(),
            };
            *counts.entry(key).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .map(|(text, value)| WordFreq { text, value })
        .collect()
}

/// The display ordering consumers want: descending count, ties by token.
pub fn ranked(list: &[WordFreq]) -> Vec<WordFreq> {
    let mut out = list.to_vec();
    out.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.text.cmp(&b.text)));
    out
}
