use std::collections::BTreeSet;

use crate::data::model::{NgramKind, TokenRecord, TOKEN_SEPARATOR};

// ---------------------------------------------------------------------------
// Row tokenizer
// ---------------------------------------------------------------------------

/// Words shorter than this never enter an n-gram. Fixed stop-word-length
/// heuristic, not configurable.
const MIN_WORD_CHARS: usize = 3;

/// Tokenize one cell's text into its three de-duplicated n-gram lists.
///
/// The input is split on single ASCII spaces (not general whitespace), words
/// of fewer than [`MIN_WORD_CHARS`] characters are discarded, and each kind's
/// tokens are the sliding windows of n surviving words joined by a space.
/// Duplicates are dropped keeping first-occurrence order.
///
/// Trigram tokens are lower-cased and trimmed before de-duplication; unigrams
/// and bigrams keep their original case. Downstream consumers (export, word
/// cloud) depend on exactly this asymmetry.
///
/// Empty input is not an error: it yields an all-empty record, as does any
/// text with fewer than n eligible words for a given kind.
pub fn tokenize(text: &str) -> TokenRecord {
    if text.is_empty() {
        return TokenRecord::default();
    }

    let words: Vec<&str> = text
        .split(' ')
        .filter(|word| word.chars().count() >= MIN_WORD_CHARS)
        .collect();

    TokenRecord {
        unigrams: ngram_field(&words, NgramKind::Unigram),
        bigrams: ngram_field(&words, NgramKind::Bigram),
        trigrams: ngram_field(&words, NgramKind::Trigram),
    }
}

/// Windows of `kind.n()` words, joined, normalized (trigrams only),
/// de-duplicated, and comma-space-joined into one field string.
fn ngram_field(words: &[&str], kind: NgramKind) -> String {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut ordered: Vec<String> = Vec::new();

    for window in words.windows(kind.n()) {
        let token = match kind {
            NgramKind::Trigram => window.join(" ").to_lowercase().trim().to_string(),
            _ => window.join(" "),
        };
        if seen.insert(token.clone()) {
            ordered.push(token);
        }
    }

    ordered.join(TOKEN_SEPARATOR)
}
