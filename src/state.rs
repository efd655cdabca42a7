use std::io;

use anyhow::Result;

use crate::data::export;
use crate::data::model::{Frequencies, RawTable, TableError, TokenRecord};
use crate::text::aggregate::aggregate;
use crate::text::exclusion::{apply_exclusion, ExclusionSet};
use crate::text::tokenizer::tokenize;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// One interactive session: the loaded table, the selected column, the
/// exclusion set, and the derived token state.
///
/// The pure pipeline functions ([`tokenize`], [`apply_exclusion`],
/// [`aggregate`]) never see this struct; the session owns the caches around
/// them and recomputes on the relevant triggers. Extraction replaces the
/// record set wholesale; exclusion changes refresh the filtered cache and
/// invalidate the memoized aggregation; the exclusion set itself survives
/// re-extractions and new loads.
#[derive(Default)]
pub struct Session {
    /// Loaded table (None until a file is loaded).
    table: Option<RawTable>,

    /// Header name of the column extraction reads from.
    active_column: Option<String>,

    /// The unigram blacklist, mutated only through the session.
    exclusions: ExclusionSet,

    /// Raw per-row tokenization output of the last extraction.
    tokens: Vec<TokenRecord>,

    /// `tokens` with the exclusion set applied (cached).
    sanitized: Vec<TokenRecord>,

    /// Memoized aggregation over `sanitized`.
    frequencies: Option<Frequencies>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// Ingest a newly loaded table, replacing the previous one wholesale.
    /// Extraction state is dropped; the exclusion set survives.
    pub fn set_table(&mut self, table: RawTable) {
        log::info!(
            "Loaded {} rows with columns {:?}",
            table.len(),
            table.headers
        );
        self.table = Some(table);
        self.active_column = None;
        self.tokens.clear();
        self.sanitized.clear();
        self.frequencies = None;
    }

    pub fn table(&self) -> Option<&RawTable> {
        self.table.as_ref()
    }

    pub fn active_column(&self) -> Option<&str> {
        self.active_column.as_deref()
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    /// Select the column extraction reads from. The name must match a header
    /// of the loaded table.
    pub fn set_active_column(&mut self, name: &str) -> Result<(), TableError> {
        let table = self.table.as_ref().ok_or(TableError::NoTable)?;
        if table.column_index(name).is_none() {
            return Err(TableError::ColumnNotFound(name.to_string()));
        }
        self.active_column = Some(name.to_string());
        Ok(())
    }

    /// Tokenize the active column row-wise, replacing previous records
    /// wholesale. Returns the number of records produced.
    pub fn extract(&mut self) -> Result<usize, TableError> {
        let table = self.table.as_ref().ok_or(TableError::NoTable)?;
        let column = self
            .active_column
            .as_deref()
            .ok_or(TableError::NoActiveColumn)?;
        let idx = table
            .column_index(column)
            .ok_or_else(|| TableError::ColumnNotFound(column.to_string()))?;

        self.tokens = table.column_values(idx).map(tokenize).collect();
        log::info!("Extracted {} token records from '{column}'", self.tokens.len());

        self.resanitize();
        Ok(self.tokens.len())
    }

    /// Blacklist a word. Returns whether the set changed.
    pub fn add_exclusion(&mut self, word: &str) -> bool {
        let changed = self.exclusions.add(word);
        if changed {
            self.resanitize();
        }
        changed
    }

    /// Un-blacklist a word. Returns whether it was present.
    pub fn remove_exclusion(&mut self, word: &str) -> bool {
        let changed = self.exclusions.remove(word);
        if changed {
            self.resanitize();
        }
        changed
    }

    /// Refresh the exclusion-filtered cache and drop the memoized counts.
    fn resanitize(&mut self) {
        self.sanitized = apply_exclusion(&self.tokens, &self.exclusions);
        self.frequencies = None;
    }

    /// The exclusion-filtered records of the last extraction.
    pub fn records(&self) -> &[TokenRecord] {
        &self.sanitized
    }

    /// Aggregated counts over the current records, memoized until the next
    /// extraction or exclusion change.
    pub fn frequencies(&mut self) -> &Frequencies {
        self.frequencies
            .get_or_insert_with(|| aggregate(&self.sanitized))
    }

    /// Name for the exported CSV, once a table is loaded.
    pub fn export_file_name(&self) -> Option<String> {
        self.table
            .as_ref()
            .map(|t| export::export_file_name(&t.source_name))
    }

    /// Write the augmented CSV for the current table and records.
    pub fn export(&self, writer: impl io::Write) -> Result<()> {
        let table = self.table.as_ref().ok_or(TableError::NoTable)?;
        export::write_csv(table, &self.sanitized, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::NgramKind;

    fn loaded_session() -> Session {
        let mut session = Session::new();
        session.set_table(RawTable::new(
            vec!["id".into(), "review".into()],
            vec![
                vec!["1".into(), "great product great value".into()],
                vec!["2".into(), "great product awful support".into()],
            ],
            "reviews.csv".into(),
        ));
        session.set_active_column("review").unwrap();
        session
    }

    fn freq(freqs: &Frequencies, kind: NgramKind, text: &str) -> Option<usize> {
        freqs
            .kind(kind)
            .iter()
            .find(|wf| wf.text == text)
            .map(|wf| wf.value)
    }

    #[test]
    fn extract_produces_one_record_per_row() {
        let mut session = loaded_session();
        assert_eq!(session.extract().unwrap(), 2);
        assert_eq!(session.records().len(), 2);
        assert_eq!(session.records()[0].unigrams, "great, product, value");
    }

    #[test]
    fn extract_without_table_or_column_fails() {
        let mut empty = Session::new();
        assert_eq!(empty.extract(), Err(TableError::NoTable));

        let mut session = loaded_session();
        session.set_table(RawTable::new(vec!["a".into()], Vec::new(), "x.csv".into()));
        assert_eq!(session.extract(), Err(TableError::NoActiveColumn));
    }

    #[test]
    fn unknown_column_is_rejected() {
        let mut session = loaded_session();
        assert_eq!(
            session.set_active_column("missing"),
            Err(TableError::ColumnNotFound("missing".into()))
        );
    }

    #[test]
    fn exclusion_removes_word_from_counts() {
        let mut session = loaded_session();
        session.extract().unwrap();
        assert_eq!(freq(session.frequencies(), NgramKind::Unigram, "great"), Some(2));

        assert!(session.add_exclusion("great"));
        assert_eq!(freq(session.frequencies(), NgramKind::Unigram, "great"), None);
        assert_eq!(freq(session.frequencies(), NgramKind::Unigram, "product"), Some(2));
    }

    #[test]
    fn exclusion_leaves_bigrams_alone() {
        let mut session = loaded_session();
        session.extract().unwrap();
        session.add_exclusion("great");
        assert_eq!(
            freq(session.frequencies(), NgramKind::Bigram, "great product"),
            Some(2)
        );
    }

    #[test]
    fn frequencies_are_memoized_between_mutations() {
        let mut session = loaded_session();
        session.extract().unwrap();

        let first = session.frequencies() as *const Frequencies;
        let second = session.frequencies() as *const Frequencies;
        assert_eq!(first, second);

        session.add_exclusion("great");
        let third = session.frequencies().clone();
        assert_eq!(freq(&third, NgramKind::Unigram, "great"), None);
    }

    #[test]
    fn exclusions_survive_reextraction_and_new_load() {
        let mut session = loaded_session();
        session.extract().unwrap();
        session.add_exclusion("great");

        session.extract().unwrap();
        assert!(session.exclusions().contains("great"));
        assert_eq!(freq(session.frequencies(), NgramKind::Unigram, "great"), None);

        session.set_table(RawTable::new(
            vec!["review".into()],
            vec![vec!["great stuff".into()]],
            "more.csv".into(),
        ));
        assert!(session.exclusions().contains("great"));
        assert!(session.records().is_empty());
    }

    #[test]
    fn export_name_follows_source_name() {
        let session = loaded_session();
        assert_eq!(
            session.export_file_name().as_deref(),
            Some("(Extracted)reviews.csv")
        );
    }

    #[test]
    fn export_writes_filtered_tokens() {
        let mut session = loaded_session();
        session.extract().unwrap();
        session.add_exclusion("great");

        let mut buf = Vec::new();
        session.export(&mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();

        let header = out.lines().next().unwrap();
        assert_eq!(header, "id,review,Unigrams,Bigrams,Trigrams");
        let first = out.lines().nth(1).unwrap();
        assert!(first.starts_with(r#"1,great product great value,"product, value","#));
    }
}
