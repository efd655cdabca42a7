use std::io;

use anyhow::{Context, Result};

use super::model::{NgramKind, RawTable, TableError, TokenRecord};

// ---------------------------------------------------------------------------
// Augmented-CSV export
// ---------------------------------------------------------------------------

/// Filename for the exported CSV, derived from the source file name.
pub fn export_file_name(original: &str) -> String {
    format!("(Extracted){original}")
}

/// Write the augmented CSV: every original column followed by the three
/// token columns `Unigrams, Bigrams, Trigrams`.
///
/// `records` must hold exactly one (already exclusion-filtered) record per
/// table row; a mismatch means the caller skipped extraction and is reported
/// as a [`TableError`], not silently truncated. Short rows are padded with
/// empty cells to header width so the output stays rectangular.
pub fn write_csv(
    table: &RawTable,
    records: &[TokenRecord],
    writer: impl io::Write,
) -> Result<()> {
    if records.len() != table.len() {
        return Err(TableError::RecordCountMismatch {
            rows: table.len(),
            records: records.len(),
        }
        .into());
    }

    let mut csv_writer = csv::Writer::from_writer(writer);

    let header: Vec<&str> = table
        .headers
        .iter()
        .map(String::as_str)
        .chain(NgramKind::ALL.iter().map(|k| k.label()))
        .collect();
    csv_writer
        .write_record(&header)
        .context("writing CSV header")?;

    for (row_no, (row, tokens)) in table.rows.iter().zip(records).enumerate() {
        let mut out: Vec<&str> = Vec::with_capacity(header.len());
        for idx in 0..table.headers.len() {
            out.push(row.get(idx).map_or("", String::as_str));
        }
        out.push(&tokens.unigrams);
        out.push(&tokens.bigrams);
        out.push(&tokens.trigrams);

        csv_writer
            .write_record(&out)
            .with_context(|| format!("writing CSV row {row_no}"))?;
    }

    csv_writer.flush().context("flushing CSV output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RawTable {
        RawTable::new(
            vec!["id".into(), "text".into()],
            vec![
                vec!["1".into(), "cat sat mat rug".into()],
                vec!["2".into()],
            ],
            "reviews.csv".into(),
        )
    }

    fn records() -> Vec<TokenRecord> {
        vec![
            TokenRecord {
                unigrams: "cat, sat, mat, rug".into(),
                bigrams: "cat sat, sat mat, mat rug".into(),
                trigrams: "cat sat mat, sat mat rug".into(),
            },
            TokenRecord::default(),
        ]
    }

    fn export_to_string(table: &RawTable, records: &[TokenRecord]) -> String {
        let mut buf = Vec::new();
        write_csv(table, records, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn filename_gets_extracted_prefix() {
        assert_eq!(export_file_name("reviews.csv"), "(Extracted)reviews.csv");
    }

    #[test]
    fn header_is_original_columns_then_token_columns() {
        let out = export_to_string(&table(), &records());
        let first_line = out.lines().next().unwrap();
        assert_eq!(first_line, "id,text,Unigrams,Bigrams,Trigrams");
    }

    #[test]
    fn short_rows_are_padded_to_header_width() {
        let out = export_to_string(&table(), &records());
        let second_row = out.lines().nth(2).unwrap();
        assert_eq!(second_row, "2,,,,");
    }

    #[test]
    fn token_fields_land_in_their_columns() {
        let out = export_to_string(&table(), &records());
        let first_row = out.lines().nth(1).unwrap();
        assert_eq!(
            first_row,
            "1,cat sat mat rug,\"cat, sat, mat, rug\",\
             \"cat sat, sat mat, mat rug\",\"cat sat mat, sat mat rug\""
        );
    }

    #[test]
    fn record_count_mismatch_is_an_error() {
        let mut buf = Vec::new();
        let err = write_csv(&table(), &records()[..1], &mut buf).unwrap_err();
        let table_err = err.downcast_ref::<TableError>().unwrap();
        assert_eq!(
            *table_err,
            TableError::RecordCountMismatch {
                rows: 2,
                records: 1
            }
        );
    }
}
