use std::collections::BTreeSet;
use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value as JsonValue;

use super::model::RawTable;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with column names, data rows below (recommended)
/// * `.json` – records-oriented array: `[{ "col": "value", ... }, ...]`
pub fn load_file(path: &Path) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let source_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => {
            let file = File::open(path).context("opening CSV file")?;
            read_csv(file, source_name)
        }
        "json" => {
            let file = File::open(path).context("opening JSON file")?;
            read_json(file, source_name)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// CSV layout: first row = column names, every following row = one data row.
/// All cells are kept as strings. Ragged rows are accepted; the missing
/// trailing cells read back as empty through [`RawTable::column_values`].
pub fn read_csv(reader: impl io::Read, source_name: String) -> Result<RawTable> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in csv_reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    Ok(RawTable::new(headers, rows, source_name))
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "title": "first",  "body": "some text" },
///   { "title": "second", "body": "more text" }
/// ]
/// ```
///
/// Headers are the union of all record keys, sorted. Values are stringified:
/// strings verbatim, numbers and bools via their display form, null and
/// missing keys as the empty string.
pub fn read_json(reader: impl io::Read, source_name: String) -> Result<RawTable> {
    let root: JsonValue = serde_json::from_reader(reader).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut header_set: BTreeSet<String> = BTreeSet::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        header_set.extend(obj.keys().cloned());
    }
    let headers: Vec<String> = header_set.into_iter().collect();

    let mut rows = Vec::with_capacity(records.len());
    for rec in records {
        // Validated as an object above.
        let obj = rec.as_object().unwrap();
        let row = headers
            .iter()
            .map(|h| obj.get(h).map_or_else(String::new, json_to_cell))
            .collect();
        rows.push(row);
    }

    Ok(RawTable::new(headers, rows, source_name))
}

fn json_to_cell(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}
