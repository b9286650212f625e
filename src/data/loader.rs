use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::DataType;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, ColumnLabel, Dataset, Row};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a sheet from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – every record is a data row, columns labelled `A`, `B`, …
/// * `.json`    – `[{ "A": "...", "B": "..." }, ...]` or `[["...", "..."], ...]`
/// * `.parquet` – field names become the first row, then one row per record
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Give every row the same key set: labels missing from a row become null.
fn normalize(rows: Vec<Row>) -> Dataset {
    let labels: BTreeSet<ColumnLabel> = rows.iter().flat_map(Row::labels).collect();
    let rows = rows
        .into_iter()
        .map(|mut row| {
            for &label in &labels {
                if row.get(label).is_none() {
                    row.insert(label, CellValue::Null);
                }
            }
            row
        })
        .collect();
    Dataset::new(rows)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// No header interpretation: a title line is just the first row, which is
/// what the viewer shows as row 1.
fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(Row::from_values(record.iter()));
    }

    Ok(normalize(rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema, either records keyed by column label:
///
/// ```json
/// [
///   { "A": "Name",  "B": "Age", "C": "Link" },
///   { "A": "Alice", "B": "30",  "C": "http://example.com" }
/// ]
/// ```
///
/// or positional arrays: `[["Name", "Age"], ["Alice", "30"]]`.
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;
    rows_from_json(&root)
}

fn rows_from_json(root: &JsonValue) -> Result<Dataset> {
    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let row = match rec {
            JsonValue::Object(obj) => {
                let mut row = Row::new();
                for (key, val) in obj {
                    let label = ColumnLabel::parse(key)
                        .with_context(|| format!("Row {i}: '{key}' is not a column label"))?;
                    row.insert(label, json_to_cell(val));
                }
                row
            }
            JsonValue::Array(values) => Row::from_values(values.iter().map(json_to_cell)),
            _ => bail!("Row {i} is neither a JSON object nor an array"),
        };
        rows.push(row);
    }

    Ok(normalize(rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file. Every column is shown as text; the schema field
/// names make up the first row so the sheet keeps its titles.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = vec![Row::from_values(names)];

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let values = batch
                .columns()
                .iter()
                .enumerate()
                .map(|(col, array)| {
                    extract_cell(array, row)
                        .with_context(|| format!("Row {row}, column {col}: unreadable value"))
                })
                .collect::<Result<Vec<CellValue>>>()?;
            rows.push(Row::from_values(values));
        }
    }

    Ok(normalize(rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Result<CellValue> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let text = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        _ => array_value_to_string(col.as_ref(), row)?,
    };
    Ok(CellValue::Text(text))
}
