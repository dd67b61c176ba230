use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Dataset, Record};
use crate::config::ColumnMapping;
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; the four mapped columns, others ignored
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – flat columns (string / numeric / bool)
///
/// Any failure here is fatal for the caller: there is no partial dataset.
pub fn load_file(path: &Path, columns: &ColumnMapping) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path, columns),
        "json" => load_json(path, columns),
        "parquet" | "pq" => load_parquet(path, columns),
        other => Err(DataError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    let dataset = Dataset::from_records(records)
        .with_context(|| format!("validating {}", path.display()))?;

    log::info!(
        "Loaded {} launch records from {}: sites {:?}, payload {}",
        dataset.len(),
        path.display(),
        dataset.sites(),
        dataset.payload_bounds()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Cell parsing shared by all formats
// ---------------------------------------------------------------------------

/// Outcome flags as they appear in exported launch tables:
/// `1`/`0`, `1.0`/`0.0`, `true`/`false`, `success`/`failure`.
fn parse_outcome(raw: &str) -> Option<bool> {
    let s = raw.trim().to_ascii_lowercase();
    match s.as_str() {
        "1" | "true" | "success" => Some(true),
        "0" | "false" | "failure" => Some(false),
        _ => match s.parse::<f64>() {
            Ok(v) if v == 1.0 => Some(true),
            Ok(v) if v == 0.0 => Some(false),
            _ => None,
        },
    }
}

fn invalid(row: usize, column: &str, value: impl Into<String>) -> DataError {
    DataError::InvalidValue {
        row,
        column: column.to_string(),
        value: value.into(),
    }
}

/// Build a record from four text cells, validating the required ones.
fn record_from_cells(
    row: usize,
    columns: &ColumnMapping,
    site: &str,
    payload: &str,
    outcome: &str,
    booster: &str,
) -> Result<Record, DataError> {
    let site = site.trim();
    if site.is_empty() {
        return Err(invalid(row, &columns.site, site));
    }
    let payload_mass_kg = payload
        .trim()
        .parse::<f64>()
        .map_err(|_| invalid(row, &columns.payload_mass, payload))?;
    let outcome = parse_outcome(outcome).ok_or_else(|| invalid(row, &columns.outcome, outcome))?;

    Ok(Record {
        site: site.to_string(),
        payload_mass_kg,
        outcome,
        booster_category: booster.trim().to_string(),
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one launch per row.
fn load_csv(path: &Path, columns: &ColumnMapping) -> Result<Vec<Record>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    let position = |name: &String| {
        headers
            .iter()
            .position(|h| h.trim() == name.as_str())
            .ok_or_else(|| DataError::MissingColumn(name.clone()))
    };
    let site_idx = position(&columns.site)?;
    let payload_idx = position(&columns.payload_mass)?;
    let outcome_idx = position(&columns.outcome)?;
    let booster_idx = position(&columns.booster_category)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: usize| row.get(idx).unwrap_or("");

        records.push(record_from_cells(
            row_no,
            columns,
            cell(site_idx),
            cell(payload_idx),
            cell(outcome_idx),
            cell(booster_idx),
        )?);
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "class": 0,
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
///
/// Every row must carry all four mapped keys. A `null` booster is kept as an
/// empty label; a `null` in any other column is rejected.
fn load_json(path: &Path, columns: &ColumnMapping) -> Result<Vec<Record>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let field = |name: &String| -> Result<String, DataError> {
            match obj.get(name) {
                None => Err(DataError::MissingColumn(name.clone())),
                Some(JsonValue::Null) => Err(invalid(i, name, "null")),
                Some(v) => Ok(json_to_text(v)),
            }
        };
        // Same rule as the CSV and Parquet paths: the key must exist, a null is blank.
        let booster = match obj.get(&columns.booster_category) {
            None => return Err(DataError::MissingColumn(columns.booster_category.clone()).into()),
            Some(JsonValue::Null) => String::new(),
            Some(v) => json_to_text(v),
        };

        records.push(record_from_cells(
            i,
            columns,
            &field(&columns.site)?,
            &field(&columns.payload_mass)?,
            &field(&columns.outcome)?,
            &booster,
        )?);
    }

    Ok(records)
}

fn json_to_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load launch records from a Parquet file.
///
/// Every mapped column is cast through Arrow: site, outcome and booster to
/// `Utf8`, payload to `Float64`. Works with files written by both **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path, columns: &ColumnMapping) -> Result<Vec<Record>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let column = |name: &String, to: &DataType| -> Result<ArrayRef> {
            let idx = schema
                .index_of(name)
                .map_err(|_| DataError::MissingColumn(name.clone()))?;
            cast(batch.column(idx).as_ref(), to).with_context(|| format!("casting '{name}' to {to}"))
        };

        let sites = column(&columns.site, &DataType::Utf8)?;
        let payloads = column(&columns.payload_mass, &DataType::Float64)?;
        let outcomes = column(&columns.outcome, &DataType::Utf8)?;
        let boosters = column(&columns.booster_category, &DataType::Utf8)?;

        let site_str = sites.as_string::<i32>();
        let payload_f64 = payloads.as_primitive::<Float64Type>();
        let outcome_str = outcomes.as_string::<i32>();
        let booster_str = boosters.as_string::<i32>();

        for i in 0..batch.num_rows() {
            let row = records.len();
            if site_str.is_null(i) {
                return Err(invalid(row, &columns.site, "<null>").into());
            }
            if payload_f64.is_null(i) {
                return Err(invalid(row, &columns.payload_mass, "<null>").into());
            }
            if outcome_str.is_null(i) {
                return Err(invalid(row, &columns.outcome, "<null>").into());
            }
            let booster = if booster_str.is_null(i) {
                ""
            } else {
                booster_str.value(i)
            };

            records.push(record_from_cells(
                row,
                columns,
                site_str.value(i),
                &payload_f64.value(i).to_string(),
                outcome_str.value(i),
                booster,
            )?);
        }
    }

    Ok(records)
}
