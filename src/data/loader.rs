use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use calamine::{Data, Reader, open_workbook_auto};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{PriceTable, RawRow};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a two-column price table from a file.  Dispatch by extension.
///
/// Supported formats (no header, column order `period, price`):
/// * `.csv` / `.txt` – `2010M01,76.17`
/// * `.json`         – `[["2010M01", 76.17], ...]`
/// * `.parquet`      – first column period (string or int), second price
/// * `.xlsx` / `.xls` – first worksheet, column A period, column B price
///
/// Rows whose period or price cannot be parsed are dropped; a row with fewer
/// than two columns fails the whole load.
pub fn load_file(path: &Path) -> Result<PriceTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" | "txt" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        "xlsx" | "xlsm" | "xls" => load_excel(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    log::debug!(
        "Raw period column preview: {:?}",
        rows.iter().take(5).map(|r| r.period.as_str()).collect::<Vec<_>>()
    );

    let table = PriceTable::from_rows(rows).with_source(path);
    if table.dropped > 0 {
        log::warn!(
            "Dropped {} row(s) with an invalid period or price",
            table.dropped
        );
    }
    log::debug!(
        "Parsed preview: {:?}",
        table.head(5).iter().map(|o| o.to_string()).collect::<Vec<_>>()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;

    // Byte records, so a cell that is not UTF-8 only invalidates its own row.
    let mut rows = Vec::new();
    for (idx, result) in reader.byte_records().enumerate() {
        let line = idx + 1;
        let record = result.with_context(|| format!("CSV row {line}"))?;
        if record.len() < 2 {
            bail!(
                "CSV row {line}: expected 2 columns (period, price), found {}",
                record.len()
            );
        }
        let cell = |i: usize| record.get(i).and_then(|b| std::str::from_utf8(b).ok());
        let period = cell(0).unwrap_or("");
        let price = cell(1).and_then(|s| s.parse::<f64>().ok());
        rows.push(RawRow::new(period, price));
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema: an array of `[period, price]` pairs.
///
/// ```json
/// [["2010M01", 76.17], [201002, "73.75"], ...]
/// ```
fn load_json(path: &Path) -> Result<Vec<RawRow>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| -> Result<RawRow> {
            let pair = rec
                .as_array()
                .filter(|cols| cols.len() >= 2)
                .with_context(|| format!("Row {i}: expected a [period, price] array"))?;
            let period = match &pair[0] {
                JsonValue::String(s) => s.clone(),
                JsonValue::Number(n) => n.to_string(),
                _ => String::new(),
            };
            let price = match &pair[1] {
                JsonValue::Number(n) => n.as_f64(),
                JsonValue::String(s) => s.trim().parse().ok(),
                _ => None,
            };
            Ok(RawRow::new(period, price))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file whose first column is the period and second the price.
/// Column names are ignored, matching the header-less text formats.
fn load_parquet(path: &Path) -> Result<Vec<RawRow>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        if batch.num_columns() < 2 {
            bail!(
                "Parquet file has {} column(s), expected 2 (period, price)",
                batch.num_columns()
            );
        }
        let period_col = batch.column(0);
        let price_col = batch.column(1);

        for row in 0..batch.num_rows() {
            let period = extract_period(period_col, row)
                .with_context(|| format!("Row {row}: failed to read period"))?;
            let price = extract_price(price_col, row)
                .with_context(|| format!("Row {row}: failed to read price"))?;
            rows.push(RawRow::new(period, price));
        }
    }

    Ok(rows)
}

// ---------------------------------------------------------------------------
// Excel loader
// ---------------------------------------------------------------------------

/// Load the first worksheet of a workbook, reading columns A and B by
/// position. Period cells may be text (`2010M03`) or numbers (`201003`).
fn load_excel(path: &Path) -> Result<Vec<RawRow>> {
    let mut workbook = open_workbook_auto(path).context("opening workbook")?;
    let range = workbook
        .worksheet_range_at(0)
        .context("workbook has no worksheets")?
        .context("reading first worksheet")?;

    if !range.is_empty() && range.width() < 2 {
        bail!(
            "Worksheet has {} column(s), expected 2 (period, price)",
            range.width()
        );
    }

    Ok(range
        .rows()
        .map(|cells| RawRow::new(excel_period(&cells[0]), excel_price(&cells[1])))
        .collect())
}

fn excel_period(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        _ => String::new(),
    }
}

fn excel_price(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// -- Parquet / Arrow helpers --

/// Period label as text; integer columns (`201003`) are stringified.
fn extract_period(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    let label = match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .context("expected StringArray")?
            .value(row)
            .to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .context("expected Int32Array")?
            .value(row)
            .to_string(),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .context("expected Int64Array")?
            .value(row)
            .to_string(),
        other => bail!("Period column has type {other:?}, expected a string or integer"),
    };
    Ok(label)
}

/// Price as `f64`; nulls become `None` so the row is dropped.
fn extract_price(col: &Arc<dyn Array>, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let price = match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .context("expected Float64Array")?
            .value(row),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .context("expected Float32Array")?
            .value(row) as f64,
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .context("expected Int64Array")?
            .value(row) as f64,
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .context("expected Int32Array")?
            .value(row) as f64,
        DataType::Utf8 => {
            let s = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?
                .value(row);
            return Ok(s.trim().parse().ok());
        }
        other => bail!("Price column has type {other:?}, expected a number"),
    };
    Ok(Some(price))
}
