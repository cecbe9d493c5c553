use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde_json::json;

const OUTPUT_DIR: &str = "sample_data";
const FIRST_YEAR: i32 = 1990;
const LAST_YEAR: i32 = 2023;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Monthly prices as a mean-reverting random walk in log space, with labels
/// alternating between the `YYYYMmm` and `YYYYmm` spellings.
fn generate_series(rng: &mut SimpleRng) -> Vec<(String, f64)> {
    let anchor = 55f64.ln();
    let mut log_price = 20f64.ln();
    let mut rows = Vec::new();

    for year in FIRST_YEAR..=LAST_YEAR {
        for month in 1..=12 {
            log_price += 0.02 * (anchor - log_price) + rng.gauss(0.0, 0.07);
            let label = if (year + month) % 2 == 0 {
                format!("{year}M{month:02}")
            } else {
                format!("{year}{month:02}")
            };
            let price = (log_price.exp() * 100.0).round() / 100.0;
            rows.push((label, price));
        }
    }
    rows
}

fn write_csv(path: &Path, rows: &[(String, f64)]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .context("creating CSV")?;
    for (label, price) in rows {
        writer.write_record([label.as_str(), price.to_string().as_str()])?;
    }
    // Rows the viewer drops on load.
    writer.write_record(["Average 1990-2023", "n/a"])?;
    writer.write_record(["2024M13", "80.0"])?;
    writer.flush()?;
    Ok(())
}

fn write_json(path: &Path, rows: &[(String, f64)]) -> Result<()> {
    let pairs: Vec<_> = rows
        .iter()
        .map(|(label, price)| json!([label, price]))
        .collect();
    let text = serde_json::to_string_pretty(&pairs)?;
    fs::write(path, text).context("writing JSON")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[(String, f64)]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("date", DataType::Utf8, false),
        Field::new("price", DataType::Float64, false),
    ]));
    let labels = StringArray::from(rows.iter().map(|(l, _)| l.as_str()).collect::<Vec<_>>());
    let prices = Float64Array::from(rows.iter().map(|(_, p)| *p).collect::<Vec<_>>());
    let columns: Vec<ArrayRef> = vec![Arc::new(labels), Arc::new(prices)];
    let batch = RecordBatch::try_new(schema.clone(), columns)?;

    let file = File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate_series(&mut rng);

    let dir = Path::new(OUTPUT_DIR);
    fs::create_dir_all(dir).context("creating output directory")?;

    write_csv(&dir.join("brent_monthly.csv"), &rows)?;
    write_json(&dir.join("brent_monthly.json"), &rows)?;
    write_parquet(&dir.join("brent_monthly.parquet"), &rows)?;

    println!(
        "Wrote {} monthly prices ({FIRST_YEAR}-{LAST_YEAR}) to {OUTPUT_DIR}/brent_monthly.{{csv,json,parquet}}",
        rows.len()
    );
    Ok(())
}
