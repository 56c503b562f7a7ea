use crate::error::{PlotError, Result};
use crate::ir::Dataset;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use std::path::Path;

/// Reads a three-column table: label, left value, right value.
///
/// The header row is required; its second and third names become the column
/// titles. Columns past the third are ignored. Row numbers in errors count the
/// header as row 1.
pub fn read_table<R: Read>(reader: R) -> Result<Dataset> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if headers.len() < 3 {
        return Err(PlotError::ShortRow {
            row: 1,
            got: headers.len(),
        });
    }
    let mut dataset = Dataset::new(&headers[1], &headers[2]);

    for (idx, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = idx + 2;
        if record.len() < 3 {
            return Err(PlotError::ShortRow {
                row,
                got: record.len(),
            });
        }
        let left = parse_value(&record, row, 1)?;
        let right = parse_value(&record, row, 2)?;
        dataset.push(&record[0], left, right);
    }

    log::debug!(
        "read {} categories ({} -> {})",
        dataset.len(),
        dataset.left_title,
        dataset.right_title
    );
    Ok(dataset)
}

pub fn parse_csv(input: &str) -> Result<Dataset> {
    read_table(input.as_bytes())
}

pub fn read_csv(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path)?;
    read_table(std::io::BufReader::new(file))
}

fn parse_value(record: &StringRecord, row: usize, column: usize) -> Result<f32> {
    let raw = &record[column];
    raw.parse::<f32>().map_err(|source| PlotError::InvalidValue {
        row,
        column: column + 1,
        value: raw.to_string(),
        source,
    })
}
