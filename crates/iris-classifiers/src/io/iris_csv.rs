//! Iris CSV reader.
use csv::StringRecord;

use crate::data_handling::{Record, Table, COLUMN_NAMES};
use crate::error::{IrisError, Result};
use crate::io::fetch::{fetch_resource, FetchConfig};

/// Highest species code present in the three-class files.
const MAX_SPECIES_CODE: i64 = 2;

/// Fetch `location` (URL or local path) and parse it into a `Table`.
pub fn load_table(location: &str, config: &FetchConfig) -> Result<Table> {
    let bytes = fetch_resource(location, config)?;
    let table = parse_iris_csv(&bytes).map_err(|e| match e {
        IrisError::Format(msg) => IrisError::Format(format!("{}: {}", location, msg)),
        other => other,
    })?;
    log::info!("Loaded {} rows from {}", table.nrows(), location);
    Ok(table)
}

/// Parse CSV bytes into a `Table`.
///
/// The first row is a header. Its contents are ignored and the columns are
/// named by position as `COLUMN_NAMES`. Each data row must carry exactly
/// four measurements followed by an integer species code in `0..=2`.
pub fn parse_iris_csv(bytes: &[u8]) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    reader
        .headers()
        .map_err(|e| IrisError::Format(format!("Failed to read header row: {}", e)))?;

    let mut records = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        // header is row 1
        let row_nr = row_idx + 2;
        let record = result.map_err(|e| IrisError::Format(format!("row {}: {}", row_nr, e)))?;
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }
        records.push(parse_record(&record, row_nr)?);
    }

    Ok(Table::new(records))
}

fn parse_record(record: &StringRecord, row_nr: usize) -> Result<Record> {
    if record.len() != COLUMN_NAMES.len() {
        return Err(IrisError::Format(format!(
            "row {} has {} fields, expected {}",
            row_nr,
            record.len(),
            COLUMN_NAMES.len()
        )));
    }

    let mut measurements = [0.0f64; 4];
    for (i, slot) in measurements.iter_mut().enumerate() {
        let raw = &record[i];
        *slot = raw.parse::<f64>().map_err(|_| {
            IrisError::Format(format!(
                "row {}: invalid {} value '{}'",
                row_nr, COLUMN_NAMES[i], raw
            ))
        })?;
    }

    let raw_species = &record[4];
    let species = raw_species.parse::<i64>().map_err(|_| {
        IrisError::Format(format!(
            "row {}: invalid {} value '{}'",
            row_nr, COLUMN_NAMES[4], raw_species
        ))
    })?;
    if !(0..=MAX_SPECIES_CODE).contains(&species) {
        return Err(IrisError::Format(format!(
            "row {}: species code {} outside 0..={}",
            row_nr, species, MAX_SPECIES_CODE
        )));
    }

    let [sepal_length, sepal_width, petal_length, petal_width] = measurements;
    Ok(Record::new(
        sepal_length,
        sepal_width,
        petal_length,
        petal_width,
        species,
    ))
}
