use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::LoadError;
use super::model::{LaunchDataset, LaunchRecord, Outcome};

pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const CLASS_COLUMN: &str = "class";
pub const BOOSTER_COLUMN: &str = "Booster Version Category";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming the four required columns (others ignored)
/// * `.json`    – `[{ "Launch Site": "...", "Payload Mass (kg)": 500.0, ... }, ...]`
/// * `.parquet` – one column per required field
pub fn load_file(path: &Path) -> Result<LaunchDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    log::debug!("loading {} as .{ext}", path.display());

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    LaunchDataset::from_records(records).ok_or(LoadError::Empty)
}

fn io_error(path: &Path, source: std::io::Error) -> LoadError {
    LoadError::Io {
        path: path.to_path_buf(),
        source,
    }
}

// ---------------------------------------------------------------------------
// Shared cell validation
// ---------------------------------------------------------------------------

fn parse_number(text: &str, row: usize, column: &'static str) -> Result<f64, LoadError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| LoadError::cell(row, column, format!("'{text}' is not a number")))
}

/// Validate one row's cells and turn them into a typed record.
fn build_record(
    row: usize,
    site: &str,
    payload: f64,
    class: f64,
    booster: &str,
) -> Result<LaunchRecord, LoadError> {
    let site = site.trim();
    if site.is_empty() {
        return Err(LoadError::cell(row, SITE_COLUMN, "empty launch site"));
    }
    if !payload.is_finite() || payload < 0.0 {
        return Err(LoadError::cell(
            row,
            PAYLOAD_COLUMN,
            format!("payload mass must be a finite value >= 0, got {payload}"),
        ));
    }
    let outcome = Outcome::from_class(class)
        .ok_or_else(|| LoadError::cell(row, CLASS_COLUMN, format!("class must be 0 or 1, got {class}")))?;

    Ok(LaunchRecord {
        site: site.to_string(),
        payload_mass_kg: payload,
        outcome,
        booster_category: booster.trim().to_string(),
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one launch per line.
/// Columns other than the four required ones are ignored.
fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| io_error(path, e))?;
    read_csv(file)
}

fn read_csv<R: std::io::Read>(source: R) -> Result<Vec<LaunchRecord>, LoadError> {
    let mut reader = csv::Reader::from_reader(source);
    let headers = reader.headers()?.clone();

    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(LoadError::MissingColumn(name))
    };
    let site_idx = column(SITE_COLUMN)?;
    let payload_idx = column(PAYLOAD_COLUMN)?;
    let class_idx = column(CLASS_COLUMN)?;
    let booster_idx = column(BOOSTER_COLUMN)?;

    let mut records = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let payload = parse_number(cell(payload_idx), row, PAYLOAD_COLUMN)?;
        let class = parse_number(cell(class_idx), row, CLASS_COLUMN)?;
        records.push(build_record(
            row,
            cell(site_idx),
            payload,
            class,
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
fn load_json(path: &Path) -> Result<Vec<LaunchRecord>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    read_json(&text)
}

fn read_json(text: &str) -> Result<Vec<LaunchRecord>, LoadError> {
    let rows: Vec<Map<String, JsonValue>> = serde_json::from_str(text)?;

    rows.iter()
        .enumerate()
        .map(|(row, obj)| {
            let site = json_text(obj, row, SITE_COLUMN)?;
            let payload = json_number(obj, row, PAYLOAD_COLUMN)?;
            let class = json_number(obj, row, CLASS_COLUMN)?;
            let booster = json_text(obj, row, BOOSTER_COLUMN)?;
            build_record(row, &site, payload, class, &booster)
        })
        .collect()
}

fn json_field<'a>(
    obj: &'a Map<String, JsonValue>,
    column: &'static str,
) -> Result<&'a JsonValue, LoadError> {
    obj.get(column).ok_or(LoadError::MissingColumn(column))
}

fn json_text(obj: &Map<String, JsonValue>, row: usize, column: &'static str) -> Result<String, LoadError> {
    match json_field(obj, column)? {
        JsonValue::String(s) => Ok(s.clone()),
        JsonValue::Number(n) => Ok(n.to_string()),
        other => Err(LoadError::cell(row, column, format!("expected text, got {other}"))),
    }
}

fn json_number(obj: &Map<String, JsonValue>, row: usize, column: &'static str) -> Result<f64, LoadError> {
    match json_field(obj, column)? {
        JsonValue::Number(n) => n
            .as_f64()
            .ok_or_else(|| LoadError::cell(row, column, format!("'{n}' is not representable"))),
        JsonValue::String(s) => parse_number(s, row, column),
        other => Err(LoadError::cell(row, column, format!("expected a number, got {other}"))),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of launch records.
///
/// Expected schema:
/// - `Launch Site`, `Booster Version Category`: Utf8 or LargeUtf8
/// - `Payload Mass (kg)`, `class`: Int32, Int64, Float32 or Float64
///
/// Any other columns are ignored.
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| io_error(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let schema = builder.schema().clone();
    let column = |name: &'static str| schema.index_of(name).map_err(|_| LoadError::MissingColumn(name));
    let site_idx = column(SITE_COLUMN)?;
    let payload_idx = column(PAYLOAD_COLUMN)?;
    let class_idx = column(CLASS_COLUMN)?;
    let booster_idx = column(BOOSTER_COLUMN)?;

    let reader = builder.build()?;
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        for batch_row in 0..batch.num_rows() {
            // Row numbers continue across batches.
            let row = records.len();
            let site = string_cell(batch.column(site_idx), batch_row, row, SITE_COLUMN)?;
            let payload = numeric_cell(batch.column(payload_idx), batch_row, row, PAYLOAD_COLUMN)?;
            let class = numeric_cell(batch.column(class_idx), batch_row, row, CLASS_COLUMN)?;
            let booster = string_cell(batch.column(booster_idx), batch_row, row, BOOSTER_COLUMN)?;
            records.push(build_record(row, site, payload, class, booster)?);
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

fn string_cell<'a>(
    col: &'a ArrayRef,
    batch_row: usize,
    row: usize,
    column: &'static str,
) -> Result<&'a str, LoadError> {
    if col.is_null(batch_row) {
        return Err(LoadError::cell(row, column, "null value"));
    }
    let value = match col.data_type() {
        DataType::Utf8 => col.as_string_opt::<i32>().map(|s| s.value(batch_row)),
        DataType::LargeUtf8 => col.as_string_opt::<i64>().map(|s| s.value(batch_row)),
        _ => None,
    };
    value.ok_or_else(|| {
        LoadError::cell(row, column, format!("expected a string column, got {:?}", col.data_type()))
    })
}

fn numeric_cell(col: &ArrayRef, batch_row: usize, row: usize, column: &'static str) -> Result<f64, LoadError> {
    if col.is_null(batch_row) {
        return Err(LoadError::cell(row, column, "null value"));
    }
    let value = match col.data_type() {
        DataType::Int32 => col.as_primitive_opt::<Int32Type>().map(|a| a.value(batch_row) as f64),
        DataType::Int64 => col.as_primitive_opt::<Int64Type>().map(|a| a.value(batch_row) as f64),
        DataType::Float32 => col.as_primitive_opt::<Float32Type>().map(|a| a.value(batch_row) as f64),
        DataType::Float64 => col.as_primitive_opt::<Float64Type>().map(|a| a.value(batch_row)),
        _ => None,
    };
    value.ok_or_else(|| {
        LoadError::cell(row, column, format!("expected a numeric column, got {:?}", col.data_type()))
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    const CSV_HEADER: &str =
        "Flight Number,Launch Site,Mission Outcome,class,Payload Mass (kg),Booster Version,Booster Version Category";

    fn write_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_csv_ignores_extra_columns() {
        let csv = format!(
            "{CSV_HEADER}\n\
             1,CCAFS LC-40,Success,0,0.0,F9 v1.0  B0003,v1.0\n\
             2,KSC LC-39A,Success,1,2490.0,F9 FT B1031.1,FT\n\
             3,VAFB SLC-4E,Success,1.0,9600.0,F9 B4 B1041.1,B4\n"
        );
        let file = write_file(".csv", &csv);
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.distinct_sites(), ["CCAFS LC-40", "KSC LC-39A", "VAFB SLC-4E"]);
        assert_eq!(ds.payload_bounds(), (0.0, 9600.0));
        let first = &ds.records()[0];
        assert_eq!(first.outcome, Outcome::Failure);
        assert_eq!(first.booster_category, "v1.0");
        assert_eq!(ds.records()[2].outcome, Outcome::Success);
    }

    #[test]
    fn test_load_csv_missing_column() {
        let csv = "Launch Site,class,Booster Version Category\nKSC,1,FT\n";
        let file = write_file(".csv", csv);
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(PAYLOAD_COLUMN)));
    }

    #[test]
    fn test_load_csv_rejects_bad_class() {
        let csv = format!("{CSV_HEADER}\n1,KSC,Success,2,100.0,x,FT\n");
        let file = write_file(".csv", &csv);
        match load_file(file.path()).unwrap_err() {
            LoadError::InvalidCell { row, column, .. } => {
                assert_eq!(row, 0);
                assert_eq!(column, CLASS_COLUMN);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_csv_rejects_negative_and_unparsable_payload() {
        let negative = format!("{CSV_HEADER}\n1,KSC,Success,1,-5,x,FT\n");
        let file = write_file(".csv", &negative);
        assert!(matches!(
            load_file(file.path()).unwrap_err(),
            LoadError::InvalidCell { column: PAYLOAD_COLUMN, .. }
        ));

        let garbage = format!("{CSV_HEADER}\n1,KSC,Success,1,100,x,FT\n2,KSC,Success,1,heavy,x,FT\n");
        let file = write_file(".csv", &garbage);
        assert!(matches!(
            load_file(file.path()).unwrap_err(),
            LoadError::InvalidCell { row: 1, column: PAYLOAD_COLUMN, .. }
        ));
    }

    #[test]
    fn test_load_csv_header_only_is_empty() {
        let file = write_file(".csv", &format!("{CSV_HEADER}\n"));
        assert!(matches!(load_file(file.path()).unwrap_err(), LoadError::Empty));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_file(Path::new("/nonexistent/launches.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_file(".xlsx", "");
        assert!(matches!(
            load_file(file.path()).unwrap_err(),
            LoadError::UnsupportedExtension(ext) if ext == "xlsx"
        ));
    }

    #[test]
    fn test_load_json_records() {
        let json = r#"[
            {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 5000, "class": 1, "Booster Version Category": "FT"},
            {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": "3000.5", "class": 0.0, "Booster Version Category": "FT"}
        ]"#;
        let file = write_file(".json", json);
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[1].payload_mass_kg, 3000.5);
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);
    }

    #[test]
    fn test_load_json_missing_field() {
        let json = r#"[{"Launch Site": "KSC", "class": 1, "Booster Version Category": "FT"}]"#;
        assert!(matches!(
            read_json(json).unwrap_err(),
            LoadError::MissingColumn(PAYLOAD_COLUMN)
        ));
        assert!(matches!(read_json("{}").unwrap_err(), LoadError::Json(_)));
    }

    #[test]
    fn test_load_parquet() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(SITE_COLUMN, DataType::Utf8, false),
            Field::new(PAYLOAD_COLUMN, DataType::Float64, false),
            Field::new(CLASS_COLUMN, DataType::Int64, false),
            Field::new(BOOSTER_COLUMN, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["KSC", "CCAFS"])),
                Arc::new(Float64Array::from(vec![5000.0, 7000.0])),
                Arc::new(Int64Array::from(vec![1, 0])),
                Arc::new(StringArray::from(vec!["v1", "v2"])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.distinct_sites(), ["KSC", "CCAFS"]);
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);
        assert_eq!(ds.payload_bounds(), (5000.0, 7000.0));
    }

    #[test]
    fn test_load_parquet_missing_column() {
        let schema = Arc::new(Schema::new(vec![Field::new(SITE_COLUMN, DataType::Utf8, false)]));
        let batch = RecordBatch::try_new(schema.clone(), vec![Arc::new(StringArray::from(vec!["KSC"]))]).unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        assert!(matches!(
            load_file(file.path()).unwrap_err(),
            LoadError::MissingColumn(PAYLOAD_COLUMN)
        ));
    }
}
