//! CSV ingestion for sales datasets.
//!
//! Columns are matched by header name. Only `current_price`, `markdown_percentage`,
//! `is_returned` and `category` are read; any other column is ignored. A missing
//! column is recorded in the schema rather than treated as an error.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{de::Error as _, Deserialize, Deserializer};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{DataSource, Dataset, DatasetSchema, Placeholder, SalesRecord};
use crate::util::assets;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("the file has no header row")]
    MissingHeader,
    #[error("line {line}: current_price must not be negative (got {value})")]
    NegativePrice { line: u64, value: f64 },
    #[error("bundled dataset is not valid UTF-8")]
    BundledEncoding,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    current_price: Option<f64>,
    #[serde(default)]
    markdown_percentage: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    is_returned: Option<bool>,
    #[serde(default)]
    category: Option<String>,
}

impl From<RawRecord> for SalesRecord {
    fn from(raw: RawRecord) -> Self {
        SalesRecord {
            current_price: raw.current_price.filter(|v| v.is_finite()),
            markdown_percentage: raw.markdown_percentage.filter(|v| v.is_finite()),
            is_returned: raw.is_returned.unwrap_or(false),
            category: raw.category,
        }
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_flag(value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("unrecognised is_returned value {value:?}"))),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" | "1.0" => Some(true),
        "false" | "f" | "no" | "n" | "0" | "0.0" => Some(false),
        "nan" | "na" | "null" | "none" => Some(false),
        _ => None,
    }
}

/// Parses CSV text into a dataset labelled `label`.
pub fn parse_csv(label: &str, contents: &str) -> Result<Dataset, LoadError> {
    let contents = contents.trim_start_matches('\u{feff}');
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::MissingHeader);
    }
    let has = |name: &str| headers.iter().any(|h| h == name);
    let schema = DatasetSchema {
        current_price: has("current_price"),
        markdown_percentage: has("markdown_percentage"),
        is_returned: has("is_returned"),
        category: has("category"),
    };

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let raw: RawRecord = row.deserialize(Some(&headers))?;
        if let Some(value) = raw.current_price.filter(|v| *v < 0.0) {
            let line = row
                .position()
                .map(|pos| record_line(contents, pos))
                .unwrap_or_default();
            return Err(LoadError::NegativePrice { line, value });
        }
        records.push(SalesRecord::from(raw));
    }

    let missing = schema.missing_columns();
    if !missing.is_empty() {
        debug!(dataset = label, ?missing, "dataset is missing optional columns");
    }
    info!(dataset = label, rows = records.len(), "parsed dataset");

    Ok(Dataset::new(label, schema, records))
}

/// Line on which the record starting at `pos` begins. The reader marks a record
/// before skipping the blank lines and line terminators that precede it.
fn record_line(contents: &str, pos: &csv::Position) -> u64 {
    let skipped = contents
        .as_bytes()
        .get(pos.byte() as usize..)
        .unwrap_or_default()
        .iter()
        .take_while(|b| matches!(**b, b'\r' | b'\n'))
        .filter(|b| **b == b'\n')
        .count();
    pos.line() + skipped as u64
}

pub fn load_csv_file(path: &Path) -> Result<Dataset, LoadError> {
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let label = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_csv(&label, &contents)
}

pub fn placeholder_dataset(placeholder: Placeholder) -> Dataset {
    let record = match placeholder {
        Placeholder::Apparel => SalesRecord {
            current_price: Some(49.99),
            markdown_percentage: Some(20.0),
            is_returned: false,
            category: Some("Apparel".to_string()),
        },
        Placeholder::Footwear => SalesRecord {
            current_price: Some(89.0),
            markdown_percentage: Some(35.0),
            is_returned: true,
            category: Some("Footwear".to_string()),
        },
    };
    Dataset::new(placeholder.label(), DatasetSchema::all(), vec![record])
}

/// Loads whatever `source` points at.
pub fn load_source(source: &DataSource) -> Result<Dataset, LoadError> {
    match source {
        DataSource::Bundled => {
            let contents = assets::bundled_dataset().ok_or(LoadError::BundledEncoding)?;
            parse_csv(&source.label(), contents)
        }
        DataSource::ConfiguredFile(path) => load_csv_file(path),
        DataSource::Placeholder(placeholder) => Ok(placeholder_dataset(*placeholder)),
        DataSource::Upload { name, contents } => parse_csv(name, contents),
    }
}

#[cfg(test)]
mod tests {
    use std::{io::Write, sync::Arc};

    use super::*;
    use crate::domain::{elasticity, returns};

    const SAMPLE: &str = "\
product_id,category,markdown_percentage,current_price,is_returned
P1,Apparel,10,20.0,True
P2,Apparel,25,30.0,False
P3,Footwear,40,50.0,
P4,Footwear,,0.5,1
";

    #[test]
    fn parses_known_columns_and_ignores_others() {
        let dataset = parse_csv("sample", SAMPLE).unwrap();
        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.schema, DatasetSchema::all());
        assert_eq!(dataset.baseline_revenue(), Some(100.5));

        let third = &dataset.records[2];
        assert_eq!(third.category.as_deref(), Some("Footwear"));
        assert!(!third.is_returned, "blank flag reads as false");
        assert_eq!(dataset.records[3].markdown_percentage, None);
        assert!(dataset.records[3].is_returned);
    }

    #[test]
    fn three_of_ten_returned_from_csv() {
        let mut csv = String::from("current_price,is_returned\n");
        for idx in 0..10 {
            let flag = match idx {
                0..=2 => "true",
                3..=5 => "",
                _ => "false",
            };
            csv.push_str(&format!("10,{flag}\n"));
        }
        let dataset = parse_csv("returns", &csv).unwrap();
        let rate = returns::return_rate(&dataset).unwrap();
        assert!((rate - 0.30).abs() < 1e-12);
    }

    #[test]
    fn missing_price_column_is_not_an_error() {
        let csv = "category,is_returned\nApparel,true\nApparel,false\n";
        let dataset = parse_csv("no-price", csv).unwrap();
        assert!(!dataset.schema.current_price);
        assert_eq!(dataset.baseline_revenue(), None);
        assert_eq!(returns::return_rate(&dataset), Some(0.5));
        assert_eq!(
            dataset.schema.missing_columns(),
            vec!["current_price", "markdown_percentage"]
        );
    }

    #[test]
    fn header_only_file_is_an_empty_dataset() {
        let dataset = parse_csv("empty", "current_price,is_returned\n").unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.baseline_revenue(), Some(0.0));
        assert_eq!(returns::return_rate(&dataset), None);
    }

    #[test]
    fn empty_file_is_rejected() {
        assert!(matches!(parse_csv("blank", ""), Err(LoadError::MissingHeader)));
    }

    #[test]
    fn unparsable_price_is_rejected() {
        let err = parse_csv("bad", "current_price\nabc\n").unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let err = parse_csv("bad", "current_price,is_returned\n1,maybe\n").unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn negative_price_reports_line() {
        let err = parse_csv("bad", "current_price\n1\n-4\n").unwrap_err();
        match err {
            LoadError::NegativePrice { line, value } => {
                assert_eq!(line, 3);
                assert_eq!(value, -4.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn negative_price_line_counts_blank_and_multiline_rows() {
        let err = parse_csv("gaps", "current_price\n1\n\n\n-4\n").unwrap_err();
        assert!(matches!(err, LoadError::NegativePrice { line: 5, .. }), "{err}");

        let quoted = "category,current_price\n\"Outer\nwear\",3\nHome,-2\n";
        let err = parse_csv("quoted", quoted).unwrap_err();
        assert!(matches!(err, LoadError::NegativePrice { line: 4, .. }), "{err}");

        let err = parse_csv("crlf", "current_price\r\n1\r\n\r\n-4\r\n").unwrap_err();
        assert!(matches!(err, LoadError::NegativePrice { line: 4, .. }), "{err}");
    }

    #[test]
    fn byte_order_mark_is_tolerated() {
        let dataset = parse_csv("bom", "\u{feff}current_price\n5\n").unwrap();
        assert!(dataset.schema.current_price);
        assert_eq!(dataset.baseline_revenue(), Some(5.0));
    }

    #[test]
    fn flags_accept_common_spellings() {
        for raw in ["TRUE", "yes", "1", "1.0", "t"] {
            assert_eq!(parse_flag(raw), Some(true), "{raw}");
        }
        for raw in ["false", "No", "0", "0.0", "F", "NaN"] {
            assert_eq!(parse_flag(raw), Some(false), "{raw}");
        }
        assert_eq!(parse_flag("perhaps"), None);
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let dataset = load_csv_file(file.path()).unwrap();
        assert_eq!(dataset.len(), 4);
        assert!(dataset.label.ends_with(".csv"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_csv_file(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn placeholders_are_single_priced_rows() {
        for placeholder in Placeholder::ALL {
            let dataset = load_source(&DataSource::Placeholder(placeholder)).unwrap();
            assert_eq!(dataset.len(), 1);
            assert!(dataset.baseline_revenue().unwrap() > 0.0);
        }
    }

    #[test]
    fn bundled_dataset_loads_with_full_schema() {
        let dataset = load_source(&DataSource::Bundled).unwrap();
        assert!(!dataset.is_empty());
        assert_eq!(dataset.schema, DatasetSchema::all());
        let baseline = dataset.baseline_revenue().unwrap();
        let projection = elasticity::project(baseline, 0.0, -1.6);
        assert_eq!(projection.projected_revenue, baseline);
    }

    #[test]
    fn upload_source_parses_contents() {
        let source = DataSource::Upload {
            name: "mine.csv".to_string(),
            contents: Arc::from("current_price\n2\n3\n"),
        };
        let dataset = load_source(&source).unwrap();
        assert_eq!(dataset.baseline_revenue(), Some(5.0));
    }
}
