//! Loading the mobile office JSON dataset from disk.
//!
//! The published file has appeared in two shapes over time: a bare JSON
//! array of records, and an object wrapping the array in a `data` field
//! alongside a `lastUpdateDate` stamp. Both are accepted. Files exported
//! from Windows tooling may carry a UTF-8 BOM, which is stripped before
//! parsing.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::record::SourceRecord;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("JSON file not found: {path}")]
    NotFound { path: String },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// The parsed dataset: records in file order plus the declared update stamp.
#[derive(Debug, Default)]
pub struct Dataset {
    pub records: Vec<SourceRecord>,
    pub last_update_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WrappedDataset {
    #[serde(default)]
    data: Value,
    #[serde(rename = "lastUpdateDate", default)]
    last_update_date: Option<String>,
}

/// Read and parse the dataset file.
///
/// An object without a `data` array yields zero records (the caller treats
/// an empty dataset as a top-level failure) while `lastUpdateDate` is still
/// read from the object.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file is missing, unreadable, or not
/// valid JSON of either accepted shape.
pub fn load_dataset(path: &Path) -> Result<Dataset, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::NotFound {
            path: path.display().to_string(),
        });
    }

    let raw = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(&raw);

    let parse_err = |source| DatasetError::Parse {
        path: path.display().to_string(),
        source,
    };

    let value: Value = serde_json::from_str(raw).map_err(parse_err)?;
    match value {
        Value::Array(_) => {
            let records: Vec<SourceRecord> =
                serde_json::from_value(value).map_err(parse_err)?;
            Ok(Dataset {
                records,
                last_update_date: None,
            })
        }
        Value::Object(_) => {
            let wrapped: WrappedDataset = serde_json::from_value(value).map_err(parse_err)?;
            let records = match wrapped.data {
                Value::Array(_) => serde_json::from_value(wrapped.data).map_err(parse_err)?,
                _ => Vec::new(),
            };
            Ok(Dataset {
                records,
                last_update_date: wrapped.last_update_date,
            })
        }
        _ => Ok(Dataset::default()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_fixture(content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        file.write_all(content).expect("write temp file");
        file
    }

    #[test]
    fn loads_bare_array_shape() {
        let file = write_fixture(br#"[{"mobileCode": "MPO1", "dayOfWeekCode": 1, "seq": 1}]"#);
        let dataset = load_dataset(file.path()).unwrap();
        assert_eq!(dataset.records.len(), 1);
        assert_eq!(dataset.last_update_date, None);
    }

    #[test]
    fn loads_wrapped_shape_with_last_update_date() {
        let file = write_fixture(
            br#"{"lastUpdateDate": "2024-03-01", "data": [{"mobileCode": "MPO1"}, {"mobileCode": "MPO2"}]}"#,
        );
        let dataset = load_dataset(file.path()).unwrap();
        assert_eq!(dataset.records.len(), 2);
        assert_eq!(dataset.last_update_date.as_deref(), Some("2024-03-01"));
    }

    #[test]
    fn strips_leading_bom() {
        let mut content = Vec::from(&b"\xef\xbb\xbf"[..]);
        content.extend_from_slice(br#"[{"mobileCode": "MPO1"}]"#);
        let file = write_fixture(&content);
        let dataset = load_dataset(file.path()).unwrap();
        assert_eq!(dataset.records.len(), 1);
    }

    #[test]
    fn object_without_data_array_yields_zero_records() {
        let file = write_fixture(br#"{"lastUpdateDate": "2024-03-01", "data": "oops"}"#);
        let dataset = load_dataset(file.path()).unwrap();
        assert!(dataset.records.is_empty());
        assert_eq!(dataset.last_update_date.as_deref(), Some("2024-03-01"));
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        let err = load_dataset(Path::new("/no/such/mobile-office.json")).unwrap_err();
        assert!(matches!(err, DatasetError::NotFound { .. }));
        assert!(err.to_string().contains("/no/such/mobile-office.json"));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let file = write_fixture(b"{not json");
        let err = load_dataset(file.path()).unwrap_err();
        assert!(matches!(err, DatasetError::Parse { .. }));
    }
}
