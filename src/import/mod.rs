//! Weight history import
//!
//! Loads histories from:
//! - JSON (an array of entries, or an object with a `weight_history` /
//!   `weightHistory` array as found in exported medical records)
//! - CSV (see [`CsvWeightImporter`])

mod csv_import;

pub use csv_import::{CsvImportReport, CsvWeightImporter};

use serde::Deserialize;
use std::path::Path;

use crate::weight::{WeightEntry, WeightHistory};

/// Errors that can occur while importing a history
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonHistory {
    Entries(Vec<WeightEntry>),
    Record {
        #[serde(alias = "weightHistory")]
        weight_history: Vec<WeightEntry>,
    },
}

/// Parse a JSON history
pub fn history_from_json(json: &str) -> Result<WeightHistory, ImportError> {
    let entries = match serde_json::from_str::<JsonHistory>(json) {
        Ok(JsonHistory::Entries(entries)) => entries,
        Ok(JsonHistory::Record { weight_history }) => weight_history,
        // Re-parse as a plain array to surface a useful error message
        Err(_) => serde_json::from_str::<Vec<WeightEntry>>(json)?,
    };
    Ok(entries.into())
}

/// Load a history from a `.json` or `.csv` file
pub fn load_history(path: &Path) -> Result<WeightHistory, ImportError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let history = match extension.as_str() {
        "json" => history_from_json(&std::fs::read_to_string(path)?)?,
        "csv" => {
            let report = CsvWeightImporter::new().import(path)?;
            for error in report.errors.iter().take(10) {
                tracing::warn!(path = %path.display(), "{}", error);
            }
            report.history
        }
        other => return Err(ImportError::UnsupportedFormat(other.to_string())),
    };

    tracing::info!(path = %path.display(), entries = history.len(), "Loaded weight history");
    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weight::WeightUnit;
    use std::io::Write;

    #[test]
    fn test_json_array() {
        let json = r#"[
            {"id": "w1", "date": "2023-01-15T12:00:00Z", "weight": 34, "unit": "kg"},
            {"id": "w3", "date": "2024-01-10T12:00:00Z", "weight": 78.9, "unit": "lb"}
        ]"#;
        let history = history_from_json(json).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.get("w3").unwrap().unit, WeightUnit::Lb);
    }

    #[test]
    fn test_json_medical_record() {
        let json = r#"{"petId": "1", "weightHistory": [
            {"date": "2024-01-01", "weight": 10},
            {"date": "2024-02-01", "weight": 12}
        ]}"#;
        let history = history_from_json(json).unwrap();
        assert!(history.is_chartable());
    }

    #[test]
    fn test_json_invalid() {
        let err = history_from_json(r#"[{"date": "soon", "weight": 1}]"#).unwrap_err();
        assert!(matches!(err, ImportError::Json(_)));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("history.json");
        std::fs::write(&json_path, serde_json::to_string(&WeightHistory::sample()).unwrap()).unwrap();
        assert_eq!(load_history(&json_path).unwrap(), WeightHistory::sample());

        let csv_path = dir.path().join("history.CSV");
        let mut file = std::fs::File::create(&csv_path).unwrap();
        writeln!(file, "date,weight,unit\n2024-01-01,10,kg\n2024-02-01,12,kg").unwrap();
        assert_eq!(load_history(&csv_path).unwrap().len(), 2);

        let txt_path = dir.path().join("history.txt");
        std::fs::write(&txt_path, "").unwrap();
        assert!(matches!(
            load_history(&txt_path),
            Err(ImportError::UnsupportedFormat(_))
        ));
    }
}
