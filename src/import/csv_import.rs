//! CSV Import
//!
//! Weight histories exported from spreadsheets. Columns are matched by
//! header name (`date`, `weight`, `unit`, `id`) or set explicitly.

use std::io::Read;
use std::path::Path;

use super::ImportError;
use crate::weight::{parse_date, WeightEntry, WeightHistory, WeightUnit};

/// CSV importer with configurable column mapping
#[derive(Debug, Clone)]
pub struct CsvWeightImporter {
    date_column: usize,
    weight_column: usize,
    unit_column: Option<usize>,
    id_column: Option<usize>,
    /// Unit for rows without a unit column or with an empty cell
    default_unit: WeightUnit,
    has_header: bool,
}

/// Result of a CSV import
#[derive(Debug)]
pub struct CsvImportReport {
    pub history: WeightHistory,
    pub rows_processed: usize,
    pub rows_failed: usize,
    pub errors: Vec<String>,
}

impl Default for CsvWeightImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvWeightImporter {
    /// `date,weight,unit,id` layout
    pub fn new() -> Self {
        Self {
            date_column: 0,
            weight_column: 1,
            unit_column: Some(2),
            id_column: Some(3),
            default_unit: WeightUnit::Kg,
            has_header: true,
        }
    }

    pub fn with_date_column(mut self, column: usize) -> Self {
        self.date_column = column;
        self
    }

    pub fn with_weight_column(mut self, column: usize) -> Self {
        self.weight_column = column;
        self
    }

    pub fn with_unit_column(mut self, column: Option<usize>) -> Self {
        self.unit_column = column;
        self
    }

    pub fn with_id_column(mut self, column: Option<usize>) -> Self {
        self.id_column = column;
        self
    }

    pub fn with_default_unit(mut self, unit: WeightUnit) -> Self {
        self.default_unit = unit;
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Map columns from a header row
    ///
    /// Columns that are not found are dropped from the mapping (unit, id)
    /// or keep their current index (date, weight).
    pub fn auto_detect_columns(&mut self, headers: &csv::StringRecord) {
        let mut unit_column = None;
        let mut id_column = None;

        for (idx, header) in headers.iter().enumerate() {
            let header = header.trim().to_lowercase();

            if header.contains("date") || header.contains("time") {
                self.date_column = idx;
            } else if header.contains("weight") || header == "peso" || header == "value" {
                self.weight_column = idx;
            } else if header.contains("unit") {
                unit_column = Some(idx);
            } else if header == "id" {
                id_column = Some(idx);
            }
        }

        self.unit_column = unit_column;
        self.id_column = id_column;
    }

    /// Import from a file, detecting columns from its header
    pub fn import(&self, path: &Path) -> Result<CsvImportReport, ImportError> {
        let file = std::fs::File::open(path)?;
        tracing::info!(path = %path.display(), "Importing weight history from CSV");
        self.import_reader(file)
    }

    /// Import from a CSV string
    pub fn import_str(&self, csv_data: &str) -> Result<CsvImportReport, ImportError> {
        self.import_reader(csv_data.as_bytes())
    }

    fn import_reader<R: Read>(&self, reader: R) -> Result<CsvImportReport, ImportError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(self.has_header)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut importer = self.clone();
        if self.has_header {
            let headers = reader.headers()?.clone();
            importer.auto_detect_columns(&headers);
        }

        let mut history = WeightHistory::new();
        let mut rows_processed = 0;
        let mut rows_failed = 0;
        let mut errors = Vec::new();

        for (line_num, result) in reader.records().enumerate() {
            let actual_line = if self.has_header {
                line_num + 2
            } else {
                line_num + 1
            };

            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    errors.push(format!("Line {}: {}", actual_line, e));
                    rows_failed += 1;
                    continue;
                }
            };

            match importer.parse_record(&record) {
                Ok(entry) => {
                    history.add(entry);
                    rows_processed += 1;
                }
                Err(e) => {
                    errors.push(format!("Line {}: {}", actual_line, e));
                    rows_failed += 1;
                }
            }
        }

        // Truncate errors if too many
        if errors.len() > 100 {
            let total = errors.len();
            errors.truncate(100);
            errors.push(format!("... and {} more errors", total - 100));
        }

        if rows_failed > 0 {
            tracing::warn!(rows_failed, rows_processed, "Some CSV rows could not be imported");
        }

        Ok(CsvImportReport {
            history,
            rows_processed,
            rows_failed,
            errors,
        })
    }

    fn parse_record(&self, record: &csv::StringRecord) -> Result<WeightEntry, ImportError> {
        let date_str = record
            .get(self.date_column)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ImportError::ParseError("missing date column".to_string()))?;
        let date = parse_date(date_str)
            .ok_or_else(|| ImportError::ParseError(format!("Could not parse date: {}", date_str)))?;

        let weight_str = record
            .get(self.weight_column)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ImportError::ParseError("missing weight column".to_string()))?;
        let weight: f64 = weight_str
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|w| w.is_finite() && *w >= 0.0)
            .ok_or_else(|| ImportError::ParseError(format!("Invalid weight: {}", weight_str)))?;

        let unit = self
            .unit_column
            .and_then(|idx| record.get(idx))
            .filter(|s| !s.is_empty())
            .map(|tag| {
                WeightUnit::from_tag(tag)
                    .ok_or_else(|| ImportError::ParseError(format!("Unknown unit: {}", tag)))
            })
            .transpose()?
            .unwrap_or(self.default_unit);

        let id = self
            .id_column
            .and_then(|idx| record.get(idx))
            .unwrap_or_default();

        Ok(WeightEntry::new(date, weight, unit).id(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_import_with_header() {
        let data = "date,weight,unit,id\n\
                    2023-01-15,34,kg,w1\n\
                    2023-07-20,35.2,kg,w2\n\
                    2024-01-10,78.9,lb,w3\n";
        let report = CsvWeightImporter::new().import_str(data).unwrap();

        assert_eq!(report.rows_processed, 3);
        assert_eq!(report.rows_failed, 0);
        assert_eq!(report.history.get("w3").unwrap().unit, WeightUnit::Lb);
    }

    #[test]
    fn test_auto_detect_reordered_columns() {
        let data = "Weight (kg);Measured Date\n";
        let mut importer = CsvWeightImporter::new();
        let headers = csv::StringRecord::from(data.trim().split(';').collect::<Vec<_>>());
        importer.auto_detect_columns(&headers);

        assert_eq!(importer.weight_column, 0);
        assert_eq!(importer.date_column, 1);
        assert_eq!(importer.unit_column, None);
        assert_eq!(importer.id_column, None);
    }

    #[test]
    fn test_default_unit_and_generated_ids() {
        let data = "weight,date\n2500,01/02/2024\n2600,01/03/2024\n";
        let report = CsvWeightImporter::new()
            .with_default_unit(WeightUnit::G)
            .import_str(data)
            .unwrap();

        assert_eq!(report.rows_processed, 2);
        let entries = report.history.entries();
        assert!(entries.iter().all(|e| e.unit == WeightUnit::G && !e.id.is_empty()));
        assert!((entries[0].weight_kg() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_bad_rows_reported() {
        let data = "date,weight,unit\n\
                    2024-01-01,10,kg\n\
                    someday,11,kg\n\
                    2024-01-03,heavy,kg\n\
                    2024-01-04,12,stone\n";
        let report = CsvWeightImporter::new().import_str(data).unwrap();

        assert_eq!(report.rows_processed, 1);
        assert_eq!(report.rows_failed, 3);
        assert!(report.errors[0].starts_with("Line 3:"));
        assert!(report.errors[1].contains("Invalid weight"));
        assert!(report.errors[2].contains("Unknown unit"));
    }

    #[test]
    fn test_non_finite_and_negative_weights_rejected() {
        let data = "date,weight,unit\n\
                    2024-01-01,NaN,kg\n\
                    2024-02-01,12,kg\n\
                    2024-03-01,inf,kg\n\
                    2024-04-01,-infinity,kg\n\
                    2024-05-01,-3,kg\n";
        let report = CsvWeightImporter::new().import_str(data).unwrap();

        assert_eq!(report.rows_processed, 1);
        assert_eq!(report.rows_failed, 4);
        assert!(report.errors.iter().all(|e| e.contains("Invalid weight")));
        assert!(report.history.entries().iter().all(|e| e.weight.is_finite()));
    }

    #[test]
    fn test_decimal_comma() {
        let data = "date,weight\n2024-01-01,\"10,5\"\n";
        let report = CsvWeightImporter::new().import_str(data).unwrap();
        assert_eq!(report.history.entries()[0].weight, 10.5);
    }

    #[test]
    fn test_import_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "date,weight,unit").unwrap();
        writeln!(file, "2024-01-01,10,kg").unwrap();
        writeln!(file, "2024-02-01,12,kg").unwrap();

        let report = CsvWeightImporter::new().import(file.path()).unwrap();
        assert_eq!(report.rows_processed, 2);
        assert!(report.history.is_chartable());
    }
}
