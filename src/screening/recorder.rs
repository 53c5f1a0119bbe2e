use super::domain::ScreeningResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Outbound persistence seam so the service can be exercised with
/// in-memory sinks and simulated write failures.
pub trait ResultSink: Send + Sync {
    fn append(&self, result: &ScreeningResult) -> Result<(), RecorderError>;
}

/// Persistence failures. Surfaced to the caller, never retried.
#[derive(Debug, thiserror::Error)]
pub enum RecorderError {
    #[error("result file unwritable: {0}")]
    Io(#[from] std::io::Error),
    #[error("result row could not be encoded: {0}")]
    Csv(#[from] csv::Error),
}

/// One persisted row of the flat result file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Age")]
    pub age: u8,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Instrument")]
    pub instrument: String,
    #[serde(rename = "Score")]
    pub score: u32,
    #[serde(rename = "Max Score")]
    pub max_score: u32,
    #[serde(rename = "Risk %")]
    pub risk_percent: f64,
    #[serde(rename = "Risk Level")]
    pub risk_label: String,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
}

impl From<&ScreeningResult> for ResultRow {
    fn from(result: &ScreeningResult) -> Self {
        Self {
            name: result.participant.name.clone(),
            age: result.participant.age,
            gender: result.participant.gender.label().to_string(),
            instrument: result.instrument.to_string(),
            score: result.total_score,
            max_score: result.max_score,
            risk_percent: result.percent,
            risk_label: result.risk_label.to_string(),
            date: result.recorded_on,
        }
    }
}

const HEADER: [&str; 9] = [
    "Name",
    "Age",
    "Gender",
    "Instrument",
    "Score",
    "Max Score",
    "Risk %",
    "Risk Level",
    "Date",
];

/// Appends result rows to a flat CSV file, writing the header only when
/// the file is first created. The handle is scoped to one append and is
/// released on every exit path.
#[derive(Debug, Clone)]
pub struct CsvResultRecorder {
    path: PathBuf,
}

impl CsvResultRecorder {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read every persisted row, for reports and round-trip checks.
    pub fn read_back(&self) -> Result<Vec<ResultRow>, RecorderError> {
        let file = std::fs::File::open(&self.path)?;
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut rows = Vec::new();
        for row in reader.deserialize::<ResultRow>() {
            rows.push(row?);
        }
        Ok(rows)
    }
}

impl ResultSink for CsvResultRecorder {
    fn append(&self, result: &ScreeningResult) -> Result<(), RecorderError> {
        let write_header = !self.path.exists();

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if write_header {
            writer.write_record(HEADER)?;
        }
        writer.serialize(ResultRow::from(result))?;
        writer.flush()?;
        Ok(())
    }
}
