use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SectionScoreEntry {
    pub key: &'static str,
    pub name: &'static str,
    pub score: u32,
    pub max: u32,
}

/// Serializable report of one submitted screening, generated on demand and
/// never persisted beyond the CSV row.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningReportSummary {
    pub participant_name: String,
    pub age: u8,
    pub gender_label: &'static str,
    pub instrument: &'static str,
    pub instrument_name: &'static str,
    pub total_score: u32,
    pub max_score: u32,
    pub percent: f64,
    pub risk_label: &'static str,
    pub guidance: &'static str,
    pub recorded_on: NaiveDate,
    pub sections: Vec<SectionScoreEntry>,
}
