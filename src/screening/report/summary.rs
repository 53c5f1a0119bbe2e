use super::views::{ScreeningReportSummary, SectionScoreEntry};
use crate::screening::domain::{Instrument, ScreeningResult};
use std::fmt::Write as _;

impl ScreeningReportSummary {
    pub fn new(result: &ScreeningResult, instrument: &Instrument) -> Self {
        let sections = result
            .section_scores
            .iter()
            .map(|section| SectionScoreEntry {
                key: section.key,
                name: section.name,
                score: section.score,
                max: section.max,
            })
            .collect();

        Self {
            participant_name: result.participant.name.clone(),
            age: result.participant.age,
            gender_label: result.participant.gender.label(),
            instrument: result.instrument,
            instrument_name: instrument.name,
            total_score: result.total_score,
            max_score: result.max_score,
            percent: result.percent,
            risk_label: result.risk_label,
            guidance: result.guidance,
            recorded_on: result.recorded_on,
            sections,
        }
    }

    /// Plain-text rendering offered to participants as a download.
    pub fn render_text(&self) -> String {
        let mut report = String::new();

        let _ = writeln!(report, "Screening Report ({})", self.instrument_name);
        let _ = writeln!(report);
        let _ = writeln!(report, "Name: {}", self.participant_name);
        let _ = writeln!(report, "Age: {}", self.age);
        let _ = writeln!(report, "Gender: {}", self.gender_label);
        let _ = writeln!(report, "Date: {}", self.recorded_on);
        let _ = writeln!(report);
        let _ = writeln!(
            report,
            "Total Score: {} / {}",
            self.total_score, self.max_score
        );
        let _ = writeln!(report, "Score Percentage: {:.2}%", self.percent);
        let _ = writeln!(report, "Risk Level: {}", self.risk_label);
        let _ = writeln!(report, "{}", self.guidance);

        if !self.sections.is_empty() {
            let _ = writeln!(report);
            let _ = writeln!(report, "Section Scores:");
            for section in &self.sections {
                let _ = writeln!(report, "{}: {} / {}", section.name, section.score, section.max);
            }
        }

        let _ = writeln!(report);
        let _ = writeln!(
            report,
            "Note: this is a screening aid, not a clinical diagnosis."
        );

        report
    }
}
