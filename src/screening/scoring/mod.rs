mod classify;
mod rules;

pub use classify::{classify, BandMatch};

use super::domain::{ClassificationBasis, ScreeningResult};
use super::session::ScreeningSession;
use chrono::NaiveDate;
use std::fmt;

/// Stateless evaluator turning a completed session into a screening result.
#[derive(Debug, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    /// Score, classify, and freeze the outcome of a session.
    ///
    /// Fails with `Incomplete` while any question lacks an answer; nothing
    /// in the session is mutated on failure.
    pub fn evaluate(
        &self,
        session: &ScreeningSession,
        recorded_on: NaiveDate,
    ) -> Result<ScreeningResult, ScoringError> {
        let missing = session.missing_questions();
        if !missing.is_empty() {
            return Err(ScoringError::Incomplete { missing });
        }

        let labels: Vec<&str> = session
            .answer_labels()
            .into_iter()
            .flatten()
            .collect();

        let instrument = session.instrument();
        let total_score = rules::score_answers(&labels, &instrument.scale)?;
        let section_scores = rules::section_subtotals(&labels, instrument)?;

        let max_score = instrument.max_score();
        let percent = round_percent(total_score, max_score);

        let basis_value = match instrument.classification.basis {
            ClassificationBasis::RawTotal => total_score as f64,
            ClassificationBasis::Percent => percent,
        };
        let matched = classify(basis_value, &instrument.classification);

        Ok(ScreeningResult {
            instrument: instrument.id,
            participant: session.participant().clone(),
            total_score,
            max_score,
            percent,
            section_scores,
            risk_label: matched.band.label,
            guidance: matched.band.guidance,
            recorded_on,
        })
    }
}

/// Percentage of the maximum attainable score, rounded to two decimals.
fn round_percent(total: u32, max: u32) -> f64 {
    if max == 0 {
        return 0.0;
    }
    let raw = total as f64 / max as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}

/// Errors raised while evaluating a session.
#[derive(Debug, PartialEq, Eq)]
pub enum ScoringError {
    Incomplete { missing: Vec<usize> },
    UnknownLabel { label: String },
}

impl fmt::Display for ScoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringError::Incomplete { missing } => {
                write!(f, "{} question(s) still unanswered", missing.len())
            }
            ScoringError::UnknownLabel { label } => {
                write!(f, "answer '{label}' has no configured weight")
            }
        }
    }
}

impl std::error::Error for ScoringError {}
