use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// One selectable answer together with its scoring weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleChoice {
    pub label: &'static str,
    pub weight: u32,
}

/// Closed, ordered set of answer choices for an instrument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerScale {
    choices: Vec<ScaleChoice>,
}

impl AnswerScale {
    pub fn new(choices: Vec<ScaleChoice>) -> Self {
        Self { choices }
    }

    pub fn choices(&self) -> &[ScaleChoice] {
        &self.choices
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.choices.iter().map(|choice| choice.label).collect()
    }

    /// Position of a label within the scale. Matching ignores surrounding
    /// whitespace and ASCII case so hand-typed answer sheets resolve.
    pub fn position_of(&self, label: &str) -> Option<usize> {
        let wanted = label.trim();
        self.choices
            .iter()
            .position(|choice| choice.label.eq_ignore_ascii_case(wanted))
    }

    pub fn weight_of(&self, label: &str) -> Option<u32> {
        self.position_of(label)
            .map(|position| self.choices[position].weight)
    }

    pub fn max_weight(&self) -> u32 {
        self.choices
            .iter()
            .map(|choice| choice.weight)
            .max()
            .unwrap_or(0)
    }
}

/// Canonical scoring direction for an instrument.
///
/// The source material disagrees on whether frequent behavior raises or
/// lowers the score; each preset commits to exactly one direction instead of
/// reconciling the variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalePolarity {
    FrequencyIndicatesRisk,
    FrequencyIndicatesTypical,
}

impl ScalePolarity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FrequencyIndicatesRisk => "frequent behavior raises the score",
            Self::FrequencyIndicatesTypical => "frequent behavior lowers the score",
        }
    }
}

/// Whether breakpoints compare against the raw total or the percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationBasis {
    RawTotal,
    Percent,
}

/// Discrete classification outcome attached to a score band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskBand {
    pub label: &'static str,
    pub guidance: &'static str,
}

/// A breakpoint: values strictly below `upper` fall into `band`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBand {
    pub upper: f64,
    pub band: RiskBand,
}

/// Ordered breakpoints plus the unbounded ceiling band.
///
/// A value equal to a band's upper bound belongs to the next band: with
/// bands at 40 and 60, a percentage of 59.99 classifies as the middle band
/// and 60.00 as the ceiling.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationScheme {
    pub basis: ClassificationBasis,
    pub bands: Vec<ScoreBand>,
    pub ceiling: RiskBand,
}

impl ClassificationScheme {
    pub fn new(basis: ClassificationBasis, bands: Vec<ScoreBand>, ceiling: RiskBand) -> Self {
        debug_assert!(
            bands.windows(2).all(|pair| pair[0].upper < pair[1].upper),
            "score bands must be strictly ascending"
        );
        Self {
            basis,
            bands,
            ceiling,
        }
    }
}

/// Named ordered group of questions used for sub-score reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionTemplate {
    pub key: &'static str,
    pub name: &'static str,
    pub questions: Vec<&'static str>,
}

/// A named fixed questionnaire: sections, scale, and breakpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub sections: Vec<SectionTemplate>,
    pub scale: AnswerScale,
    pub polarity: ScalePolarity,
    pub classification: ClassificationScheme,
}

impl Instrument {
    pub fn question_count(&self) -> usize {
        self.sections
            .iter()
            .map(|section| section.questions.len())
            .sum()
    }

    pub fn max_weight(&self) -> u32 {
        self.scale.max_weight()
    }

    pub fn max_score(&self) -> u32 {
        self.question_count() as u32 * self.max_weight()
    }

    /// Question text by global position index.
    pub fn question(&self, index: usize) -> Option<&'static str> {
        let mut offset = index;
        for section in &self.sections {
            if offset < section.questions.len() {
                return Some(section.questions[offset]);
            }
            offset -= section.questions.len();
        }
        None
    }

    /// Each section paired with its global index range.
    pub fn section_ranges(&self) -> Vec<(&SectionTemplate, Range<usize>)> {
        let mut ranges = Vec::with_capacity(self.sections.len());
        let mut start = 0;
        for section in &self.sections {
            let end = start + section.questions.len();
            ranges.push((section, start..end));
            start = end;
        }
        ranges
    }
}

/// Participant gender as collected on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
    Other,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Male => "Male",
            Self::Other => "Other",
        }
    }
}

/// Identifying fields captured once per screening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantProfile {
    pub name: String,
    pub age: u8,
    pub gender: Gender,
}

/// Per-section subtotal of a completed screening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionScore {
    pub key: &'static str,
    pub name: &'static str,
    pub score: u32,
    pub max: u32,
}

/// Immutable outcome of one submitted screening.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreeningResult {
    pub instrument: &'static str,
    pub participant: ParticipantProfile,
    pub total_score: u32,
    pub max_score: u32,
    pub percent: f64,
    pub section_scores: Vec<SectionScore>,
    pub risk_label: &'static str,
    pub guidance: &'static str,
    pub recorded_on: NaiveDate,
}

/// Errors raised while recording answers into a session.
#[derive(Debug, PartialEq, Eq)]
pub enum SessionError {
    InvalidAnswer { label: String },
    QuestionOutOfRange { question: usize, total: usize },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidAnswer { label } => {
                write!(f, "answer '{label}' is not part of the instrument scale")
            }
            SessionError::QuestionOutOfRange { question, total } => {
                write!(
                    f,
                    "question index {question} out of range for a {total}-item instrument"
                )
            }
        }
    }
}

impl std::error::Error for SessionError {}
