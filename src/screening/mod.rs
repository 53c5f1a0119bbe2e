//! Screening instruments, sessions, scoring, classification, and result
//! recording.
//!
//! The catalog defines the fixed instrument presets; a session collects one
//! participant's answers; the scoring engine turns a complete session into
//! an immutable result that the recorder appends to the flat result file.

pub mod answer_sheet;
pub mod catalog;
pub mod domain;
pub mod recorder;
pub mod report;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use answer_sheet::{AnswerSheet, AnswerSheetError};
pub use catalog::ScreeningCatalog;
pub use domain::{
    AnswerScale, ClassificationBasis, ClassificationScheme, Gender, Instrument,
    ParticipantProfile, RiskBand, ScaleChoice, ScalePolarity, ScoreBand, ScreeningResult,
    SectionScore, SectionTemplate, SessionError,
};
pub use recorder::{CsvResultRecorder, RecorderError, ResultRow, ResultSink};
pub use report::{ScreeningReportSummary, SectionScoreEntry};
pub use repository::{
    InMemorySessionStore, RepositoryError, SessionId, SessionRecord, SessionRepository,
};
pub use router::screening_router;
pub use scoring::{classify, BandMatch, ScoringEngine, ScoringError};
pub use service::{ScreeningService, ScreeningServiceError, SubmissionOutcome};
pub use session::{ScreeningSession, SessionProgress};
