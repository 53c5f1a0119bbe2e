use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::warn;

use super::catalog::ScreeningCatalog;
use super::domain::{ParticipantProfile, ScreeningResult, SessionError};
use super::recorder::ResultSink;
use super::report::ScreeningReportSummary;
use super::repository::{RepositoryError, SessionId, SessionRecord, SessionRepository};
use super::scoring::{ScoringEngine, ScoringError};
use super::session::{ScreeningSession, SessionProgress};

/// Service composing the catalog, session store, scoring engine, and
/// result sink behind one facade.
pub struct ScreeningService<R, S> {
    catalog: ScreeningCatalog,
    repository: Arc<R>,
    sink: Arc<S>,
    engine: ScoringEngine,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("scr-{id:06}"))
}

/// Everything returned to the participant at submission time.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub result: ScreeningResult,
    pub summary: ScreeningReportSummary,
    pub persisted: bool,
}

impl<R, S> ScreeningService<R, S>
where
    R: SessionRepository + 'static,
    S: ResultSink + 'static,
{
    pub fn new(repository: Arc<R>, sink: Arc<S>) -> Self {
        Self {
            catalog: ScreeningCatalog::standard(),
            repository,
            sink,
            engine: ScoringEngine::new(),
        }
    }

    pub fn catalog(&self) -> &ScreeningCatalog {
        &self.catalog
    }

    /// Open a session for one participant and instrument.
    pub fn start(
        &self,
        instrument_id: &str,
        participant: ParticipantProfile,
    ) -> Result<SessionRecord, ScreeningServiceError> {
        let instrument = self
            .catalog
            .find(instrument_id)
            .ok_or_else(|| ScreeningServiceError::UnknownInstrument {
                id: instrument_id.trim().to_string(),
            })?
            .clone();

        let record = SessionRecord {
            id: next_session_id(),
            session: ScreeningSession::new(instrument, participant),
        };

        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Store or overwrite one answer, returning the updated progress.
    pub fn record_answer(
        &self,
        session_id: &SessionId,
        question: usize,
        label: &str,
    ) -> Result<SessionProgress, ScreeningServiceError> {
        let mut record = self.fetch(session_id)?;
        record.session.record_answer(question, label)?;
        let progress = record.session.progress();
        self.repository.update(record)?;
        Ok(progress)
    }

    pub fn progress(&self, session_id: &SessionId) -> Result<SessionProgress, ScreeningServiceError> {
        let record = self.fetch(session_id)?;
        Ok(record.session.progress())
    }

    /// Move the page cursor forward one question, clamped at the end.
    pub fn advance(&self, session_id: &SessionId) -> Result<SessionProgress, ScreeningServiceError> {
        let mut record = self.fetch(session_id)?;
        record.session.advance();
        let progress = record.session.progress();
        self.repository.update(record)?;
        Ok(progress)
    }

    /// Move the page cursor back one question, clamped at the start.
    pub fn retreat(&self, session_id: &SessionId) -> Result<SessionProgress, ScreeningServiceError> {
        let mut record = self.fetch(session_id)?;
        record.session.retreat();
        let progress = record.session.progress();
        self.repository.update(record)?;
        Ok(progress)
    }

    /// Evaluate a complete session, persist the row, and tear the session
    /// down.
    ///
    /// A sink failure does not fail the submission: the participant still
    /// receives the outcome and the miss is logged and flagged via
    /// `persisted`.
    pub fn submit(
        &self,
        session_id: &SessionId,
        recorded_on: NaiveDate,
    ) -> Result<SubmissionOutcome, ScreeningServiceError> {
        let record = self.fetch(session_id)?;
        let result = self.engine.evaluate(&record.session, recorded_on)?;
        let summary = ScreeningReportSummary::new(&result, record.session.instrument());

        let persisted = match self.sink.append(&result) {
            Ok(()) => true,
            Err(error) => {
                warn!(session = %record.id.0, %error, "screening result row was not persisted");
                false
            }
        };

        self.repository.remove(&record.id)?;

        Ok(SubmissionOutcome {
            result,
            summary,
            persisted,
        })
    }

    /// Discard an in-flight session without scoring it.
    pub fn abandon(&self, session_id: &SessionId) -> Result<(), ScreeningServiceError> {
        self.repository.remove(session_id)?;
        Ok(())
    }

    fn fetch(&self, session_id: &SessionId) -> Result<SessionRecord, ScreeningServiceError> {
        let record = self
            .repository
            .fetch(session_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the screening service.
#[derive(Debug, thiserror::Error)]
pub enum ScreeningServiceError {
    #[error("unknown instrument '{id}'")]
    UnknownInstrument { id: String },
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
