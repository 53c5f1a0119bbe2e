use std::sync::{Arc, Mutex};

use crate::screening::domain::{Gender, ParticipantProfile, ScreeningResult};
use crate::screening::recorder::{RecorderError, ResultSink};
use crate::screening::repository::{InMemorySessionStore, SessionId};
use crate::screening::router::screening_router;
use crate::screening::service::ScreeningService;

pub(super) fn participant() -> ParticipantProfile {
    ParticipantProfile {
        name: "Ravi".to_string(),
        age: 5,
        gender: Gender::Male,
    }
}

#[derive(Default)]
pub(super) struct MemorySink {
    rows: Mutex<Vec<ScreeningResult>>,
}

impl MemorySink {
    pub(super) fn rows(&self) -> Vec<ScreeningResult> {
        self.rows.lock().expect("sink mutex poisoned").clone()
    }
}

impl ResultSink for MemorySink {
    fn append(&self, result: &ScreeningResult) -> Result<(), RecorderError> {
        self.rows
            .lock()
            .expect("sink mutex poisoned")
            .push(result.clone());
        Ok(())
    }
}

pub(super) struct UnwritableSink;

impl ResultSink for UnwritableSink {
    fn append(&self, _result: &ScreeningResult) -> Result<(), RecorderError> {
        Err(RecorderError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "result file is read only",
        )))
    }
}

pub(super) fn build_service() -> (
    Arc<ScreeningService<InMemorySessionStore, MemorySink>>,
    Arc<InMemorySessionStore>,
    Arc<MemorySink>,
) {
    let repository = Arc::new(InMemorySessionStore::default());
    let sink = Arc::new(MemorySink::default());
    let service = Arc::new(ScreeningService::new(repository.clone(), sink.clone()));
    (service, repository, sink)
}

pub(super) fn build_router() -> axum::Router {
    let (service, _, _) = build_service();
    screening_router(service)
}

pub(super) fn answer_every_question(
    service: &ScreeningService<InMemorySessionStore, MemorySink>,
    session_id: &SessionId,
    count: usize,
    label: &str,
) {
    for question in 0..count {
        service
            .record_answer(session_id, question, label)
            .expect("valid answer");
    }
}
