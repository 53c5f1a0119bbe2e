use std::sync::Arc;

use chrono::NaiveDate;

use super::common::*;
use crate::screening::repository::{InMemorySessionStore, RepositoryError, SessionRepository};
use crate::screening::scoring::ScoringError;
use crate::screening::service::{ScreeningService, ScreeningServiceError};

fn submission_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 4, 2).expect("valid date")
}

#[test]
fn start_rejects_unknown_instruments() {
    let (service, _, _) = build_service();
    let error = service
        .start("caregiver-480", participant())
        .expect_err("unknown preset");
    assert!(matches!(
        error,
        ScreeningServiceError::UnknownInstrument { id } if id == "caregiver-480"
    ));
}

#[test]
fn submission_is_blocked_while_any_question_is_unanswered() {
    let (service, repository, sink) = build_service();
    let record = service
        .start("qchat-10", participant())
        .expect("session starts");

    answer_every_question(&service, &record.id, 9, "Yes");

    let error = service
        .submit(&record.id, submission_date())
        .expect_err("one answer missing");
    match error {
        ScreeningServiceError::Scoring(ScoringError::Incomplete { missing }) => {
            assert_eq!(missing, vec![9]);
        }
        other => panic!("expected incomplete error, got {other:?}"),
    }

    // Nothing was persisted and the session survives the failed attempt.
    assert!(sink.rows().is_empty());
    assert!(repository
        .fetch(&record.id)
        .expect("fetch succeeds")
        .is_some());
}

#[test]
fn submit_scores_persists_and_tears_down() {
    let (service, repository, sink) = build_service();
    let record = service
        .start("qchat-10", participant())
        .expect("session starts");

    answer_every_question(&service, &record.id, 10, "Yes");

    let outcome = service
        .submit(&record.id, submission_date())
        .expect("complete session submits");

    assert_eq!(outcome.result.total_score, 10);
    assert_eq!(outcome.result.risk_label, "High");
    assert!(outcome.persisted);
    assert_eq!(outcome.summary.total_score, 10);
    assert_eq!(outcome.result.recorded_on, submission_date());

    let rows = sink.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total_score, 10);

    // Session is torn down once the result is out the door.
    assert!(repository
        .fetch(&record.id)
        .expect("fetch succeeds")
        .is_none());
    let error = service
        .progress(&record.id)
        .expect_err("session is gone after submission");
    assert!(matches!(
        error,
        ScreeningServiceError::Repository(RepositoryError::NotFound)
    ));
}

#[test]
fn sink_failure_still_returns_the_outcome() {
    let repository = Arc::new(InMemorySessionStore::default());
    let sink = Arc::new(UnwritableSink);
    let service = ScreeningService::new(repository, sink);

    let record = service
        .start("qchat-10", participant())
        .expect("session starts");
    for question in 0..10 {
        service
            .record_answer(&record.id, question, "No")
            .expect("valid answer");
    }

    let outcome = service
        .submit(&record.id, submission_date())
        .expect("submission survives sink failure");
    assert_eq!(outcome.result.total_score, 0);
    assert_eq!(outcome.result.risk_label, "Low");
    assert!(!outcome.persisted);
}

#[test]
fn answers_can_be_revised_before_submission() {
    let (service, _, _) = build_service();
    let record = service
        .start("qchat-10", participant())
        .expect("session starts");

    answer_every_question(&service, &record.id, 10, "Yes");
    let progress = service
        .record_answer(&record.id, 4, "No")
        .expect("overwrite allowed");
    assert!(progress.complete);

    let outcome = service
        .submit(&record.id, submission_date())
        .expect("submits");
    assert_eq!(outcome.result.total_score, 9);
}

#[test]
fn navigation_clamps_at_the_instrument_bounds() {
    let (service, _, _) = build_service();
    let record = service
        .start("qchat-10", participant())
        .expect("session starts");

    let progress = service.retreat(&record.id).expect("retreat at start");
    assert_eq!(progress.cursor, 0);

    let mut cursor = 0;
    for _ in 0..15 {
        cursor = service.advance(&record.id).expect("advance").cursor;
    }
    assert_eq!(cursor, 9);
}

#[test]
fn abandon_discards_the_session_without_persisting() {
    let (service, repository, sink) = build_service();
    let record = service
        .start("early-years-50", participant())
        .expect("session starts");

    service.abandon(&record.id).expect("abandon succeeds");

    assert!(sink.rows().is_empty());
    assert!(repository
        .fetch(&record.id)
        .expect("fetch succeeds")
        .is_none());
}
