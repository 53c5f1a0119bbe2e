use super::domain::{Instrument, ParticipantProfile, SessionError};
use serde::Serialize;

/// In-progress screening for a single participant.
///
/// Holds the instrument snapshot, one optional answer per question, and a
/// linear page cursor. All mutation is in-memory; persistence of the final
/// result belongs to the recorder.
#[derive(Debug, Clone)]
pub struct ScreeningSession {
    instrument: Instrument,
    participant: ParticipantProfile,
    answers: Vec<Option<usize>>,
    cursor: usize,
}

/// Serializable progress snapshot for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct SessionProgress {
    pub instrument: &'static str,
    pub question_count: usize,
    pub answered: usize,
    pub complete: bool,
    pub cursor: usize,
    pub current_question: &'static str,
}

impl ScreeningSession {
    pub fn new(instrument: Instrument, participant: ParticipantProfile) -> Self {
        let answers = vec![None; instrument.question_count()];
        Self {
            instrument,
            participant,
            answers,
            cursor: 0,
        }
    }

    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    pub fn participant(&self) -> &ParticipantProfile {
        &self.participant
    }

    /// Store or overwrite the answer for one question.
    pub fn record_answer(&mut self, question: usize, label: &str) -> Result<(), SessionError> {
        if question >= self.answers.len() {
            return Err(SessionError::QuestionOutOfRange {
                question,
                total: self.answers.len(),
            });
        }

        let position = self.instrument.scale.position_of(label).ok_or_else(|| {
            SessionError::InvalidAnswer {
                label: label.to_string(),
            }
        })?;

        self.answers[question] = Some(position);
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.answers.iter().all(Option::is_some)
    }

    /// Global indices of questions still unanswered.
    pub fn missing_questions(&self) -> Vec<usize> {
        self.answers
            .iter()
            .enumerate()
            .filter_map(|(index, answer)| answer.is_none().then_some(index))
            .collect()
    }

    /// Recorded answer labels in question order; `None` where unanswered.
    pub fn answer_labels(&self) -> Vec<Option<&'static str>> {
        self.answers
            .iter()
            .map(|answer| answer.map(|position| self.instrument.scale.choices()[position].label))
            .collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor forward one question, clamped at the last item.
    pub fn advance(&mut self) -> usize {
        if self.cursor + 1 < self.answers.len() {
            self.cursor += 1;
        }
        self.cursor
    }

    /// Move the cursor back one question, clamped at the first item.
    pub fn retreat(&mut self) -> usize {
        self.cursor = self.cursor.saturating_sub(1);
        self.cursor
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|answer| answer.is_some()).count()
    }

    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            instrument: self.instrument.id,
            question_count: self.answers.len(),
            answered: self.answered_count(),
            complete: self.is_complete(),
            cursor: self.cursor,
            current_question: self.instrument.question(self.cursor).unwrap_or(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::catalog::ScreeningCatalog;
    use crate::screening::domain::Gender;

    fn session() -> ScreeningSession {
        let catalog = ScreeningCatalog::standard();
        let instrument = catalog.find("qchat-10").expect("preset present").clone();
        ScreeningSession::new(
            instrument,
            ParticipantProfile {
                name: "Jordan".to_string(),
                age: 4,
                gender: Gender::Other,
            },
        )
    }

    #[test]
    fn records_and_overwrites_answers() {
        let mut session = session();
        session.record_answer(0, "Yes").expect("valid answer");
        session.record_answer(0, "No").expect("overwrite allowed");
        assert_eq!(session.answer_labels()[0], Some("No"));
        assert_eq!(session.answered_count(), 1);
    }

    #[test]
    fn rejects_labels_outside_the_scale() {
        let mut session = session();
        let error = session
            .record_answer(0, "Maybe")
            .expect_err("label outside scale");
        assert_eq!(
            error,
            SessionError::InvalidAnswer {
                label: "Maybe".to_string()
            }
        );
    }

    #[test]
    fn rejects_out_of_range_questions() {
        let mut session = session();
        let error = session
            .record_answer(10, "Yes")
            .expect_err("index past the last question");
        assert_eq!(
            error,
            SessionError::QuestionOutOfRange {
                question: 10,
                total: 10
            }
        );
    }

    #[test]
    fn completeness_requires_every_question() {
        let mut session = session();
        for question in 0..9 {
            session.record_answer(question, "Yes").expect("valid");
        }
        assert!(!session.is_complete());
        assert_eq!(session.missing_questions(), vec![9]);

        session.record_answer(9, "No").expect("valid");
        assert!(session.is_complete());
        assert!(session.missing_questions().is_empty());
    }

    #[test]
    fn cursor_clamps_at_both_ends() {
        let mut session = session();
        assert_eq!(session.retreat(), 0);
        for _ in 0..20 {
            session.advance();
        }
        assert_eq!(session.cursor(), 9);
        assert_eq!(session.advance(), 9);
        assert_eq!(session.retreat(), 8);
    }
}
