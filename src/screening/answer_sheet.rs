use super::domain::SessionError;
use super::session::ScreeningSession;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Errors raised while loading an offline answer sheet.
#[derive(Debug)]
pub enum AnswerSheetError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidQuestionNumber { value: String, row: usize },
    Session(SessionError),
}

impl std::fmt::Display for AnswerSheetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerSheetError::Io(err) => write!(f, "failed to read answer sheet: {}", err),
            AnswerSheetError::Csv(err) => write!(f, "invalid answer sheet data: {}", err),
            AnswerSheetError::InvalidQuestionNumber { value, row } => {
                write!(
                    f,
                    "row {row}: '{value}' is not a valid 1-based question number"
                )
            }
            AnswerSheetError::Session(err) => {
                write!(f, "could not apply answer sheet to session: {}", err)
            }
        }
    }
}

impl std::error::Error for AnswerSheetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnswerSheetError::Io(err) => Some(err),
            AnswerSheetError::Csv(err) => Some(err),
            AnswerSheetError::InvalidQuestionNumber { .. } => None,
            AnswerSheetError::Session(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for AnswerSheetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for AnswerSheetError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<SessionError> for AnswerSheetError {
    fn from(err: SessionError) -> Self {
        Self::Session(err)
    }
}

#[derive(Debug, Deserialize)]
struct AnswerSheetRow {
    #[serde(rename = "Question")]
    question: String,
    #[serde(rename = "Answer")]
    answer: String,
}

/// A parsed `Question,Answer` CSV. Question numbers are 1-based; duplicate
/// rows overwrite earlier ones, matching session semantics.
#[derive(Debug)]
pub struct AnswerSheet {
    entries: Vec<(usize, String)>,
}

impl AnswerSheet {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, AnswerSheetError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AnswerSheetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut entries = Vec::new();
        for (index, row) in csv_reader.deserialize::<AnswerSheetRow>().enumerate() {
            let row = row?;
            let number: usize = row.question.trim().parse().map_err(|_| {
                AnswerSheetError::InvalidQuestionNumber {
                    value: row.question.clone(),
                    row: index + 2,
                }
            })?;
            if number == 0 {
                return Err(AnswerSheetError::InvalidQuestionNumber {
                    value: row.question,
                    row: index + 2,
                });
            }
            entries.push((number - 1, row.answer));
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record every entry into the session, last duplicate winning.
    pub fn apply(&self, session: &mut ScreeningSession) -> Result<(), AnswerSheetError> {
        for (question, answer) in &self.entries {
            session.record_answer(*question, answer)?;
        }
        Ok(())
    }
}
