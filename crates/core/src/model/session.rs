use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::model::QuestionId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionResultError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("{answered} answers recorded for a session of {total} questions")]
    TooManyAnswers { answered: usize, total: usize },
}

/// Outcome of one submitted question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// Aggregate result for a finished quiz session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResult {
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    total_questions: usize,
    answers: Vec<AnswerRecord>,
}

impl SessionResult {
    /// Build a result from the answers recorded during a session.
    ///
    /// # Errors
    ///
    /// Returns `SessionResultError::InvalidTimeRange` if `completed_at` is before `started_at`.
    /// Returns `SessionResultError::TooManyAnswers` if more answers than questions were recorded.
    pub fn from_answers(
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        total_questions: usize,
        answers: Vec<AnswerRecord>,
    ) -> Result<Self, SessionResultError> {
        if completed_at < started_at {
            return Err(SessionResultError::InvalidTimeRange);
        }
        if answers.len() > total_questions {
            return Err(SessionResultError::TooManyAnswers {
                answered: answers.len(),
                total: total_questions,
            });
        }
        Ok(Self {
            started_at,
            completed_at,
            total_questions,
            answers,
        })
    }

    /// Number of correctly assembled sentences.
    #[must_use]
    pub fn score(&self) -> usize {
        self.answers.iter().filter(|a| a.is_correct).count()
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.total_questions
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Wall-clock time between session start and completion.
    #[must_use]
    pub fn time_taken(&self) -> Duration {
        self.completed_at - self.started_at
    }
}
