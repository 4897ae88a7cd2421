use chrono::{DateTime, Utc};

use crate::model::{AnswerRecord, Question, SessionResult, SessionResultError};
use crate::template::normalize_whitespace;

/// Accumulates per-question outcomes for one session.
#[derive(Debug, Clone)]
pub struct Scorer {
    started_at: DateTime<Utc>,
    total_questions: usize,
    answers: Vec<AnswerRecord>,
}

impl Scorer {
    #[must_use]
    pub fn new(started_at: DateTime<Utc>, total_questions: usize) -> Self {
        Self {
            started_at,
            total_questions,
            answers: Vec::with_capacity(total_questions),
        }
    }

    /// Compare `user_answer` to the reference sentence and record the outcome.
    ///
    /// Both sides are whitespace-normalized before an exact comparison.
    pub fn record(&mut self, question: &Question, user_answer: &str) -> &AnswerRecord {
        let user_answer = normalize_whitespace(user_answer);
        let correct_answer = normalize_whitespace(question.correct_sentence());
        let is_correct = user_answer == correct_answer;

        self.answers.push(AnswerRecord {
            question_id: question.id().clone(),
            user_answer,
            correct_answer,
            is_correct,
        });
        &self.answers[self.answers.len() - 1]
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.answers.iter().filter(|a| a.is_correct).count()
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Close the session and produce its result.
    ///
    /// # Errors
    ///
    /// Returns `SessionResultError` if `completed_at` precedes the start.
    pub fn finish(self, completed_at: DateTime<Utc>) -> Result<SessionResult, SessionResultError> {
        SessionResult::from_answers(
            self.started_at,
            completed_at,
            self.total_questions,
            self.answers,
        )
    }
}
