use crate::ingest::IngestError;
use crate::model::{Difficulty, Question, QuestionId};

/// The validated, in-memory collection of questions for one app session.
///
/// Never empty and never holds two questions with the same id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPool {
    questions: Vec<Question>,
}

impl QuestionPool {
    /// Build a pool from already-validated questions.
    ///
    /// Later duplicates of an id are dropped; the first occurrence wins.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::PoolEmpty` when no questions remain.
    pub fn new(questions: Vec<Question>) -> Result<Self, IngestError> {
        let mut seen = std::collections::HashSet::new();
        let questions: Vec<Question> = questions
            .into_iter()
            .filter(|q| seen.insert(q.id().clone()))
            .collect();

        if questions.is_empty() {
            return Err(IngestError::PoolEmpty);
        }
        Ok(Self { questions })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn get(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    /// Questions of exactly `difficulty`, in pool order.
    pub fn with_difficulty(&self, difficulty: Difficulty) -> impl Iterator<Item = &Question> {
        self.questions
            .iter()
            .filter(move |q| q.difficulty() == difficulty)
    }

    #[must_use]
    pub fn count_for(&self, difficulty: Difficulty) -> usize {
        self.with_difficulty(difficulty).count()
    }
}
