use rand::Rng;
use rand::rng;
use rand::seq::SliceRandom;

use quiz_core::model::{Difficulty, Question, QuestionPool};

use crate::error::SessionError;

/// Draws the random, non-repeating question subset for a session.
pub struct QuestionSelector<'a> {
    pool: &'a QuestionPool,
}

impl<'a> QuestionSelector<'a> {
    #[must_use]
    pub fn new(pool: &'a QuestionPool) -> Self {
        Self { pool }
    }

    /// Pick up to `count` questions of exactly `difficulty`.
    ///
    /// Asking for more than are available silently returns all of them.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestionsForDifficulty` if the pool has none.
    pub fn select(&self, count: usize, difficulty: Difficulty) -> Result<Vec<Question>, SessionError> {
        self.select_with_rng(count, difficulty, &mut rng())
    }

    /// Same as [`QuestionSelector::select`] with a caller-supplied RNG.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestionsForDifficulty` if the pool has none.
    pub fn select_with_rng<R: Rng + ?Sized>(
        &self,
        count: usize,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<Vec<Question>, SessionError> {
        let mut candidates: Vec<Question> = self.pool.with_difficulty(difficulty).cloned().collect();
        if candidates.is_empty() {
            return Err(SessionError::NoQuestionsForDifficulty(difficulty));
        }

        // Fisher-Yates: every permutation equally likely.
        candidates.as_mut_slice().shuffle(rng);
        candidates.truncate(count);
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionDraft;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::{HashMap, HashSet};

    fn question(id: &str, difficulty: Difficulty) -> Question {
        QuestionDraft {
            id: id.into(),
            context: "Context".into(),
            template: "We ____ now".into(),
            scrambled_words: vec!["leave".into()],
            correct_sentence: "We leave now".into(),
            distractor: "left".into(),
            difficulty: Some(difficulty.label().into()),
        }
        .validate()
        .unwrap()
    }

    fn build_pool() -> QuestionPool {
        let mut questions = Vec::new();
        for i in 0..5 {
            questions.push(question(&format!("u-{i}"), Difficulty::University));
        }
        for i in 0..3 {
            questions.push(question(&format!("h-{i}"), Difficulty::HighSchool));
        }
        QuestionPool::new(questions).unwrap()
    }

    #[test]
    fn caps_at_available_questions() {
        let pool = build_pool();
        let picked = QuestionSelector::new(&pool)
            .select(9, Difficulty::University)
            .unwrap();

        assert_eq!(picked.len(), 5);
        assert!(picked.iter().all(|q| q.difficulty() == Difficulty::University));
        let ids: HashSet<_> = picked.iter().map(|q| q.id().clone()).collect();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn returns_at_most_count() {
        let pool = build_pool();
        let picked = QuestionSelector::new(&pool)
            .select(2, Difficulty::HighSchool)
            .unwrap();
        assert_eq!(picked.len(), 2);
        assert!(picked.iter().all(|q| q.difficulty() == Difficulty::HighSchool));
    }

    #[test]
    fn missing_difficulty_is_an_error() {
        let pool = build_pool();
        let err = QuestionSelector::new(&pool)
            .select(3, Difficulty::MiddleSchool)
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::NoQuestionsForDifficulty(Difficulty::MiddleSchool)
        ));
    }

    #[test]
    fn zero_count_returns_empty() {
        let pool = build_pool();
        let picked = QuestionSelector::new(&pool)
            .select(0, Difficulty::University)
            .unwrap();
        assert!(picked.is_empty());
    }

    #[test]
    fn first_position_is_roughly_uniform() {
        let pool = build_pool();
        let selector = QuestionSelector::new(&pool);
        let mut rng = StdRng::seed_from_u64(2024);
        let mut firsts: HashMap<String, usize> = HashMap::new();

        for _ in 0..5_000 {
            let picked = selector
                .select_with_rng(1, Difficulty::University, &mut rng)
                .unwrap();
            *firsts.entry(picked[0].id().to_string()).or_default() += 1;
        }

        assert_eq!(firsts.len(), 5);
        for count in firsts.values() {
            assert!((800..1200).contains(count), "skewed count {count}");
        }
    }
}
