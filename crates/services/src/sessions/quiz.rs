use chrono::{DateTime, Utc};
use tracing::info;

use quiz_core::Clock;
use quiz_core::assembly::Assembly;
use quiz_core::model::{AnswerRecord, Difficulty, Question, SessionResult};
use quiz_core::scoring::Scorer;

use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One timed run through a selected set of questions.
///
/// Owns the assembly state of the current question and the scorer. Questions
/// are answered strictly in order; each submit scores the current sentence and
/// moves on.
pub struct QuizSession {
    clock: Clock,
    difficulty: Difficulty,
    questions: Vec<Question>,
    current: usize,
    assembly: Option<Assembly>,
    scorer: Scorer,
    ended_at: Option<DateTime<Utc>>,
    time_expired: bool,
}

impl QuizSession {
    /// Start a session over `questions`, in the given order.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestionsForDifficulty` if `questions` is empty.
    pub fn new(
        questions: Vec<Question>,
        difficulty: Difficulty,
        clock: Clock,
    ) -> Result<Self, SessionError> {
        let Some(first) = questions.first() else {
            return Err(SessionError::NoQuestionsForDifficulty(difficulty));
        };
        let assembly = Assembly::new(first);
        let started_at = clock.now();
        info!(questions = questions.len(), %difficulty, "quiz session started");

        Ok(Self {
            clock,
            difficulty,
            scorer: Scorer::new(started_at, questions.len()),
            questions,
            current: 0,
            assembly: Some(assembly),
            ended_at: None,
            time_expired: false,
        })
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.scorer.started_at()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Index of the question being answered, 0-based.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_complete() {
            return None;
        }
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn assembly(&self) -> Option<&Assembly> {
        self.assembly.as_ref()
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerRecord] {
        self.scorer.answers()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.ended_at.is_some()
    }

    #[must_use]
    pub fn time_expired(&self) -> bool {
        self.time_expired
    }

    /// Mutable access to the session clock, for deterministic tests.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let answered = self.scorer.answers().len();
        SessionProgress {
            total: self.questions.len(),
            answered,
            remaining: self.questions.len().saturating_sub(answered),
            score: self.scorer.score(),
            is_complete: self.is_complete(),
            time_expired: self.time_expired,
        }
    }

    fn assembly_mut(&mut self) -> Result<&mut Assembly, SessionError> {
        self.assembly.as_mut().ok_or(SessionError::Completed)
    }

    /// Place `word` into the leftmost empty blank of the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` once the session has ended.
    pub fn place(&mut self, word: &str) -> Result<Option<usize>, SessionError> {
        Ok(self.assembly_mut()?.place(word))
    }

    /// Place the word at `pool_index` of the current word pool.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` once the session has ended.
    pub fn place_from_pool(&mut self, pool_index: usize) -> Result<Option<usize>, SessionError> {
        Ok(self.assembly_mut()?.place_from_pool(pool_index))
    }

    /// Return the word in blank `slot` to the pool.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` once the session has ended.
    pub fn remove(&mut self, slot: usize) -> Result<Option<String>, SessionError> {
        Ok(self.assembly_mut()?.remove(slot))
    }

    /// Return every placed word of the current question to the pool.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` once the session has ended.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.assembly_mut()?.clear();
        Ok(())
    }

    /// True when the current question has every blank filled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.assembly.as_ref().is_some_and(Assembly::is_complete)
    }

    /// Score the current sentence and advance to the next question.
    ///
    /// The session completes after the last question is submitted.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if the session has ended and
    /// `SessionError::Assembly` if a blank is still empty.
    pub fn submit(&mut self) -> Result<AnswerRecord, SessionError> {
        let sentence = self.assembly_mut()?.finalize()?;
        let question = self
            .questions
            .get(self.current)
            .ok_or(SessionError::Completed)?;
        let record = self.scorer.record(question, &sentence).clone();

        self.current += 1;
        self.assembly = self.questions.get(self.current).map(Assembly::new);
        if self.assembly.is_none() {
            self.end(false);
        }
        Ok(record)
    }

    /// End the session because the countdown ran out. Idempotent.
    pub fn time_up(&mut self) {
        if !self.is_complete() {
            self.end(true);
        }
    }

    fn end(&mut self, time_expired: bool) {
        self.assembly = None;
        self.time_expired = time_expired;
        self.ended_at = Some(self.now());
        info!(
            answered = self.scorer.answers().len(),
            score = self.scorer.score(),
            time_expired,
            "quiz session ended"
        );
    }

    /// Current time, never earlier than the session start.
    fn now(&self) -> DateTime<Utc> {
        let started_at = self.scorer.started_at();
        started_at + self.clock.elapsed_since(started_at)
    }

    /// Produce the session result. An unfinished session is ended now.
    ///
    /// A wall clock stepping backwards yields a zero elapsed time.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Result` if more answers than questions were recorded.
    pub fn finish(self) -> Result<SessionResult, SessionError> {
        let completed_at = self.ended_at.unwrap_or_else(|| self.now());
        Ok(self.scorer.finish(completed_at)?)
    }
}
