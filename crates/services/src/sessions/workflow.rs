use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{Difficulty, QuestionPool};
use storage::{FileSource, HttpSource, LoadedPool, QuestionLoader, QuestionSource};

use super::quiz::QuizSession;
use super::selection::QuestionSelector;
use crate::config::{DataLocation, QuizConfig};
use crate::error::SessionError;
use crate::generator::QuestionGenerator;

/// Orchestrates pool loading and session start.
///
/// The pool is loaded once per app session and then passed explicitly to
/// every session that draws from it.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    loader: QuestionLoader,
}

impl QuizService {
    #[must_use]
    pub fn new(clock: Clock, source: Arc<dyn QuestionSource>) -> Self {
        Self {
            clock,
            loader: QuestionLoader::new(source),
        }
    }

    /// Build a service reading from the configured data location.
    #[must_use]
    pub fn from_config(clock: Clock, config: &QuizConfig) -> Self {
        let source: Arc<dyn QuestionSource> = match &config.data {
            DataLocation::File(path) => Arc::new(FileSource::new(path)),
            DataLocation::Url(url) => Arc::new(HttpSource::new(url.clone())),
        };
        Self::new(clock, source)
    }

    #[must_use]
    pub fn source_location(&self) -> String {
        self.loader.location()
    }

    /// Fetch and validate the question pool.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Load` if the source is unreachable or no row is valid.
    pub async fn load_pool(&self) -> Result<LoadedPool, SessionError> {
        Ok(self.loader.load().await?)
    }

    /// Ask the generative service for a fresh pool instead of the table.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Generator` if the service is disabled, fails, or
    /// returns no valid question.
    pub async fn generate_pool(
        &self,
        generator: &QuestionGenerator,
        count: usize,
        difficulty: Difficulty,
    ) -> Result<QuestionPool, SessionError> {
        let report = generator.generate(count, difficulty).await?;
        Ok(report
            .into_pool()
            .map_err(crate::error::GeneratorError::from)?)
    }

    /// Draw `count` questions of `difficulty` and start a session on them.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestionsForDifficulty` if the pool has none.
    pub fn start_session(
        &self,
        pool: &QuestionPool,
        count: usize,
        difficulty: Difficulty,
    ) -> Result<QuizSession, SessionError> {
        let questions = QuestionSelector::new(pool).select(count, difficulty)?;
        QuizSession::new(questions, difficulty, self.clock)
    }
}
