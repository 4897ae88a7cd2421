use std::sync::Arc;

use quiz_core::ingest::{IngestError, IngestReport, RowDiagnostic};
use quiz_core::model::QuestionPool;
use thiserror::Error;
use tracing::info;

use crate::source::{QuestionSource, SourceError};
use crate::tabular::{ColumnPolicy, parse_tabular};

/// Fatal load failures. Row-level problems never show up here.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Ingest(#[from] IngestError),
}

/// A pool together with the rows that were dropped while building it.
#[derive(Debug, Clone)]
pub struct LoadedPool {
    pub pool: QuestionPool,
    pub diagnostics: Vec<RowDiagnostic>,
}

/// Fetches tabular text from a source and turns it into a question pool.
#[derive(Clone)]
pub struct QuestionLoader {
    source: Arc<dyn QuestionSource>,
    policy: ColumnPolicy,
}

impl QuestionLoader {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        Self {
            source,
            policy: ColumnPolicy::AtLeast,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ColumnPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn location(&self) -> String {
        self.source.location()
    }

    /// Fetch and validate every row without requiring a non-empty result.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the source cannot be read.
    pub async fn report(&self) -> Result<IngestReport, SourceError> {
        let text = self.source.fetch().await?;
        Ok(parse_tabular(&text, self.policy))
    }

    /// Load the validated pool.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Source` if the source is unreachable and
    /// `LoadError::Ingest` if no row passed validation.
    pub async fn load(&self) -> Result<LoadedPool, LoadError> {
        let report = self.report().await?;
        let diagnostics = report.diagnostics.clone();
        let pool = report.into_pool()?;

        info!(
            source = %self.source.location(),
            questions = pool.len(),
            rejected = diagnostics.len(),
            "question pool loaded"
        );
        Ok(LoadedPool { pool, diagnostics })
    }
}
