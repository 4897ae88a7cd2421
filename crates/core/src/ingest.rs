//! Row-level validation shared by every question source.
//!
//! Sources turn their raw input into [`QuestionDraft`]s and feed them through a
//! [`Validator`]. Bad rows never abort ingestion: each problem becomes a
//! [`RowDiagnostic`] and the row is dropped. Only an empty result is fatal.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;
use tracing::warn;

use crate::model::{Question, QuestionDraft, QuestionError, QuestionId, QuestionPool};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Pool-level ingestion failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IngestError {
    #[error("no valid questions were loaded")]
    PoolEmpty,
}

/// Why a single row was dropped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RowIssue {
    #[error("Expected {expected} columns, but found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("Failed to parse scrambledWords JSON: {0}")]
    ScrambledWordsJson(String),

    #[error("Failed to read record: {0}")]
    Record(String),

    #[error(transparent)]
    Invalid(#[from] QuestionError),

    #[error("duplicate id, first occurrence kept")]
    DuplicateId,
}

/// Coarse classification of a row problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// The row could not be read into a record at all.
    Malformed,
    /// The row was readable but breaks a content rule.
    Invalid,
}

impl RowIssue {
    #[must_use]
    pub fn kind(&self) -> IssueKind {
        match self {
            RowIssue::FieldCount { .. }
            | RowIssue::ScrambledWordsJson(_)
            | RowIssue::Record(_) => IssueKind::Malformed,
            RowIssue::Invalid(_) | RowIssue::DuplicateId => IssueKind::Invalid,
        }
    }
}

/// One reported problem, tied to the row it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDiagnostic {
    /// 1-based row number in the source (the header is row 1 for tabular data).
    pub row: usize,
    pub id: Option<String>,
    pub issue: RowIssue,
}

impl fmt::Display for RowDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "Row {} [ID: {}]: {}", self.row, id, self.issue),
            None => write!(f, "Row {}: {}", self.row, self.issue),
        }
    }
}

//
// ─── VALIDATOR ─────────────────────────────────────────────────────────────────
//

/// Accumulates accepted questions and diagnostics across one load.
#[derive(Debug, Default)]
pub struct Validator {
    seen: HashSet<QuestionId>,
    accepted: Vec<Question>,
    diagnostics: Vec<RowDiagnostic>,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a row that was dropped before it became a draft.
    pub fn reject(&mut self, row: usize, id: Option<&str>, issue: RowIssue) {
        let id = id.map(str::trim).filter(|id| !id.is_empty()).map(String::from);
        warn!(row, id = id.as_deref().unwrap_or("-"), reason = %issue, "question row rejected");
        self.diagnostics.push(RowDiagnostic { row, id, issue });
    }

    /// Validate a draft and keep it if it passes every rule.
    ///
    /// Every violated rule produces its own diagnostic. Returns `true` when
    /// the question was accepted.
    pub fn submit(&mut self, row: usize, draft: QuestionDraft) -> bool {
        let violations = draft.violations();
        if !violations.is_empty() {
            let id = draft.id.clone();
            for violation in violations {
                self.reject(row, Some(&id), RowIssue::Invalid(violation));
            }
            return false;
        }

        let id = draft.id.clone();
        match draft.validate() {
            Ok(question) => {
                if self.seen.insert(question.id().clone()) {
                    self.accepted.push(question);
                    true
                } else {
                    self.reject(row, Some(&id), RowIssue::DuplicateId);
                    false
                }
            }
            Err(err) => {
                self.reject(row, Some(&id), RowIssue::Invalid(err));
                false
            }
        }
    }

    #[must_use]
    pub fn finish(self) -> IngestReport {
        IngestReport {
            questions: self.accepted,
            diagnostics: self.diagnostics,
        }
    }
}

//
// ─── REPORT ────────────────────────────────────────────────────────────────────
//

/// Outcome of one ingestion pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub questions: Vec<Question>,
    pub diagnostics: Vec<RowDiagnostic>,
}

impl IngestReport {
    /// True when no row produced a diagnostic.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    #[must_use]
    pub fn count_of(&self, kind: IssueKind) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.issue.kind() == kind)
            .count()
    }

    /// Turn the accepted questions into a pool.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::PoolEmpty` if nothing passed validation.
    pub fn into_pool(self) -> Result<QuestionPool, IngestError> {
        QuestionPool::new(self.questions)
    }
}
