use thiserror::Error;

use crate::model::{Difficulty, QuestionId};
use crate::template::count_blanks;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Reasons a candidate record is not a valid question.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("scrambledWords is empty")]
    NoScrambledWords,

    #[error("template has {blanks} blanks, but scrambledWords has {words} words")]
    BlankMismatch { blanks: usize, words: usize },

    #[error("missing difficulty")]
    MissingDifficulty,

    #[error("invalid difficulty '{0}'")]
    UnknownDifficulty(String),
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated question as read from a data source.
///
/// `difficulty` stays a raw label until validation so that a typo can be
/// reported instead of silently dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    pub id: String,
    pub context: String,
    pub template: String,
    pub scrambled_words: Vec<String>,
    pub correct_sentence: String,
    pub distractor: String,
    pub difficulty: Option<String>,
}

impl QuestionDraft {
    /// Every record-level rule this draft breaks, in check order: required
    /// fields, blank/word count, difficulty label.
    ///
    /// Duplicate ids are a pool-level concern and are checked by
    /// [`crate::ingest::Validator`].
    #[must_use]
    pub fn violations(&self) -> Vec<QuestionError> {
        let mut found = Vec::new();
        let required = [
            ("id", &self.id),
            ("context", &self.context),
            ("correctSentence", &self.correct_sentence),
            ("template", &self.template),
            ("distractor", &self.distractor),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                found.push(QuestionError::MissingField(name));
            }
        }
        if self.scrambled_words.is_empty() {
            found.push(QuestionError::NoScrambledWords);
        } else if !self.template.trim().is_empty() {
            let blanks = count_blanks(&self.template);
            if blanks != self.scrambled_words.len() {
                found.push(QuestionError::BlankMismatch {
                    blanks,
                    words: self.scrambled_words.len(),
                });
            }
        }
        match self.difficulty.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => {
                if let Err(e) = raw.parse::<Difficulty>() {
                    found.push(QuestionError::UnknownDifficulty(e.raw));
                }
            }
            _ => found.push(QuestionError::MissingDifficulty),
        }
        found
    }

    /// Validate the record-level rules and build a `Question`.
    ///
    /// # Errors
    ///
    /// Returns the first violation reported by [`QuestionDraft::violations`].
    pub fn validate(self) -> Result<Question, QuestionError> {
        if let Some(first) = self.violations().into_iter().next() {
            return Err(first);
        }
        let difficulty = self
            .difficulty
            .as_deref()
            .ok_or(QuestionError::MissingDifficulty)?
            .parse::<Difficulty>()
            .map_err(|e| QuestionError::UnknownDifficulty(e.raw))?;

        Ok(Question {
            id: QuestionId::new(self.id.trim()),
            context: self.context,
            template: self.template,
            scrambled_words: self.scrambled_words,
            distractor: self.distractor.trim().to_string(),
            correct_sentence: self.correct_sentence,
            difficulty,
        })
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A validated "build a sentence" exercise. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    context: String,
    template: String,
    scrambled_words: Vec<String>,
    distractor: String,
    correct_sentence: String,
    difficulty: Difficulty,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    /// The "Person A" prompt line.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Words that fill the blanks, one per blank marker.
    #[must_use]
    pub fn scrambled_words(&self) -> &[String] {
        &self.scrambled_words
    }

    #[must_use]
    pub fn distractor(&self) -> &str {
        &self.distractor
    }

    #[must_use]
    pub fn correct_sentence(&self) -> &str {
        &self.correct_sentence
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
