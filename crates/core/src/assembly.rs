//! Sentence assembly: the per-question interaction state machine.
//!
//! The learner chooses *which word*; the engine chooses *which blank*, always
//! the leftmost empty one. Every word from `scrambled_words` plus the
//! distractor lives in exactly one place at all times: the word pool or a slot.

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::model::{Question, QuestionId};
use crate::template::{EMPTY_BLANK, Segment, Template};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AssemblyError {
    #[error("{empty} blank(s) still empty")]
    Incomplete { empty: usize },
}

/// Lifecycle of one assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyPhase {
    /// Freshly built, no action taken yet.
    Initialized,
    /// At least one action taken and some blank still empty.
    InProgress,
    /// Every blank holds a word; `finalize` is available.
    Complete,
}

/// Mutable state for answering a single question.
#[derive(Debug, Clone)]
pub struct Assembly {
    question_id: QuestionId,
    template: Template,
    slots: Vec<Option<String>>,
    word_pool: Vec<String>,
    total_words: usize,
    touched: bool,
}

impl Assembly {
    /// Start an assembly using the thread-local RNG for the word pool shuffle.
    #[must_use]
    pub fn new(question: &Question) -> Self {
        Self::with_rng(question, &mut rand::rng())
    }

    /// Start an assembly, shuffling `scrambled_words + distractor` with `rng`.
    #[must_use]
    pub fn with_rng<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> Self {
        let template = Template::parse(question.template());
        let mut word_pool: Vec<String> = question
            .scrambled_words()
            .iter()
            .cloned()
            .chain(std::iter::once(question.distractor().to_string()))
            .collect();
        word_pool.shuffle(rng);

        Self {
            question_id: question.id().clone(),
            slots: vec![None; template.blank_count()],
            total_words: word_pool.len(),
            template,
            word_pool,
            touched: false,
        }
    }

    #[must_use]
    pub fn question_id(&self) -> &QuestionId {
        &self.question_id
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        self.template.segments()
    }

    /// Slot contents indexed by blank position.
    #[must_use]
    pub fn slots(&self) -> &[Option<String>] {
        &self.slots
    }

    /// Words not yet placed, in display order.
    #[must_use]
    pub fn word_pool(&self) -> &[String] {
        &self.word_pool
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Size of the original word multiset (scrambled words + distractor).
    #[must_use]
    pub fn total_words(&self) -> usize {
        self.total_words
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    #[must_use]
    pub fn phase(&self) -> AssemblyPhase {
        if self.is_complete() {
            AssemblyPhase::Complete
        } else if self.touched {
            AssemblyPhase::InProgress
        } else {
            AssemblyPhase::Initialized
        }
    }

    fn first_empty_slot(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Place `word` into the leftmost empty blank.
    ///
    /// Returns the slot index that was filled, or `None` (no-op) when the word
    /// is not in the pool or every blank is already occupied.
    pub fn place(&mut self, word: &str) -> Option<usize> {
        let pool_index = self.word_pool.iter().position(|w| w == word)?;
        self.place_from_pool(pool_index)
    }

    /// Place the word shown at `pool_index` into the leftmost empty blank.
    pub fn place_from_pool(&mut self, pool_index: usize) -> Option<usize> {
        if pool_index >= self.word_pool.len() {
            return None;
        }
        let slot = self.first_empty_slot()?;
        let word = self.word_pool.remove(pool_index);
        self.slots[slot] = Some(word);
        self.touched = true;
        Some(slot)
    }

    /// Take the word out of blank `slot` and return it to the pool.
    ///
    /// Returns the removed word, or `None` (no-op) if the slot is empty or out
    /// of range.
    pub fn remove(&mut self, slot: usize) -> Option<String> {
        let word = self.slots.get_mut(slot)?.take()?;
        self.word_pool.push(word.clone());
        self.touched = true;
        Some(word)
    }

    /// Return every placed word to the pool.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            if let Some(word) = slot.take() {
                self.word_pool.push(word);
            }
        }
    }

    /// Current sentence with `_____` standing in for empty blanks.
    #[must_use]
    pub fn preview(&self) -> String {
        self.template
            .render(|idx| self.slots[idx].as_deref().unwrap_or(EMPTY_BLANK))
    }

    /// Build the submitted sentence.
    ///
    /// # Errors
    ///
    /// Returns `AssemblyError::Incomplete` while any blank is empty.
    pub fn finalize(&self) -> Result<String, AssemblyError> {
        let empty = self.slots.len() - self.occupied_count();
        if empty > 0 {
            return Err(AssemblyError::Incomplete { empty });
        }
        Ok(self
            .template
            .render(|idx| self.slots[idx].as_deref().unwrap_or_default()))
    }
}
