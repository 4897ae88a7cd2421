mod progress;
mod quiz;
mod selection;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::SessionProgress;
pub use quiz::QuizSession;
pub use selection::QuestionSelector;
pub use workflow::QuizService;
