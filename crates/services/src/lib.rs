#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod generator;
pub mod sessions;
pub mod timer;

pub use quiz_core::Clock;

pub use config::{DataLocation, QuizConfig};
pub use error::{GeneratorError, SessionError};
pub use generator::{GeneratorConfig, QuestionGenerator};
pub use sessions::{QuestionSelector, QuizService, QuizSession, SessionProgress};
pub use timer::TimerTask;
