mod difficulty;
mod ids;
mod pool;
mod question;
mod session;

pub use difficulty::{Difficulty, ParseDifficultyError};
pub use ids::QuestionId;
pub use pool::QuestionPool;
pub use question::{Question, QuestionDraft, QuestionError};
pub use session::{AnswerRecord, SessionResult, SessionResultError};
