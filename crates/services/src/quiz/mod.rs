mod messages;
mod service;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use messages::{LOAD_FAILED, SAVE_FAILED_NOTE, load_failure_message};
pub use service::{AnswerOutcome, QuizService, StartOutcome};
