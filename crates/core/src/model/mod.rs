mod answer;
mod ids;
mod question;
mod rules;
mod session;

pub use answer::AnswerRecord;
pub use ids::{QuestionId, SessionGeneration};
pub use question::{MIN_OPTIONS, Question, QuestionError};
pub use rules::{DEFAULT_PASS_THRESHOLD, DEFAULT_QUESTION_COUNT, QuizResult, QuizRules};
pub use session::{
    AnswerStep, LoadTicket, Phase, Session, SessionError, SessionSnapshot, SubmitTicket,
};
