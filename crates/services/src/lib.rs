#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod error;
pub mod question_source;
pub mod quiz;
pub mod score_submitter;

pub use app_services::AppServices;
pub use config::{Endpoint, EndpointHint, QuizConfig};
pub use error::{AppServicesError, ConfigError, FetchError, QuizError, SubmitError};
pub use question_source::{
    MockQuestionSource, QuestionSource, RemoteQuestionSource, builtin_questions,
};
pub use quiz::{AnswerOutcome, QuizService, StartOutcome};
pub use score_submitter::{
    MockScoreSubmitter, RemoteScoreSubmitter, ScoreSubmission, ScoreSubmitter, SubmitAck,
};
