use std::sync::Arc;

use reqwest::Client;
use tracing::{info, warn};

use crate::config::{Endpoint, QuizConfig};
use crate::error::AppServicesError;
use crate::question_source::{MockQuestionSource, QuestionSource, RemoteQuestionSource};
use crate::quiz::QuizService;
use crate::score_submitter::{MockScoreSubmitter, RemoteScoreSubmitter, ScoreSubmitter};

/// Assembles app-facing services from configuration.
#[derive(Clone)]
pub struct AppServices {
    config: QuizConfig,
    quiz: Arc<QuizService>,
}

impl AppServices {
    /// Build services for the configured endpoint, or offline mocks when none is set.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the HTTP client cannot be created.
    pub fn from_config(config: QuizConfig) -> Result<Self, AppServicesError> {
        let (source, submitter): (Arc<dyn QuestionSource>, Arc<dyn ScoreSubmitter>) =
            match &config.endpoint {
                Endpoint::Offline => {
                    info!("no endpoint configured, using built-in questions");
                    (
                        Arc::new(MockQuestionSource::builtin(config.mock_delay)),
                        Arc::new(MockScoreSubmitter::new(config.mock_delay)),
                    )
                }
                Endpoint::Remote(url) => {
                    info!(endpoint = %url, "using remote endpoint");
                    let client = Client::builder().timeout(config.request_timeout).build()?;
                    (
                        Arc::new(RemoteQuestionSource::new(client.clone(), url.clone())),
                        Arc::new(RemoteScoreSubmitter::new(client, url.clone())),
                    )
                }
            };

        let hint = config.endpoint.hint();
        if let Some(hint) = hint {
            warn!(endpoint = %config.endpoint, "{hint}");
        }

        let quiz = QuizService::new(config.rules, source, submitter).with_endpoint_hint(hint);
        Ok(Self {
            config,
            quiz: Arc::new(quiz),
        })
    }

    /// Build services from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` for invalid configuration or HTTP client failures.
    pub fn from_env() -> Result<Self, AppServicesError> {
        Self::from_config(QuizConfig::from_env()?)
    }

    #[must_use]
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }
}
