use std::time::Duration;

use async_trait::async_trait;
use quiz_core::model::SubmitTicket;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::error::SubmitError;

/// Body of a score submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSubmission {
    pub id: String,
    pub score: u32,
    pub passed: bool,
    pub total_questions: u32,
}

impl From<&SubmitTicket> for ScoreSubmission {
    fn from(ticket: &SubmitTicket) -> Self {
        Self {
            id: ticket.user_id.clone(),
            score: ticket.result.score,
            passed: ticket.result.passed,
            total_questions: ticket.result.total,
        }
    }
}

/// Acknowledgement returned by the scoring endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAck {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Reports a finished session's outcome.
#[async_trait]
pub trait ScoreSubmitter: Send + Sync {
    /// Submit once; callers do not retry.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError` when the score could not be recorded.
    async fn submit_score(&self, submission: &ScoreSubmission) -> Result<SubmitAck, SubmitError>;
}

//
// ─── MOCK ─────────────────────────────────────────────────────────────────────
//

/// Acknowledges every submission after a simulated delay. Stores nothing.
#[derive(Clone, Debug, Default)]
pub struct MockScoreSubmitter {
    delay: Duration,
}

impl MockScoreSubmitter {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl ScoreSubmitter for MockScoreSubmitter {
    async fn submit_score(&self, submission: &ScoreSubmission) -> Result<SubmitAck, SubmitError> {
        info!(
            id = %submission.id,
            score = submission.score,
            passed = submission.passed,
            "submitting mock score"
        );
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(SubmitAck {
            success: true,
            message: "Score saved (Mock)".into(),
        })
    }
}

//
// ─── REMOTE ───────────────────────────────────────────────────────────────────
//

/// Posts the submission to the endpoint.
///
/// The JSON body is sent as `text/plain` so script-hosted backends accept it
/// without a preflight request.
#[derive(Clone, Debug)]
pub struct RemoteScoreSubmitter {
    client: Client,
    endpoint: Url,
}

impl RemoteScoreSubmitter {
    #[must_use]
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl ScoreSubmitter for RemoteScoreSubmitter {
    async fn submit_score(&self, submission: &ScoreSubmission) -> Result<SubmitAck, SubmitError> {
        let body = serde_json::to_string(submission)
            .map_err(|err| SubmitError::Malformed(err.to_string()))?;
        debug!(endpoint = %self.endpoint, "submitting score");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SubmitError::HttpStatus(response.status()));
        }

        let ack: SubmitAck = response.json().await?;
        if !ack.success {
            return Err(SubmitError::Rejected(ack.message));
        }
        Ok(ack)
    }
}
