use std::time::Duration;

use async_trait::async_trait;
use quiz_core::model::{Question, QuestionId};
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::error::FetchError;

/// Supplies the questions for one session.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch up to `count` questions, in play order.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` when the questions cannot be obtained.
    async fn fetch_questions(&self, count: u32) -> Result<Vec<Question>, FetchError>;
}

const BUILTIN: &[(u64, &str, [&str; 4], &str)] = &[
    (
        1,
        "What is the capital of France?",
        ["Berlin", "Madrid", "Paris", "Rome"],
        "Paris",
    ),
    (
        2,
        "Which pixel art game features a farmer?",
        ["Stardew Valley", "Minecraft", "Terraria", "Celeste"],
        "Stardew Valley",
    ),
    (
        3,
        "What color is Mario's hat?",
        ["Green", "Red", "Blue", "Yellow"],
        "Red",
    ),
    (
        4,
        "Which company created the Game Boy?",
        ["Sony", "Sega", "Nintendo", "Atari"],
        "Nintendo",
    ),
    (
        5,
        "What is the main character in Zelda?",
        ["Zelda", "Link", "Ganon", "Epona"],
        "Link",
    ),
];

/// The fixed question list used in offline mode.
#[must_use]
pub fn builtin_questions() -> Vec<Question> {
    BUILTIN
        .iter()
        .filter_map(|(id, title, options, answer)| {
            let options = options.iter().map(|option| (*option).to_string()).collect();
            Question::new(QuestionId::new(*id), *title, options, *answer).ok()
        })
        .collect()
}

//
// ─── MOCK ─────────────────────────────────────────────────────────────────────
//

/// Serves a fixed list after a simulated delay.
#[derive(Clone, Debug)]
pub struct MockQuestionSource {
    questions: Vec<Question>,
    delay: Duration,
}

impl MockQuestionSource {
    #[must_use]
    pub fn new(questions: Vec<Question>, delay: Duration) -> Self {
        Self { questions, delay }
    }

    #[must_use]
    pub fn builtin(delay: Duration) -> Self {
        Self::new(builtin_questions(), delay)
    }
}

#[async_trait]
impl QuestionSource for MockQuestionSource {
    async fn fetch_questions(&self, count: u32) -> Result<Vec<Question>, FetchError> {
        info!(count, "fetching mock questions");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let limit = usize::try_from(count).unwrap_or(usize::MAX);
        Ok(self.questions.iter().take(limit).cloned().collect())
    }
}

//
// ─── REMOTE ───────────────────────────────────────────────────────────────────
//

/// Reads questions from `GET {endpoint}?action=getQuestions&count=N`.
#[derive(Clone, Debug)]
pub struct RemoteQuestionSource {
    client: Client,
    endpoint: Url,
}

impl RemoteQuestionSource {
    #[must_use]
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl QuestionSource for RemoteQuestionSource {
    async fn fetch_questions(&self, count: u32) -> Result<Vec<Question>, FetchError> {
        let count_param = count.to_string();
        debug!(endpoint = %self.endpoint, count, "fetching questions");

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("action", "getQuestions"), ("count", count_param.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status()));
        }

        let mut questions: Vec<Question> = response.json().await?;
        if questions.is_empty() {
            return Err(FetchError::Empty);
        }
        questions.truncate(usize::try_from(count).unwrap_or(usize::MAX));
        Ok(questions)
    }
}
