use std::env;
use std::fmt;
use std::num::NonZeroU32;
use std::time::Duration;

use quiz_core::model::{DEFAULT_PASS_THRESHOLD, DEFAULT_QUESTION_COUNT, QuizRules};
use url::Url;

use crate::error::ConfigError;

pub const ENDPOINT_URL_VAR: &str = "QUIZ_ENDPOINT_URL";
pub const QUESTION_COUNT_VAR: &str = "QUIZ_QUESTION_COUNT";
pub const PASS_THRESHOLD_VAR: &str = "QUIZ_PASS_THRESHOLD";
pub const REQUEST_TIMEOUT_VAR: &str = "QUIZ_REQUEST_TIMEOUT_SECS";
pub const MOCK_DELAY_VAR: &str = "QUIZ_MOCK_DELAY_MS";

/// Endpoint values containing this marker are template placeholders and
/// select offline mode.
pub const PLACEHOLDER_MARKER: &str = "MockUrl";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
const DEFAULT_MOCK_DELAY_MS: u64 = 1_000;

/// Where questions come from and scores go to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// Built-in question list, submissions are acknowledged locally.
    Offline,
    Remote(Url),
}

impl Endpoint {
    /// Interpret a raw endpoint setting. Blank values and placeholders mean offline.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEndpoint` for values that are neither blank,
    /// a placeholder, nor an absolute http(s) url.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        if raw.is_empty() || raw.contains(PLACEHOLDER_MARKER) {
            return Ok(Self::Offline);
        }
        let invalid = || ConfigError::InvalidEndpoint {
            var: ENDPOINT_URL_VAR,
            raw: raw.to_string(),
        };
        let url = Url::parse(raw).map_err(|_| invalid())?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid());
        }
        Ok(Self::Remote(url))
    }

    #[must_use]
    pub fn is_offline(&self) -> bool {
        matches!(self, Self::Offline)
    }

    /// Heuristic diagnosis of a misconfigured endpoint. Never fatal.
    #[must_use]
    pub fn hint(&self) -> Option<EndpointHint> {
        match self {
            Self::Offline => None,
            Self::Remote(url) => {
                let path = url.path().trim_end_matches('/');
                path.ends_with("/dev").then_some(EndpointHint::TestDeployment)
            }
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offline => f.write_str("offline"),
            Self::Remote(url) => write!(f, "{url}"),
        }
    }
}

/// Something about the endpoint looks like it will not work in production.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndpointHint {
    /// A test deployment url (path ending in `/dev`) instead of the published
    /// one ending in `/exec`.
    TestDeployment,
}

impl EndpointHint {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::TestDeployment => {
                "The endpoint looks like a test deployment ending in /dev. \
                 Use the published web app url ending in /exec."
            }
        }
    }
}

impl fmt::Display for EndpointHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizConfig {
    pub endpoint: Endpoint,
    pub rules: QuizRules,
    pub request_timeout: Duration,
    pub mock_delay: Duration,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::Offline,
            rules: QuizRules::default(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            mock_delay: Duration::from_millis(DEFAULT_MOCK_DELAY_MS),
        }
    }
}

impl QuizConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for malformed values; absent values use defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for malformed values; absent values use defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = match lookup(ENDPOINT_URL_VAR) {
            Some(raw) => Endpoint::parse(&raw)?,
            None => Endpoint::Offline,
        };

        let question_count = read_number(&lookup, QUESTION_COUNT_VAR)?
            .unwrap_or(u64::from(DEFAULT_QUESTION_COUNT));
        let question_count = u32::try_from(question_count)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(ConfigError::ZeroQuestionCount {
                var: QUESTION_COUNT_VAR,
            })?;

        let pass_threshold = read_number(&lookup, PASS_THRESHOLD_VAR)?
            .unwrap_or(u64::from(DEFAULT_PASS_THRESHOLD));
        let pass_threshold = u32::try_from(pass_threshold).unwrap_or(u32::MAX);

        let timeout_secs =
            read_number(&lookup, REQUEST_TIMEOUT_VAR)?.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout {
                var: REQUEST_TIMEOUT_VAR,
            });
        }

        let mock_delay_ms = read_number(&lookup, MOCK_DELAY_VAR)?.unwrap_or(DEFAULT_MOCK_DELAY_MS);

        Ok(Self {
            endpoint,
            rules: QuizRules::new(question_count, pass_threshold),
            request_timeout: Duration::from_secs(timeout_secs),
            mock_delay: Duration::from_millis(mock_delay_ms),
        })
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: QuizRules) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn with_mock_delay(mut self, delay: Duration) -> Self {
        self.mock_delay = delay;
        self
    }
}

fn read_number<F>(lookup: &F, var: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u64>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidNumber { var, raw })
}
