use crate::config::EndpointHint;
use crate::error::FetchError;

pub const LOAD_FAILED: &str = "Failed to load questions.";

/// Attached to a finished session when the score could not be submitted.
pub const SAVE_FAILED_NOTE: &str = "Could not save score online, but here are your results.";

const NETWORK_HINT: &str = "Network error: check that the endpoint is reachable \
                            and its access is set to allow anyone.";

/// User-facing explanation for a failed question fetch.
///
/// A test-deployment endpoint takes precedence over the failure itself, then
/// transport failures get an access hint, and anything else appends the cause.
#[must_use]
pub fn load_failure_message(err: &FetchError, hint: Option<EndpointHint>) -> String {
    if let Some(hint) = hint {
        return format!("{LOAD_FAILED} ({hint})");
    }
    if err.is_network() {
        return format!("{LOAD_FAILED} ({NETWORK_HINT})");
    }
    format!("{LOAD_FAILED} {err}")
}
