use crate::models::reading::Reading;
use futures::future::BoxFuture;

pub mod openai_service;
pub mod severity;

/// Every way fetching a suggestion can fail. None of these are retried.
#[derive(Debug, thiserror::Error)]
pub enum SuggestionError {
    #[error("error serializing request: {0}")]
    Serialization(#[source] serde_json::Error),
    #[error("error creating request: {0}")]
    BuildRequest(#[source] reqwest::Error),
    #[error("error sending request: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("error reading response: {0}")]
    ReadBody(#[source] reqwest::Error),
    #[error("error parsing response: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("upstream returned {status}: {message}")]
    Upstream {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("no suggestion available")]
    NoChoices,
}

/// Anything that can turn a reading into a free-text suggestion.
pub trait SuggestionProvider: Send + Sync {
    fn suggest<'a>(&'a self, reading: &'a Reading) -> BoxFuture<'a, Result<String, SuggestionError>>;
}
