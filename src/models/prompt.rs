use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// Body sent to the chat completion endpoint.
#[derive(Debug, Deserialize, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

/// The part of the chat completion response we read. Fields the provider
/// leaves out or sets to null decode as `None` rather than failing.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Option<Vec<Choice>>,
}

impl ChatResponse {
    /// Content of the first choice. A choice without message or content
    /// yields an empty string; no choices at all yields `None`.
    pub fn first_content(self) -> Option<String> {
        self.choices
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|choice| {
                choice
                    .message
                    .and_then(|message| message.content)
                    .unwrap_or_default()
            })
    }
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Error envelope returned by the provider on non-success statuses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
}
