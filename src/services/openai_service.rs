use crate::config::Config;
use crate::models::prompt::{ApiErrorBody, ChatRequest, ChatResponse, Message, Role};
use crate::models::reading::Reading;
use crate::services::{SuggestionError, SuggestionProvider};
use futures::future::{BoxFuture, FutureExt};
use log::{debug, error, warn};
use reqwest::{header, Client, StatusCode};
use std::time::Duration;

const SYSTEM_PROMPT: &str = "You are a health monitoring assistant.";

pub struct OpenAIService {
    client: Client,
    url: String,
    api_key: String,
    model: String,
}

impl OpenAIService {
    /// `timeout` bounds the whole outbound call, connect through body.
    pub fn new(
        url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url,
            api_key,
            model,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(
            config.openai_url.clone(),
            config.openai_key.clone(),
            config.openai_model.clone(),
            config.openai_timeout,
        )
    }

    pub async fn get_suggestion(
        &self,
        temperature: f64,
        pulse: f64,
        oxygen_saturation: f64,
        language: &str,
    ) -> Result<String, SuggestionError> {
        let request_body = ChatRequest {
            model: self.model.clone(),
            messages: build_messages(temperature, pulse, oxygen_saturation, language),
        };
        let payload = serde_json::to_vec(&request_body).map_err(SuggestionError::Serialization)?;

        let request = self
            .client
            .post(&self.url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::CONTENT_TYPE, "application/json")
            .body(payload)
            .build()
            .map_err(SuggestionError::BuildRequest)?;

        debug!("requesting suggestion from {} ({})", self.url, self.model);

        let response = self.client.execute(request).await.map_err(|e| {
            error!("Failed to send request: {}", e);
            SuggestionError::Transport(e)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(SuggestionError::ReadBody)?;

        parse_completion(status, &body)
    }
}

impl SuggestionProvider for OpenAIService {
    fn suggest<'a>(&'a self, reading: &'a Reading) -> BoxFuture<'a, Result<String, SuggestionError>> {
        self.get_suggestion(
            reading.temperature,
            reading.pulse,
            reading.oxygen_saturation,
            &reading.language,
        )
        .boxed()
    }
}

/// The system message followed by the user message describing the vitals.
pub fn build_messages(
    temperature: f64,
    pulse: f64,
    oxygen_saturation: f64,
    language: &str,
) -> Vec<Message> {
    vec![
        Message {
            role: Role::System,
            content: SYSTEM_PROMPT.to_string(),
        },
        Message {
            role: Role::User,
            content: format!(
                "A patient has the following health readings:\n\
                 - Body Temperature: {:.1}°C\n\
                 - Pulse Rate: {:.1} BPM\n\
                 - SpO₂ Level: {:.1}%\n\
                 \n\
                 Based on these values, please provide a health assessment and any recommendations in {}.",
                temperature, pulse, oxygen_saturation, language
            ),
        },
    ]
}

fn parse_completion(status: StatusCode, body: &[u8]) -> Result<String, SuggestionError> {
    if !status.is_success() {
        let message = serde_json::from_slice::<ApiErrorBody>(body)
            .map(|api_error| api_error.error.message)
            .unwrap_or_else(|_| String::from_utf8_lossy(body).trim().to_string());
        warn!("completion API returned {}: {}", status, message);
        return Err(SuggestionError::Upstream { status, message });
    }

    let completion: ChatResponse = serde_json::from_slice(body).map_err(SuggestionError::Parse)?;

    completion.first_content().ok_or(SuggestionError::NoChoices)
}
