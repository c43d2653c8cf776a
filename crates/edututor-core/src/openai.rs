use crate::openai::error::OpenAiError;
use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage, ChatCompletionRequestSystemMessageContent,
    ChatCompletionRequestUserMessage, ChatCompletionRequestUserMessageContent, CreateChatCompletionRequestArgs,
    CreateChatCompletionResponse,
};
use backoff::ExponentialBackoffBuilder;
use std::error::Error;
use std::time::Duration;
use tracing::instrument;
use typed_builder::TypedBuilder;

pub mod error;

#[derive(TypedBuilder, Debug, Clone)]
pub struct CallConfig {
    #[builder(default = Duration::from_secs(60))]
    total_timeout: Duration,
    #[builder(default = Duration::from_secs(30))]
    iteration_timeout: Duration,
    #[builder(default = Duration::from_millis(100))]
    min_retry_interval: Duration,
    #[builder(default = Duration::from_secs(2))]
    max_retry_interval: Duration,
}

impl Default for CallConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

pub fn system_message(content: String) -> ChatCompletionRequestMessage {
    ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
        content: ChatCompletionRequestSystemMessageContent::Text(content),
        name: None,
    })
}

pub fn user_message(content: String) -> ChatCompletionRequestMessage {
    ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
        content: ChatCompletionRequestUserMessageContent::Text(content),
        name: None,
    })
}

fn first_text(response: CreateChatCompletionResponse) -> Result<String, OpenAiError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(OpenAiError::EmptyResponse)
}

/// Sends a chat completion request and returns the text of the first choice.
///
/// Each attempt is limited by `iteration_timeout`, retries back off exponentially until
/// `total_timeout` has passed.
#[instrument(skip(config, openai_config, messages))]
pub async fn openai_chat_with_timeout(
    config: CallConfig,
    openai_config: OpenAIConfig,
    model: &str,
    messages: Vec<ChatCompletionRequestMessage>,
) -> Result<String, OpenAiError> {
    let request = CreateChatCompletionRequestArgs::default()
        .model(model)
        .messages(messages)
        .build()?;

    let http_client = reqwest::Client::builder()
        .timeout(config.iteration_timeout)
        .build()
        .map_err(|error| {
            tracing::error!(error = &error as &dyn Error, "failed to build http client for openai");
            OpenAiError::HttpClientBuild(error)
        })?;

    let mut backoff_builder = ExponentialBackoffBuilder::default();
    backoff_builder
        .with_max_interval(config.max_retry_interval)
        .with_initial_interval(config.min_retry_interval)
        .with_max_elapsed_time(Some(config.total_timeout));
    let backoff = backoff_builder.build();

    let client = Client::with_config(openai_config)
        .with_http_client(http_client)
        .with_backoff(backoff);

    tracing::debug!("sending openai request");
    let response = client.chat().create(request).await.map_err(|error| {
        tracing::warn!(error = &error as &dyn Error, "open AI call failed");
        OpenAiError::Api(error)
    })?;

    first_text(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_log::test;

    fn response(content: Option<&str>) -> CreateChatCompletionResponse {
        serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 0,
            "model": "test",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_first_text() {
        assert_eq!(first_text(response(Some("42"))).unwrap(), "42");
        assert!(matches!(first_text(response(None)), Err(OpenAiError::EmptyResponse)));
        assert!(matches!(first_text(response(Some("  "))), Err(OpenAiError::EmptyResponse)));
    }

    #[test(tokio::test)]
    async fn test_unreachable_api_fails() {
        let config = CallConfig::builder()
            .total_timeout(Duration::from_millis(200))
            .iteration_timeout(Duration::from_millis(100))
            .build();
        let openai_config = OpenAIConfig::default().with_api_base("http://127.0.0.1:9/v1");
        let result = openai_chat_with_timeout(config, openai_config, "test", vec![user_message("hi".to_owned())]).await;
        assert!(matches!(result, Err(OpenAiError::Api(_))));
    }
}
