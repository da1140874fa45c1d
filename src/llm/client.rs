use super::types::*;
use crate::{Error, Result, config::LlmConfig};
use async_openai::{Client, config::OpenAIConfig, types as openai_types};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// A multimodal model that answers a single prompt about a single image.
#[async_trait]
pub trait VisionClient: Send + Sync {
    /// Sends one request upstream and returns the model's text reply.
    async fn complete(&self, request: VisionRequest) -> Result<String>;
}

pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OpenAiClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let mut openai_config = OpenAIConfig::new().with_api_key(config.api_key);

        if !config.base_url.is_empty() {
            openai_config = openai_config.with_api_base(config.base_url);
        }

        // One upstream call per request: disable the client's built-in retries.
        let backoff = backoff::ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        let mut client = Client::with_config(openai_config).with_backoff(backoff);

        if let Some(secs) = config.timeout_secs {
            let http_client = reqwest::Client::builder()
                .timeout(Duration::from_secs(secs))
                .build()?;
            client = client.with_http_client(http_client);
        }

        Ok(Self {
            client,
            model: config.model,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl VisionClient for OpenAiClient {
    async fn complete(&self, request: VisionRequest) -> Result<String> {
        debug!(
            model = %self.model,
            prompt_len = request.prompt.len(),
            image_bytes = request.image.data.len(),
            mime_type = %request.image.mime_type,
            "Creating vision chat completion"
        );

        let messages = request.to_openai_messages()?;

        let mut request_builder = openai_types::CreateChatCompletionRequestArgs::default();
        request_builder.model(&self.model).messages(messages);

        if let Some(temperature) = self.temperature {
            request_builder.temperature(temperature);
        }

        if let Some(max_tokens) = self.max_tokens {
            request_builder.max_tokens(max_tokens);
        }

        let openai_request = request_builder.build()?;

        let response = self.client.chat().create(openai_request).await?;

        debug!(
            "Received chat completion response with {} choices",
            response.choices.len()
        );

        let content = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::llm("Model returned no choices"))?
            .message
            .content
            .unwrap_or_default();

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_test_config() -> LlmConfig {
        LlmConfig {
            provider: "openai".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: "test-api-key".to_string(),
            model: "gpt-4o-mini".to_string(),
            system_prompt: None,
            temperature: Some(0.2),
            max_tokens: Some(512),
            timeout_secs: None,
        }
    }

    #[test]
    fn test_openai_client_creation() {
        let client = OpenAiClient::new(create_test_config()).unwrap();

        assert_eq!(client.model(), "gpt-4o-mini");
        assert_eq!(client.temperature, Some(0.2));
        assert_eq!(client.max_tokens, Some(512));
    }

    #[test]
    fn test_openai_client_with_timeout() {
        let mut config = create_test_config();
        config.base_url = String::new();
        config.timeout_secs = Some(30);

        let client = OpenAiClient::new(config).unwrap();
        assert_eq!(client.model(), "gpt-4o-mini");
    }
}
