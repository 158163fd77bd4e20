use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    config::Config,
    constants::quiz_prompt::{build_quiz_prompt, QUIZ_TEMPERATURE},
    errors::{AppError, AppResult},
};

/// One request/response exchange with a hosted chat-completion model.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends `prompt` as a single user message and returns the top reply verbatim.
    async fn complete(&self, prompt: &str) -> AppResult<String>;
}

pub struct OpenAiCompletionClient {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl OpenAiCompletionClient {
    pub fn new(api_key: &SecretString, api_base_url: &str, model_name: &str) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key.expose_secret())
            .with_api_base(api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: model_name.to_string(),
        }
    }

    /// `None` when no API key is configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        config
            .groq_api_key
            .as_ref()
            .map(|key| Self::new(key, &config.llm_api_base_url, &config.llm_model_name))
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        log::debug!(
            "Requesting completion from {} ({} prompt characters)",
            self.model_name,
            prompt.len()
        );

        let user_message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_message)])
            .temperature(QUIZ_TEMPERATURE)
            .build()?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            log::error!("Completion request to {} failed: {}", self.model_name, e);
            AppError::CompletionFailed(e.to_string())
        })?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::CompletionFailed("model returned no content".to_string()))
    }
}

/// Asks the model for a quiz over `text` and returns its unparsed reply.
pub async fn request_quiz(client: &dyn CompletionClient, text: &str) -> AppResult<String> {
    let prompt = build_quiz_prompt(text);
    let reply = client.complete(&prompt).await?;
    log::info!("Received {} character quiz reply", reply.len());
    Ok(reply)
}
