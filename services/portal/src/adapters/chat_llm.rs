//! services/portal/src/adapters/chat_llm.rs
//!
//! This module contains the adapter for the AI helper's completion model.
//! It implements the `ChatCompletionService` port from the `core` crate over the
//! OpenAI chat-completions protocol, which Gemini also serves.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use portal_core::ports::{ChatCompletionService, PortError, PortResult};

use crate::config::Config;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `ChatCompletionService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiChatAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiChatAdapter {
    /// Creates a new `OpenAiChatAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    /// Builds the adapter from configuration, or `None` when no API key is set.
    pub fn from_config(config: &Config) -> Option<Self> {
        let api_key = config.chat_api_key.as_ref()?;
        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(&config.chat_api_base);
        Some(Self::new(
            Client::with_config(openai_config),
            config.chat_model.clone(),
        ))
    }

    /// One system turn carrying the instruction, one user turn carrying the prompt.
    fn build_request(
        &self,
        system_instruction: &str,
        prompt: &str,
    ) -> PortResult<CreateChatCompletionRequest> {
        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system_instruction)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))
    }
}

//=========================================================================================
// `ChatCompletionService` Trait Implementation
//=========================================================================================

#[async_trait]
impl ChatCompletionService for OpenAiChatAdapter {
    async fn complete(&self, system_instruction: &str, prompt: &str) -> PortResult<String> {
        let request = self.build_request(system_instruction, prompt)?;

        // Map the client error by hand; the orphan rule forbids a `From` impl here.
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        // A reply without any text is not an error; the bridge substitutes a notice.
        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}
