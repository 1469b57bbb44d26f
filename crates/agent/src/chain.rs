//! Single-turn model chain: render the prompt, call the model once, return text.
//!
//! The chain keeps no state between calls. Looping over tool calls and
//! retrying failed requests are left to whoever drives the agent.

use rmrkl_core::error::Result;
use rmrkl_core::provider::{Provider, ProviderRequest};
use std::sync::Arc;
use tracing::debug;

use crate::template::{ChatPromptTemplate, Variables};

/// A chat prompt bound to a provider and sampling settings.
#[derive(Clone)]
pub struct LlmChain {
    provider: Arc<dyn Provider>,
    prompt: ChatPromptTemplate,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl LlmChain {
    pub fn new(
        provider: Arc<dyn Provider>,
        prompt: ChatPromptTemplate,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            prompt,
            model: model.into(),
            temperature: 0.0,
            max_tokens: None,
        }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the max tokens per response.
    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn prompt(&self) -> &ChatPromptTemplate {
        &self.prompt
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Render the prompt with `vars`, call the model once and return its text.
    pub async fn predict(&self, vars: &Variables, stop: &[String]) -> Result<String> {
        let messages = self.prompt.format_messages(vars)?;

        let request = ProviderRequest {
            model: self.model.clone(),
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            stop: stop.to_vec(),
        };

        let start = std::time::Instant::now();
        let response = self.provider.complete(request).await?;
        debug!(
            provider = self.provider.name(),
            model = %response.model,
            duration_ms = start.elapsed().as_millis() as u64,
            tokens = response.usage.as_ref().map(|u| u.total_tokens),
            "Model call completed"
        );

        Ok(response.message.content)
    }
}

impl std::fmt::Debug for LlmChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmChain")
            .field("provider", &self.provider.name())
            .field("prompt", &self.prompt)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}
