//! The chat zero-shot agent and the factory that assembles it.
//!
//! Construction is all-or-nothing: the tool list and templates are checked,
//! the prompt is built and bound to the provider, and only then is an agent
//! returned. The agent decides one step at a time via [`ChatZeroShotAgent::plan`];
//! running tools and looping until a final answer is the caller's job.

use rmrkl_config::AppConfig;
use rmrkl_core::agent::{AgentDecision, AgentFinish, IntermediateStep};
use rmrkl_core::error::Result;
use rmrkl_core::provider::Provider;
use rmrkl_core::tool::{self, Tool, ToolDescriptor};
use std::fmt::Write;
use std::sync::Arc;
use tracing::{debug, info};

use crate::chain::LlmChain;
use crate::output_parser::{MrklOutputParser, OutputParser};
use crate::prompt::{PromptTemplates, build_prompt};
use crate::prompts::{AGENT_SCRATCHPAD, LLM_PREFIX, OBSERVATION_PREFIX, STOPPED_RESPONSE};
use crate::template::{ChatPromptTemplate, Variables};

/// A MRKL agent for chat models, assembled by [`AgentFactory`].
pub struct ChatZeroShotAgent {
    chain: LlmChain,
    allowed_tools: Vec<String>,
    output_parser: Arc<dyn OutputParser>,
    extra: serde_json::Map<String, serde_json::Value>,
}

impl ChatZeroShotAgent {
    pub fn chain(&self) -> &LlmChain {
        &self.chain
    }

    pub fn prompt(&self) -> &ChatPromptTemplate {
        self.chain.prompt()
    }

    /// Tool names the model may request, in prompt order.
    pub fn allowed_tools(&self) -> &[String] {
        &self.allowed_tools
    }

    pub fn is_allowed(&self, tool: &str) -> bool {
        self.allowed_tools.iter().any(|t| t == tool)
    }

    /// Extra settings supplied at construction, for the loop driving this agent.
    pub fn extra(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.extra
    }

    pub fn observation_prefix(&self) -> &'static str {
        OBSERVATION_PREFIX
    }

    pub fn llm_prefix(&self) -> &'static str {
        LLM_PREFIX
    }

    /// Stop sequences that keep the model from inventing its own observations.
    pub fn stop(&self) -> Vec<String> {
        let marker = OBSERVATION_PREFIX.trim_end();
        vec![format!("\n{marker}"), format!("\n\t{marker}")]
    }

    /// Render previous steps as the transcript the model continues from.
    pub fn construct_scratchpad(&self, steps: &[IntermediateStep]) -> String {
        let mut thoughts = String::new();
        for step in steps {
            thoughts.push_str(&step.action.log);
            let _ = write!(
                thoughts,
                "\n{}{}\n{}",
                OBSERVATION_PREFIX, step.observation, LLM_PREFIX
            );
        }
        thoughts
    }

    /// Decide the next step given the steps taken so far.
    ///
    /// `inputs` must hold every human-template variable except
    /// `agent_scratchpad`, which is built from `steps`.
    pub async fn plan(
        &self,
        steps: &[IntermediateStep],
        inputs: &Variables,
    ) -> Result<AgentDecision> {
        let mut vars = inputs.clone();
        vars.insert(AGENT_SCRATCHPAD.to_string(), self.construct_scratchpad(steps));

        debug!(steps = steps.len(), "Planning next step");
        let output = self.chain.predict(&vars, &self.stop()).await?;
        Ok(self.output_parser.parse(&output)?)
    }

    /// The answer returned when the driving loop stops the agent early.
    pub fn stopped_response(&self) -> AgentFinish {
        AgentFinish {
            output: STOPPED_RESPONSE.to_string(),
            log: String::new(),
        }
    }
}

impl std::fmt::Debug for ChatZeroShotAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatZeroShotAgent")
            .field("chain", &self.chain)
            .field("allowed_tools", &self.allowed_tools)
            .field("extra", &self.extra)
            .finish_non_exhaustive()
    }
}

/// Builds [`ChatZeroShotAgent`]s from a provider, templates and a parser.
#[derive(Clone)]
pub struct AgentFactory {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    templates: PromptTemplates,
    output_parser: Arc<dyn OutputParser>,
    extra: serde_json::Map<String, serde_json::Value>,
}

impl AgentFactory {
    /// A factory with the built-in templates and the MRKL output parser.
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.0,
            max_tokens: None,
            templates: PromptTemplates::default(),
            output_parser: Arc::new(MrklOutputParser),
            extra: serde_json::Map::new(),
        }
    }

    /// A factory carrying the model, sampling, template and extra settings of `config`.
    pub fn from_config(provider: Arc<dyn Provider>, config: &AppConfig) -> Self {
        let mut factory = Self::new(provider, &config.default_model)
            .with_temperature(config.default_temperature)
            .with_max_tokens(config.default_max_tokens)
            .with_templates(PromptTemplates::from(&config.prompt));
        factory.extra = config.agent.extra.clone();
        factory
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the max tokens per model response.
    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Replace the human message template.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.templates.suffix = suffix.into();
        self
    }

    /// Replace the system message template.
    pub fn with_format_instructions(mut self, format_instructions: impl Into<String>) -> Self {
        self.templates.format_instructions = format_instructions.into();
        self
    }

    pub fn with_templates(mut self, templates: PromptTemplates) -> Self {
        self.templates = templates;
        self
    }

    pub fn with_output_parser(mut self, parser: Arc<dyn OutputParser>) -> Self {
        self.output_parser = parser;
        self
    }

    /// Attach a free-form setting to every agent built.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn templates(&self) -> &PromptTemplates {
        &self.templates
    }

    /// Assemble an agent for `tools`.
    ///
    /// Fails with a configuration error for an empty, blank-named or
    /// duplicate-named tool list and with a template error for templates
    /// that break the placeholder contract. Nothing is returned on failure.
    pub fn build(&self, tools: &[ToolDescriptor]) -> Result<ChatZeroShotAgent> {
        let prompt = build_prompt(tools, &self.templates.suffix, &self.templates.format_instructions)?;

        let chain = LlmChain::new(self.provider.clone(), prompt, self.model.as_str())
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);

        let allowed_tools: Vec<String> = tools.iter().map(|t| t.name.clone()).collect();

        info!(
            provider = self.provider.name(),
            model = %self.model,
            tools = %allowed_tools.join(", "),
            "Chat zero-shot agent assembled"
        );

        Ok(ChatZeroShotAgent {
            chain,
            allowed_tools,
            output_parser: self.output_parser.clone(),
            extra: self.extra.clone(),
        })
    }

    /// Assemble an agent from tool objects rather than descriptors.
    pub fn build_from_tools<T: AsRef<dyn Tool>>(&self, tools: &[T]) -> Result<ChatZeroShotAgent> {
        self.build(&tool::descriptors(tools))
    }
}

/// Assemble an agent with the built-in templates and parser.
pub fn make_agent(
    provider: Arc<dyn Provider>,
    model: impl Into<String>,
    tools: &[ToolDescriptor],
) -> Result<ChatZeroShotAgent> {
    AgentFactory::new(provider, model).build(tools)
}
