//! The chat zero-shot MRKL agent.
//!
//! A zero-shot agent gets no worked examples, only format instructions and
//! a description of each tool. This crate covers the construction side:
//!
//! 1. **Assemble** a system/human chat prompt from the tool list
//!    ([`build_prompt`])
//! 2. **Bind** it to a model provider as a single-turn [`LlmChain`]
//! 3. **Return** a [`ChatZeroShotAgent`] that knows its allowed tools and
//!    parses each model turn into an action or a final answer
//!
//! The loop that executes tools and feeds observations back lives with the
//! caller; [`ChatZeroShotAgent::plan`] takes one step of it.

pub mod agent;
pub mod chain;
pub mod output_parser;
pub mod prompt;
pub mod prompts;
pub mod template;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use agent::{AgentFactory, ChatZeroShotAgent, make_agent};
pub use chain::LlmChain;
pub use output_parser::{MrklOutputParser, OutputParser};
pub use prompt::{PromptTemplates, build_prompt, tool_names, tool_strings, validate_tools};
pub use template::{ChatPromptTemplate, MessageTemplate, PromptTemplate, Variables};
