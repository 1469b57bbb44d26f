//! Prompt assembly for the chat zero-shot agent.
//!
//! Produces a two-message chat prompt:
//!
//! 1. **system**: the format instructions with the tool list and tool names
//!    substituted in. Fixed text from then on.
//! 2. **human**: the suffix template, still holding `{input}`,
//!    `{agent_scratchpad}` and any caller placeholders for each turn.

use rmrkl_config::PromptConfig;
use rmrkl_core::error::{Error, Result, TemplateError};
use rmrkl_core::tool::ToolDescriptor;
use std::collections::HashSet;
use tracing::debug;

use crate::prompts::{
    FORMAT_INSTRUCTIONS, FORMAT_INSTRUCTIONS_PLACEHOLDERS, SUFFIX, SUFFIX_PLACEHOLDERS,
    TOOL_INDENT, TOOL_NAMES, TOOL_STRINGS,
};
use crate::template::{ChatPromptTemplate, MessageTemplate, PromptTemplate, Variables};

/// The pair of templates a prompt is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplates {
    /// System message template (`{tool_names}`, `{tool_strings}`)
    pub format_instructions: String,
    /// Human message template (`{input}`, `{agent_scratchpad}`, extras)
    pub suffix: String,
}

impl PromptTemplates {
    pub fn new(format_instructions: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            format_instructions: format_instructions.into(),
            suffix: suffix.into(),
        }
    }

    /// Parse both templates and check them against the placeholder contract.
    pub fn validate(&self) -> std::result::Result<(PromptTemplate, PromptTemplate), TemplateError> {
        let format = PromptTemplate::parse(self.format_instructions.as_str())?;
        require_placeholders(&format, "format instructions", &FORMAT_INSTRUCTIONS_PLACEHOLDERS)?;
        if let Some(unknown) = format
            .input_variables()
            .into_iter()
            .find(|name| !FORMAT_INSTRUCTIONS_PLACEHOLDERS.contains(name))
        {
            return Err(TemplateError::UnknownPlaceholder {
                template: "format instructions".into(),
                name: unknown.to_string(),
            });
        }

        let suffix = PromptTemplate::parse(self.suffix.as_str())?;
        require_placeholders(&suffix, "suffix", &SUFFIX_PLACEHOLDERS)?;

        Ok((format, suffix))
    }

    /// Build the chat prompt for `tools` from these templates.
    pub fn build(&self, tools: &[ToolDescriptor]) -> Result<ChatPromptTemplate> {
        build_prompt(tools, &self.suffix, &self.format_instructions)
    }
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self::new(FORMAT_INSTRUCTIONS, SUFFIX)
    }
}

/// Configured overrides, falling back to the built-in text.
impl From<&PromptConfig> for PromptTemplates {
    fn from(config: &PromptConfig) -> Self {
        Self::new(
            config
                .format_instructions
                .as_deref()
                .unwrap_or(FORMAT_INSTRUCTIONS),
            config.suffix.as_deref().unwrap_or(SUFFIX),
        )
    }
}

fn require_placeholders(
    template: &PromptTemplate,
    label: &str,
    required: &[&str],
) -> std::result::Result<(), TemplateError> {
    match required.iter().find(|name| !template.has_variable(name)) {
        Some(name) => Err(TemplateError::MissingPlaceholder {
            template: label.to_string(),
            name: name.to_string(),
        }),
        None => Ok(()),
    }
}

/// Check that the tool list is usable: non-empty, names non-blank and unique.
///
/// Name equality is exact string equality.
pub fn validate_tools(tools: &[ToolDescriptor]) -> Result<()> {
    if tools.is_empty() {
        return Err(Error::config("at least one tool is required"));
    }

    let mut seen = HashSet::with_capacity(tools.len());
    for tool in tools {
        if tool.name.trim().is_empty() {
            return Err(Error::config(format!(
                "tool with description '{}' has an empty name",
                tool.description
            )));
        }
        if !seen.insert(tool.name.as_str()) {
            return Err(Error::config(format!(
                "duplicate tool name '{}'",
                tool.name
            )));
        }
    }
    Ok(())
}

/// One `    name: description` line per tool, in input order.
pub fn tool_strings(tools: &[ToolDescriptor]) -> String {
    tools
        .iter()
        .map(|t| format!("{TOOL_INDENT}{}: {}", t.name, t.description))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Tool names joined with `", "`, in input order.
pub fn tool_names(tools: &[ToolDescriptor]) -> String {
    tools
        .iter()
        .map(|t| t.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Assemble the system/human chat prompt for a set of tools.
///
/// Fails with [`Error::Config`] for an unusable tool list and with
/// [`Error::Template`] when either template is malformed or breaks the
/// placeholder contract in [`prompts`](crate::prompts).
pub fn build_prompt(
    tools: &[ToolDescriptor],
    suffix: &str,
    format_instructions: &str,
) -> Result<ChatPromptTemplate> {
    validate_tools(tools)?;

    let templates = PromptTemplates::new(format_instructions, suffix);
    let (format, suffix) = templates.validate()?;

    let vars = Variables::from([
        (TOOL_NAMES.to_string(), tool_names(tools)),
        (TOOL_STRINGS.to_string(), tool_strings(tools)),
    ]);
    let system = format.format(&vars)?;

    debug!(
        tools = tools.len(),
        system_len = system.len(),
        "Assembled chat zero-shot prompt"
    );

    Ok(ChatPromptTemplate::from_messages(vec![
        MessageTemplate::system(PromptTemplate::literal(system)),
        MessageTemplate::human(suffix),
    ]))
}
