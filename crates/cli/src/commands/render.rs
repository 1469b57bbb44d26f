//! `rmrkl render`: Show the prompt an agent would send.

use rmrkl_agent::prompts::{AGENT_SCRATCHPAD, INPUT};
use rmrkl_agent::{PromptTemplates, Variables};
use std::path::Path;

pub fn run(
    config_path: Option<&Path>,
    input: Option<String>,
    vars: Vec<(String, String)>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    if config.tools.is_empty() {
        return Err("No tools configured. Add [[tools]] entries with a name and description.".into());
    }

    let prompt = PromptTemplates::from(&config.prompt).build(&config.tools)?;

    match input {
        Some(question) => {
            let mut values: Variables = vars.into_iter().collect();
            values.insert(INPUT.to_string(), question);
            values.entry(AGENT_SCRATCHPAD.to_string()).or_default();
            for message in prompt.format_messages(&values)? {
                println!("--- {} ---", message.role);
                println!("{}", message.content);
            }
        }
        None => {
            for message in prompt.messages() {
                println!("--- {} ---", message.role);
                println!("{}", message.template.template());
            }
        }
    }

    Ok(())
}

/// Parse a `KEY=VALUE` pair.
pub fn parse_var(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}
