//! `rmrkl check`: Validate configuration, tools and templates.

use rmrkl_agent::PromptTemplates;
use std::path::Path;

pub fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let templates = PromptTemplates::from(&config.prompt);
    templates.validate()?;
    let prompt = templates.build(&config.tools)?;

    println!();
    println!("  Model:        {}", config.default_model);
    println!("  Temperature:  {}", config.default_temperature);
    println!(
        "  Tools:        {}",
        rmrkl_agent::tool_names(&config.tools)
    );
    println!("  Variables:    {}", prompt.input_variables().join(", "));
    if !config.agent.extra.is_empty() {
        println!(
            "  Extra:        {}",
            serde_json::Value::Object(config.agent.extra.clone())
        );
    }
    println!();
    println!("  OK");
    Ok(())
}
