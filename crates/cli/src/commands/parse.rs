//! `rmrkl parse`: Classify model output as an action or a final answer.

use rmrkl_agent::{MrklOutputParser, OutputParser};
use std::io::Read;

pub fn run(text: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let text = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let decision = MrklOutputParser.parse(&text)?;
    println!("{}", serde_json::to_string_pretty(&decision)?);
    Ok(())
}
