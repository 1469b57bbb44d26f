//! Output parsing: turns raw model text into an [`AgentDecision`].
//!
//! The default [`MrklOutputParser`] understands the text format taught by
//! [`FORMAT_INSTRUCTIONS`](crate::prompts::FORMAT_INSTRUCTIONS):
//!
//! ```text
//! Thought: I should look this up
//! Action: search
//! Action Input: population of France
//! ```
//!
//! or
//!
//! ```text
//! Thought: I now know the final answer
//! Final Answer: about 68 million
//! ```

use regex_lite::Regex;
use rmrkl_core::agent::{AgentAction, AgentDecision, AgentFinish};
use rmrkl_core::error::OutputParseError;
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::prompts::FINAL_ANSWER_ACTION;

/// Parses one model turn into an action or a final answer.
pub trait OutputParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<AgentDecision, OutputParseError>;
}

/// The default parser for `Action:` / `Action Input:` / `Final Answer:` output.
#[derive(Debug, Clone, Copy, Default)]
pub struct MrklOutputParser;

fn action_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)Action\s*\d*\s*:(.*?)\nAction\s*\d*\s*Input\s*\d*\s*:[\s]*(.*)")
            .expect("action regex is valid")
    })
}

impl OutputParser for MrklOutputParser {
    fn parse(&self, text: &str) -> Result<AgentDecision, OutputParseError> {
        // A final answer wins even if the model also wrote an action.
        if let Some((_, answer)) = text.rsplit_once(FINAL_ANSWER_ACTION) {
            debug!("Parsed final answer");
            return Ok(AgentDecision::Finish(AgentFinish {
                output: answer.trim().to_string(),
                log: text.to_string(),
            }));
        }

        let Some(caps) = action_regex().captures(text) else {
            warn!(len = text.len(), "Model output matched neither action nor final answer");
            return Err(OutputParseError::Unparseable {
                text: text.to_string(),
            });
        };

        let tool = caps.get(1).map_or("", |m| m.as_str()).trim();
        let tool_input = caps
            .get(2)
            .map_or("", |m| m.as_str())
            .trim_matches(' ')
            .trim_matches('"');

        debug!(tool, "Parsed action");
        Ok(AgentDecision::Action(AgentAction {
            tool: tool.to_string(),
            tool_input: tool_input.to_string(),
            log: text.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> AgentDecision {
        MrklOutputParser.parse(text).unwrap()
    }

    #[test]
    fn parses_action() {
        let text = "Thought: I need to search\nAction: search\nAction Input: rust language";
        let AgentDecision::Action(action) = parse(text) else {
            panic!("expected action");
        };
        assert_eq!(action.tool, "search");
        assert_eq!(action.tool_input, "rust language");
        assert_eq!(action.log, text);
    }

    #[test]
    fn strips_quotes_and_spaces_from_input() {
        let text = "Action: calc\nAction Input:   \"2 + 2\"  ";
        let AgentDecision::Action(action) = parse(text) else {
            panic!("expected action");
        };
        assert_eq!(action.tool, "calc");
        assert_eq!(action.tool_input, "2 + 2");
    }

    #[test]
    fn numbered_markers_accepted() {
        let text = "Action 1: search\nAction 1 Input 1: weather";
        let AgentDecision::Action(action) = parse(text) else {
            panic!("expected action");
        };
        assert_eq!(action.tool, "search");
        assert_eq!(action.tool_input, "weather");
    }

    #[test]
    fn multiline_input_kept() {
        let text = "Action: python\nAction Input: x = 1\nprint(x)";
        let AgentDecision::Action(action) = parse(text) else {
            panic!("expected action");
        };
        assert_eq!(action.tool_input, "x = 1\nprint(x)");
    }

    #[test]
    fn parses_final_answer() {
        let text = "Thought: I now know the final answer\nFinal Answer:  Paris \n";
        assert_eq!(
            parse(text),
            AgentDecision::Finish(AgentFinish {
                output: "Paris".into(),
                log: text.into(),
            })
        );
    }

    #[test]
    fn final_answer_takes_last_occurrence() {
        let text = "Final Answer: draft\nFinal Answer: 42";
        let AgentDecision::Finish(finish) = parse(text) else {
            panic!("expected finish");
        };
        assert_eq!(finish.output, "42");
    }

    #[test]
    fn final_answer_beats_action() {
        let text = "Action: search\nAction Input: x\nFinal Answer: done";
        assert!(parse(text).is_finish());
    }

    #[test]
    fn unparseable_output_is_error() {
        let err = MrklOutputParser.parse("I am not sure what to do.").unwrap_err();
        assert_eq!(
            err,
            OutputParseError::Unparseable {
                text: "I am not sure what to do.".into()
            }
        );
    }

    #[test]
    fn action_without_input_is_error() {
        assert!(MrklOutputParser.parse("Action: search").is_err());
    }
}
