//! Agent decision types.
//!
//! Every model turn is parsed into exactly one of two outcomes: invoke a
//! tool, or finish with an answer.

use serde::{Deserialize, Serialize};

/// A request to invoke a tool with a string input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentAction {
    /// Name of the tool to invoke
    pub tool: String,

    /// Input passed to the tool
    pub tool_input: String,

    /// The raw model text this action was parsed from
    pub log: String,
}

/// The agent's final answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentFinish {
    /// The final answer text
    pub output: String,

    /// The raw model text this answer was parsed from
    pub log: String,
}

/// Outcome of parsing one model turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentDecision {
    Action(AgentAction),
    Finish(AgentFinish),
}

impl AgentDecision {
    pub fn is_finish(&self) -> bool {
        matches!(self, AgentDecision::Finish(_))
    }

    /// The raw model text behind this decision.
    pub fn log(&self) -> &str {
        match self {
            AgentDecision::Action(a) => &a.log,
            AgentDecision::Finish(f) => &f.log,
        }
    }
}

/// A completed action and the observation the tool returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntermediateStep {
    pub action: AgentAction,
    pub observation: String,
}

impl IntermediateStep {
    pub fn new(action: AgentAction, observation: impl Into<String>) -> Self {
        Self {
            action,
            observation: observation.into(),
        }
    }
}
