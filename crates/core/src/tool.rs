//! Tool trait: the abstraction over agent capabilities.
//!
//! A zero-shot agent only needs to know a tool's name and description to
//! describe it to the model. Invocation belongs to the execution loop that
//! drives the agent, so it is part of the trait but never called here.

use crate::error::ToolError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The name and description of a tool, as shown to the model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Unique name of the tool (e.g., "search")
    pub name: String,

    /// What the tool does, in natural language
    pub description: String,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// The core Tool trait.
///
/// MRKL tools take a single string input and return a string observation.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "search", "calculator").
    fn name(&self) -> &str;

    /// A description of what this tool does (sent to the LLM).
    fn description(&self) -> &str;

    /// Run the tool on the action input chosen by the model.
    async fn invoke(&self, input: &str) -> std::result::Result<String, ToolError>;

    /// Snapshot this tool's name and description.
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new(self.name(), self.description())
    }
}

/// Collect descriptors from a list of tools, preserving order.
pub fn descriptors<T: AsRef<dyn Tool>>(tools: &[T]) -> Vec<ToolDescriptor> {
    tools.iter().map(|t| t.as_ref().descriptor()).collect()
}
