//! Built-in prompt text and the placeholder contract for overrides.
//!
//! The markers `Thought:`, `Action:`, `Action Input:`, `Observation:` and
//! `Final Answer:` are what [`MrklOutputParser`](crate::MrklOutputParser)
//! scans for. Change them only together with the parser.

/// Version of the placeholder set below. Bump when a name is added or removed.
pub const PLACEHOLDER_VERSION: u32 = 1;

/// Comma-separated tool names, e.g. `search, calc`.
pub const TOOL_NAMES: &str = "tool_names";
/// One indented `name: description` line per tool.
pub const TOOL_STRINGS: &str = "tool_strings";
/// The user's question.
pub const INPUT: &str = "input";
/// Prior thought/action/observation transcript.
pub const AGENT_SCRATCHPAD: &str = "agent_scratchpad";

/// Placeholders the format instructions must contain, and the only ones allowed there.
pub const FORMAT_INSTRUCTIONS_PLACEHOLDERS: [&str; 2] = [TOOL_NAMES, TOOL_STRINGS];
/// Placeholders the suffix must contain. Others are filled by the caller at render time.
pub const SUFFIX_PLACEHOLDERS: [&str; 2] = [INPUT, AGENT_SCRATCHPAD];

/// Prefix of each line in the rendered tool list.
pub const TOOL_INDENT: &str = "    ";

pub const FORMAT_INSTRUCTIONS: &str = "Answer the following questions as best you can. You have access to the following tools:

{tool_strings}

Use the following format:

Question: the input question you must answer
Thought: you should always think about what to do
Action: the action to take, should be one of [{tool_names}]
Action Input: the input to the action
Observation: the result of the action
... (this Thought/Action/Action Input/Observation can repeat N times)
Thought: I now know the final answer
Final Answer: the final answer to the original input question";

pub const SUFFIX: &str = "Begin!

Question: {input}
Thought:{agent_scratchpad}";

pub const FINAL_ANSWER_ACTION: &str = "Final Answer:";
pub const OBSERVATION_PREFIX: &str = "Observation: ";
pub const LLM_PREFIX: &str = "Thought:";

/// Returned by the "force" early-stopping method.
pub const STOPPED_RESPONSE: &str = "Agent stopped due to iteration limit or time limit.";
