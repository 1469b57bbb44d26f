//! # rmrkl Core
//!
//! Domain types, traits, and error definitions shared by every rmrkl crate.
//! This crate has **no framework dependencies**: it describes the narrow
//! capabilities a chat zero-shot agent consumes (model invocation, tools)
//! and the decisions it produces.
//!
//! ## Design Philosophy
//!
//! Every external collaborator is a trait here. Concrete model backends and
//! tools live outside this workspace, and tests plug in scripted stubs.

pub mod agent;
pub mod error;
pub mod message;
pub mod provider;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use agent::{AgentAction, AgentDecision, AgentFinish, IntermediateStep};
pub use error::{Error, Result};
pub use message::{Message, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
pub use tool::{Tool, ToolDescriptor};
