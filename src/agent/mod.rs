//! Agent system for free-form tasks with tool calling.
//!
//! Provides an LLM agent that can search YouTube, read transcripts and list
//! chapters, for tasks like "summarize video X" or "which chapter covers Y".

mod runner;
mod tools;

pub use runner::{Agent, AgentResponse, ToolCallRecord};
pub use tools::{parse_tool_call, tool_definitions, ToolCall, ToolContext};
