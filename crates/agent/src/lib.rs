//! Tool-calling layer of the visita assistant.
//!
//! The LLM is strictly a conversational front: every factual answer comes
//! from a tool backed by the deterministic core. The runtime runs a bounded
//! loop of model turns, executes any tool directives the model emits, and
//! feeds the observations back until the model answers in plain text.
//!
//! Tool failures are never raised at the loop boundary; they come back as
//! inline `{"error": ...}` payloads so the model can recover
//! conversationally (offer another slot, ask for a correction).

pub mod llm;
pub mod prompts;
pub mod runtime;
pub mod tools;

pub use llm::{ChatCompletionClient, LlmClient, ScriptedLlm};
pub use runtime::AgentRuntime;
pub use tools::{standard_tools, Tool, ToolRegistry};
