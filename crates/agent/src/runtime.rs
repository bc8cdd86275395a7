use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;

use crate::llm::LlmClient;
use crate::prompts;
use crate::tools::ToolRegistry;

/// Upper bound on model turns per user message; a model stuck calling
/// tools forever gets cut off with its last observation summarized.
const MAX_TURNS: usize = 6;

/// The bounded tool-calling loop.
///
/// Each user message triggers up to [`MAX_TURNS`] model completions. A
/// completion is either plain text (returned to the caller as the answer)
/// or a `TOOL <name> <json>` directive, in which case the tool runs and its
/// output is appended to the transcript as an observation for the next turn.
pub struct AgentRuntime {
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
}

/// A parsed `TOOL <name> <json>` directive.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolDirective {
    pub name: String,
    pub arguments: Value,
}

impl AgentRuntime {
    pub fn new(llm: Arc<dyn LlmClient>, tools: ToolRegistry) -> Self {
        Self { llm, tools }
    }

    pub async fn handle_message(&self, message: &str) -> Result<String> {
        let system = prompts::system_prompt(&self.tools);
        let mut transcript = format!("user: {message}\n");

        for turn in 0..MAX_TURNS {
            let reply = self.llm.complete(&system, &transcript).await?;

            let Some(directive) = parse_directive(&reply) else {
                tracing::debug!(
                    event_name = "agent.runtime.answered",
                    turns = turn + 1,
                    "assistant produced a final answer"
                );
                return Ok(reply.trim().to_string());
            };

            tracing::info!(
                event_name = "agent.runtime.tool_call",
                tool = %directive.name,
                turn = turn + 1,
                "executing tool directive"
            );
            let observation = self.tools.dispatch(&directive.name, directive.arguments).await;
            transcript.push_str(&format!(
                "assistant: {reply}\nobservation: {observation}\n"
            ));
        }

        Ok("I could not complete that request within my tool budget; \
            could you rephrase or narrow it down?"
            .to_string())
    }
}

/// Extract a tool directive from a model reply.
///
/// The directive must be the first non-empty line, shaped as
/// `TOOL <name> <json-object>`; anything else is treated as a final answer.
pub fn parse_directive(reply: &str) -> Option<ToolDirective> {
    let line = reply.lines().find(|line| !line.trim().is_empty())?.trim();
    let rest = line.strip_prefix("TOOL ")?;
    let (name, arguments) = match rest.split_once(' ') {
        Some((name, json)) => (name.trim(), json.trim()),
        None => (rest.trim(), "{}"),
    };
    if name.is_empty() {
        return None;
    }
    let arguments: Value = serde_json::from_str(arguments).ok()?;
    Some(ToolDirective { name: name.to_string(), arguments })
}
