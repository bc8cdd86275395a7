use std::sync::Arc;

use serde_json::json;
use visita_agent::{standard_tools, AgentRuntime, ChatCompletionClient};
use visita_core::Directory;

use super::{core_context, CommandResult};

pub fn run(message: &str) -> CommandResult {
    let (config, _directory, registry) = match core_context() {
        Ok(context) => context,
        Err(message) => return CommandResult::failure("chat", "config", message),
    };

    let llm = Arc::new(ChatCompletionClient::from_config(&config.llm));
    let tools = standard_tools(Arc::new(Directory::demo()), Arc::new(registry));
    let runtime = AgentRuntime::new(llm, tools);

    let worker = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(worker) => worker,
        Err(error) => return CommandResult::failure("chat", "runtime", error.to_string()),
    };

    match worker.block_on(runtime.handle_message(message)) {
        Ok(response) => CommandResult::success("chat", json!({ "response": response })),
        Err(error) => CommandResult::failure("chat", "llm", error.to_string()),
    }
}
