use std::sync::Arc;

use visita_agent::{tools, AgentRuntime, ChatCompletionClient, LlmClient};
use visita_core::config::AppConfig;
use visita_core::{BookingRegistry, Directory};

/// Shared handles for every route. The registry and directory are built
/// once here and injected, never reached through globals.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub directory: Arc<Directory>,
    pub registry: Arc<BookingRegistry>,
    pub runtime: Arc<AgentRuntime>,
}

impl AppState {
    pub fn build(config: AppConfig) -> Self {
        let llm: Arc<dyn LlmClient> = Arc::new(ChatCompletionClient::from_config(&config.llm));
        Self::with_llm(config, llm)
    }

    /// Same wiring with a caller-supplied model, used by tests to script
    /// the conversation.
    pub fn with_llm(config: AppConfig, llm: Arc<dyn LlmClient>) -> Self {
        let directory = Arc::new(Directory::demo());
        let registry = Arc::new(BookingRegistry::new(&config.calendar));
        let runtime = Arc::new(AgentRuntime::new(
            llm,
            tools::standard_tools(directory.clone(), registry.clone()),
        ));

        Self { config: Arc::new(config), directory, registry, runtime }
    }
}
