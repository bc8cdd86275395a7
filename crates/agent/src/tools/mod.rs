pub mod calculator;
pub mod directory;
pub mod scheduling;
pub mod web;

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use visita_core::{BookingRegistry, Directory};

/// A capability the model may invoke by name with a JSON argument object.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    /// One-line summary surfaced to the model in the system prompt.
    fn description(&self) -> &'static str;
    async fn execute(&self, input: Value) -> Result<Value>;
}

#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn register<T>(&mut self, tool: T)
    where
        T: Tool + 'static,
    {
        self.tools.insert(tool.name().to_string(), Box::new(tool));
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// `(name, description)` pairs, sorted for a stable prompt.
    pub fn catalog(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .tools
            .values()
            .map(|tool| (tool.name(), tool.description()))
            .collect();
        entries.sort_by_key(|(name, _)| *name);
        entries
    }

    /// Execute a tool by name; failures of any kind come back as an inline
    /// `{"error": ...}` payload instead of an `Err`, so the calling loop can
    /// hand them to the model as observations.
    pub async fn dispatch(&self, name: &str, input: Value) -> Value {
        let Some(tool) = self.tools.get(name) else {
            return json!({ "error": format!("unknown tool `{name}`") });
        };
        match tool.execute(input).await {
            Ok(output) => output,
            Err(error) => {
                tracing::warn!(
                    event_name = "agent.tool.error",
                    tool = name,
                    error = %error,
                    "tool execution failed"
                );
                json!({ "error": error.to_string() })
            }
        }
    }
}

/// The full tool set the assistant ships with, wired to the shared
/// directory and booking registry.
pub fn standard_tools(directory: Arc<Directory>, registry: Arc<BookingRegistry>) -> ToolRegistry {
    let mut tools = ToolRegistry::default();
    tools.register(calculator::CalculatorTool);
    tools.register(web::FetchUrlTool::new());
    tools.register(directory::ListAgentsTool::new(directory.clone()));
    tools.register(directory::GetAgentInfoTool::new(directory.clone()));
    tools.register(directory::FindAgentBySpecialityTool::new(directory.clone()));
    tools.register(directory::ListPropertiesTool::new(directory.clone()));
    tools.register(directory::GetPropertyInfoTool::new(directory));
    tools.register(scheduling::CheckAvailabilityTool::new(registry.clone()));
    tools.register(scheduling::CreateEventTool::new(registry));
    tools
}
