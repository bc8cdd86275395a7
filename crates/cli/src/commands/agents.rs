use serde_json::json;

use super::{core_context, CommandResult};

pub fn run(agent_id: Option<&str>) -> CommandResult {
    let (_config, directory, _registry) = match core_context() {
        Ok(context) => context,
        Err(message) => return CommandResult::failure("agents", "config", message),
    };

    match agent_id {
        Some(id) => match directory.agent(id) {
            Ok(agent) => CommandResult::success(
                "agents",
                serde_json::to_value(agent).unwrap_or_default(),
            ),
            Err(error) => CommandResult::failure("agents", error.class(), error.to_string()),
        },
        None => {
            let agents: Vec<serde_json::Value> = directory
                .agents()
                .iter()
                .map(|agent| {
                    json!({
                        "id": agent.id,
                        "name": agent.name,
                        "specialities": agent.specialities,
                        "languages": agent.languages,
                    })
                })
                .collect();
            CommandResult::success("agents", json!({ "count": agents.len(), "agents": agents }))
        }
    }
}
