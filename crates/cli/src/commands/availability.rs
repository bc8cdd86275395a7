use serde_json::json;

use super::{core_context, CommandResult};

pub fn run(agent_id: &str, window: &str) -> CommandResult {
    let (_config, directory, registry) = match core_context() {
        Ok(context) => context,
        Err(message) => return CommandResult::failure("availability", "config", message),
    };

    if let Err(error) = directory.agent(agent_id) {
        return CommandResult::failure("availability", error.class(), error.to_string());
    }

    let slots = registry.check_availability(agent_id, window);
    let free = slots.iter().filter(|slot| slot.is_available).count();

    CommandResult::success(
        "availability",
        json!({
            "agent_id": agent_id,
            "window": window,
            "timezone": registry.timezone().name(),
            "free_count": free,
            "slots": slots,
        }),
    )
}

#[cfg(test)]
mod tests {
    #[test]
    fn default_window_yields_a_slot_listing() {
        let result = super::run("agent1", "next 7 days");
        assert_eq!(result.exit_code, 0);
        let parsed: serde_json::Value = serde_json::from_str(&result.output).expect("json");
        assert_eq!(parsed["result"]["agent_id"], "agent1");
        assert!(parsed["result"]["slots"].is_array());
    }

    #[test]
    fn unknown_agent_is_rejected_before_slot_generation() {
        let result = super::run("agent9", "today");
        assert_eq!(result.exit_code, 1);
        let parsed: serde_json::Value = serde_json::from_str(&result.output).expect("json");
        assert_eq!(parsed["error_class"], "not_found");
    }
}
